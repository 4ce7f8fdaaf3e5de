//! Service handle and transport seam

use crate::{Operation, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Executes one request on the wire
///
/// Implementations own serialization to the protocol, signing and retries.
/// `params` is the JSON form of the request input; the returned value is the
/// JSON form of the response payload.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn execute(&self, operation: &Operation, params: &Value) -> Result<Value>;
}

impl<F> Transport for F
where
    F: Fn(&Operation, &Value) -> Result<Value> + Send + Sync,
{
    fn execute(&self, operation: &Operation, params: &Value) -> Result<Value> {
        self(operation, params)
    }
}

/// Handle to one service endpoint, cheap to clone
#[derive(Clone)]
pub struct Service {
    name: String,
    transport: Arc<dyn Transport>,
}

impl Service {
    pub fn new<T: Transport + 'static>(name: &str, transport: T) -> Self {
        Self::with_transport(name, Arc::new(transport))
    }

    pub fn with_transport(name: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            name: name.to_string(),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service").field("name", &self.name).finish()
    }
}
