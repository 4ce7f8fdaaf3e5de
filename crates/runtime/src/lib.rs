//! Runtime support for generated operation code
//!
//! Generated clients build an [`Operation`] descriptor once per operation,
//! create a [`Request`] bound to a [`Service`] handle, and either send it
//! once or stream successive pages through [`Pages`].
//!
//! HTTP, signing and retries live behind the [`Transport`] trait; this crate
//! only moves JSON payloads between typed inputs/outputs and the transport.

mod operation;
mod pages;
mod request;
mod service;

pub use operation::{Operation, Paginator};
pub use pages::Pages;
pub use request::{Output, Request};
pub use service::{Service, Transport};

use thiserror::Error;

/// Errors surfaced by generated calls
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Pagination error: {0}")]
    Pagination(String),
}

impl Error {
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }
}

/// Result type for generated calls
pub type Result<T> = std::result::Result<T, Error>;
