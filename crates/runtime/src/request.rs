//! Executable requests and their output containers

use crate::{Error, Operation, Result, Service};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Shared container a request writes its decoded response into
///
/// The request builder hands one clone to the request and returns another to
/// the caller, so the caller can read the result after `send`.
#[derive(Debug, Default)]
pub struct Output<T>(Arc<Mutex<T>>);

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Output<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(Mutex::new(value)))
    }

    /// Lock the container for reading or writing
    pub fn get(&self) -> MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the stored value
    pub fn set(&self, value: T) {
        *self.get() = value;
    }

    /// Move the stored value out, leaving a default in its place
    pub fn take(&self) -> T
    where
        T: Default,
    {
        std::mem::take(&mut *self.get())
    }
}

/// One request of an operation, ready to be sent
#[derive(Debug)]
pub struct Request<I, O> {
    service: Service,
    operation: &'static Operation,
    params: I,
    data: Option<Output<O>>,
    response: Option<Value>,
}

impl<I, O> Request<I, O>
where
    I: Serialize + DeserializeOwned,
    O: DeserializeOwned,
{
    /// Bind an input and an optional output container to an operation
    pub fn new(
        service: &Service,
        operation: &'static Operation,
        params: I,
        data: Option<Output<O>>,
    ) -> Self {
        Self {
            service: service.clone(),
            operation,
            params,
            data,
            response: None,
        }
    }

    pub fn operation(&self) -> &'static Operation {
        self.operation
    }

    pub fn params(&self) -> &I {
        &self.params
    }

    /// Output container the response is decoded into, if any
    pub fn data(&self) -> Option<&Output<O>> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, data: Output<O>) {
        self.data = Some(data);
    }

    /// Move the decoded response out of the output container
    pub fn take_data(&self) -> O
    where
        O: Default,
    {
        self.data.as_ref().map(Output::take).unwrap_or_default()
    }

    /// Execute the request through the service transport
    ///
    /// On success the response is decoded into the output container (when
    /// present) and kept for [`Request::next_page`].
    pub fn send(&mut self) -> Result<()> {
        self.response = None;

        let params = serde_json::to_value(&self.params)?;
        trace!(
            service = self.service.name(),
            operation = self.operation.name,
            "sending request"
        );
        let response = self.service.transport().execute(self.operation, &params)?;

        if let Some(data) = &self.data {
            data.set(serde_json::from_value(response.clone())?);
        }
        self.response = Some(response);
        Ok(())
    }

    /// Build the request for the page after this one
    ///
    /// Returns `Ok(None)` when the operation is not paginated, the request has
    /// not been sent successfully, the truncation field is absent or `false`,
    /// or the response carries no next-page token.
    pub fn next_page(&self) -> Result<Option<Self>>
    where
        O: Default,
    {
        let Some(paginator) = &self.operation.paginator else {
            return Ok(None);
        };
        let Some(response) = &self.response else {
            return Ok(None);
        };

        if !paginator.truncation_token.is_empty() {
            match lookup(response, paginator.truncation_token) {
                None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(None),
                Some(_) => {}
            }
        }

        let token = match lookup(response, paginator.output_token) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(s)) if s.is_empty() => return Ok(None),
            Some(token) => token.clone(),
        };

        if paginator.input_token.is_empty() {
            return Err(Error::Pagination(format!(
                "operation {} has no input token",
                self.operation.name
            )));
        }

        let mut params = serde_json::to_value(&self.params)?;
        assign(&mut params, paginator.input_token, token)?;

        let data = self.data.as_ref().map(|_| Output::new(O::default()));
        Ok(Some(Self::new(
            &self.service,
            self.operation,
            serde_json::from_value(params)?,
            data,
        )))
    }
}

/// Follow a dotted field path through nested objects
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.')
        .try_fold(value, |current, field| current.as_object()?.get(field))
}

/// Set a dotted field path, creating intermediate objects
fn assign(target: &mut Value, path: &str, value: Value) -> Result<()> {
    let mut current = target;
    let mut fields = path.split('.').peekable();

    while let Some(field) = fields.next() {
        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        let object = current.as_object_mut().ok_or_else(|| {
            Error::Pagination(format!("cannot set '{}': parent is not an object", path))
        })?;

        if fields.peek().is_none() {
            object.insert(field.to_string(), value);
            return Ok(());
        }
        current = object
            .entry(field.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockTransport;
    use crate::Paginator;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct ListInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        marker: Option<String>,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct ListOutput {
        #[serde(default)]
        items: Vec<String>,
        next_marker: Option<String>,
        #[serde(default)]
        is_truncated: bool,
    }

    static PAGED: Operation = Operation {
        name: "ListItems",
        http_method: "GET",
        http_path: "/items",
        paginator: Some(Paginator {
            input_token: "marker",
            output_token: "next_marker",
            limit_token: "max_items",
            truncation_token: "is_truncated",
        }),
    };

    static PLAIN: Operation = Operation {
        name: "GetItem",
        http_method: "",
        http_path: "",
        paginator: None,
    };

    fn service_returning(response: Value) -> Service {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .returning(move |_, _| Ok(response.clone()));
        Service::new("items", transport)
    }

    #[test]
    fn test_send_fills_output() {
        let service = service_returning(json!({ "items": ["a", "b"] }));
        let output = Output::new(ListOutput::default());
        let mut req = Request::new(&service, &PLAIN, ListInput::default(), Some(output.clone()));

        req.send().unwrap();
        assert_eq!(output.get().items, vec!["a", "b"]);
    }

    #[test]
    fn test_send_without_output() {
        let service = service_returning(json!({ "ignored": true }));
        let mut req: Request<ListInput, ()> =
            Request::new(&service, &PLAIN, ListInput::default(), None);

        assert!(req.send().is_ok());
        assert!(req.data().is_none());
    }

    #[test]
    fn test_send_propagates_transport_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_, _| Err(Error::transport("connection reset")));
        let service = Service::new("items", transport);
        let mut req: Request<ListInput, ListOutput> =
            Request::new(&service, &PAGED, ListInput::default(), Some(Output::default()));

        assert!(matches!(req.send(), Err(Error::Transport(_))));
        assert!(req.next_page().unwrap().is_none());
    }

    #[test]
    fn test_next_page_sets_input_token() {
        let service = service_returning(json!({
            "items": ["a"],
            "next_marker": "m1",
            "is_truncated": true
        }));
        let mut req: Request<ListInput, ListOutput> =
            Request::new(&service, &PAGED, ListInput::default(), Some(Output::default()));
        req.send().unwrap();

        let next = req.next_page().unwrap().expect("second page");
        assert_eq!(next.params().marker.as_deref(), Some("m1"));
        assert!(next.data().is_some());
    }

    #[test]
    fn test_next_page_stops_when_not_truncated() {
        let service = service_returning(json!({ "next_marker": "m1", "is_truncated": false }));
        let mut req: Request<ListInput, ListOutput> =
            Request::new(&service, &PAGED, ListInput::default(), Some(Output::default()));
        req.send().unwrap();

        assert!(req.next_page().unwrap().is_none());
    }

    #[test]
    fn test_next_page_stops_without_token() {
        let service = service_returning(json!({ "is_truncated": true, "next_marker": "" }));
        let mut req: Request<ListInput, ListOutput> =
            Request::new(&service, &PAGED, ListInput::default(), Some(Output::default()));
        req.send().unwrap();

        assert!(req.next_page().unwrap().is_none());
    }

    #[test]
    fn test_next_page_unpaginated() {
        let service = service_returning(json!({ "next_marker": "m1" }));
        let mut req: Request<ListInput, ListOutput> =
            Request::new(&service, &PLAIN, ListInput::default(), Some(Output::default()));
        req.send().unwrap();

        assert!(req.next_page().unwrap().is_none());
    }

    #[test]
    fn test_dotted_paths() {
        let response = json!({ "page": { "next": "t2" } });
        assert_eq!(lookup(&response, "page.next"), Some(&json!("t2")));
        assert_eq!(lookup(&response, "page.missing"), None);
        assert_eq!(lookup(&response, ""), None);

        let mut params = json!({ "filter": "x" });
        assign(&mut params, "paging.token", json!("t2")).unwrap();
        assert_eq!(params, json!({ "filter": "x", "paging": { "token": "t2" } }));

        let mut scalar = json!(3);
        assert!(assign(&mut scalar, "token", json!("t2")).is_err());
    }

    #[test]
    fn test_output_take_leaves_default() {
        let output = Output::new(vec![1, 2, 3]);
        let shared = output.clone();

        assert_eq!(shared.take(), vec![1, 2, 3]);
        assert!(output.get().is_empty());
    }
}
