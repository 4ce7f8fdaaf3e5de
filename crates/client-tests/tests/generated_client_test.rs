//! The build-time generated S3 client, driven against a scripted transport

use opgen_client_tests::{types, S3};
use opgen_runtime::{Error, Operation, Result, Service};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn bucket_service() -> Service {
    Service::new("s3", |op: &Operation, params: &Value| -> Result<Value> {
        match (op.name, params.get("Marker").and_then(Value::as_str)) {
            ("ListObjects", None) => Ok(json!({
                "Keys": ["a", "b"],
                "NextMarker": "b",
                "IsTruncated": true
            })),
            ("ListObjects", Some("b")) => Ok(json!({ "Keys": ["c"], "IsTruncated": false })),
            ("DeleteBucket", _) if params["Bucket"] == "missing" => {
                Err(Error::transport("NoSuchBucket"))
            }
            ("DeleteBucket", _) | ("Ping", _) => Ok(Value::Null),
            (name, marker) => Err(Error::transport(format!("unexpected {} {:?}", name, marker))),
        }
    })
}

fn client() -> S3 {
    S3::new(bucket_service())
}

fn list_input() -> types::ListObjectsInput {
    types::ListObjectsInput {
        bucket: "photos".to_string(),
        marker: None,
    }
}

#[test]
fn test_synchronous_call_returns_output() {
    let output = client().list_objects(list_input()).unwrap();
    assert_eq!(output.keys, vec!["a", "b"]);
}

#[test]
fn test_synchronous_call_surfaces_errors() {
    let s3 = client();
    let missing = types::DeleteBucketInput {
        bucket: "missing".to_string(),
    };
    assert!(matches!(s3.delete_bucket(missing), Err(Error::Transport(_))));

    let present = types::DeleteBucketInput {
        bucket: "photos".to_string(),
    };
    assert!(s3.delete_bucket(present).is_ok());
    assert!(s3.ping().is_ok());
}

#[test]
fn test_descriptor_is_built_once() {
    let s3 = client();
    let (first, _) = s3.list_objects_request(list_input());
    let (second, _) = s3.list_objects_request(list_input());

    assert!(std::ptr::eq(first.operation(), second.operation()));
    assert_eq!(first.operation().http_path, "/{Bucket}");
}

#[test]
fn test_descriptor_concurrent_first_use() {
    let s3 = Arc::new(client());
    let seen = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let s3 = Arc::clone(&s3);
            let seen = Arc::clone(&seen);
            std::thread::spawn(move || {
                let (request, _) = s3.ping_request();
                seen.fetch_add(1, Ordering::SeqCst);
                request.operation() as *const Operation as usize
            })
        })
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(seen.load(Ordering::SeqCst), 8);
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_pages_stream_in_order() {
    let keys: Vec<String> = client()
        .list_objects_pages(list_input())
        .flat_map(|page| page.unwrap().keys)
        .collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn test_builder_output_handle_is_shared() {
    let s3 = client();
    let (mut request, output) = s3.list_objects_request(list_input());
    assert!(output.get().keys.is_empty());

    request.send().unwrap();
    assert_eq!(output.get().keys, vec!["a", "b"]);
}
