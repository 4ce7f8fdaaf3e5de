//! Render plans
//!
//! A [`RenderPlan`] captures everything that varies between operations:
//! identifiers, literal values and which optional sections exist. The
//! template only substitutes plan fields and tests the optional ones.

use opgen_common::naming::{descriptor_name, method_name, pages_fn_name, request_fn_name};
use opgen_common::{Api, GeneratorConfig, Operation};
use serde::Serialize;

/// Typed request payload of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputPlan {
    pub type_name: String,
}

/// Typed response payload of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPlan {
    pub type_name: String,
    pub elem_type: String,
    /// Expression producing an empty `type_name` value
    ///
    /// A distinct element type is defaulted and converted, so
    /// `Box<Out>` over `Out` allocates `<Box<Out>>::from(<Out>::default())`.
    pub empty_value: String,
}

/// Paginator field names carried into the descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginatorPlan {
    pub input_token: String,
    pub output_token: String,
    pub limit_token: String,
    pub truncation_token: String,
}

/// Everything the operation template needs for one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub receiver: String,
    pub runtime: String,
    pub service_field: String,

    pub exported_name: String,
    /// Wire name stored in the descriptor
    pub name: String,
    pub request_fn: String,
    pub call_fn: String,
    pub pages_fn: String,
    pub descriptor: String,

    pub http_method: Option<String>,
    pub http_path: Option<String>,

    pub input: Option<InputPlan>,
    pub output: Option<OutputPlan>,
    /// Request input type, `()` without input
    pub input_type: String,
    /// Call result type, `()` without output
    pub output_type: String,
    /// Second value returned by the request builder
    pub container_type: String,

    pub paginator: Option<PaginatorPlan>,

    /// `///` block placed before the call, possibly empty
    pub docstring: String,
}

impl RenderPlan {
    /// Build the plan for one operation
    pub fn new(api: &Api, op: &Operation, config: &GeneratorConfig) -> Self {
        let runtime = config.runtime_crate.clone();

        let input = op.has_input().then(|| InputPlan {
            type_name: op.input_ref.type_name.clone(),
        });
        let output = op.has_output().then(|| {
            let type_name = op.output_ref.type_name.clone();
            let elem_type = op.output_ref.elem_type.clone();
            let empty_value = if elem_type.is_empty() || elem_type == type_name {
                format!("<{}>::default()", type_name)
            } else {
                format!("<{}>::from(<{}>::default())", type_name, elem_type)
            };
            OutputPlan {
                type_name,
                elem_type,
                empty_value,
            }
        });

        let input_type = input
            .as_ref()
            .map_or_else(|| "()".to_string(), |i| i.type_name.clone());
        let output_type = output
            .as_ref()
            .map_or_else(|| "()".to_string(), |o| o.type_name.clone());
        let container_type = match &output {
            Some(o) => format!("{}::Output<{}>", runtime, o.type_name),
            None => "()".to_string(),
        };

        let paginator = op.paginator.as_ref().map(|p| PaginatorPlan {
            input_token: p.input_token.clone(),
            output_token: p.output_token.clone(),
            limit_token: p.limit_key.clone(),
            truncation_token: p.more_results.clone(),
        });

        Self {
            receiver: api.struct_name(),
            runtime,
            service_field: config.service_field.clone(),
            exported_name: op.exported_name.clone(),
            name: op.name.clone(),
            request_fn: request_fn_name(&op.exported_name),
            pages_fn: pages_fn_name(&op.exported_name),
            call_fn: method_name(&op.exported_name),
            descriptor: descriptor_name(&op.exported_name),
            http_method: non_empty(&op.http.method),
            http_path: non_empty(&op.http.request_uri),
            input,
            output,
            input_type,
            output_type,
            container_type,
            paginator,
            docstring: op.docstring(),
        }
    }

    pub fn has_pages(&self) -> bool {
        self.paginator.is_some()
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opgen_common::{Paginator, ShapeRef};

    fn shape(name: &str) -> ShapeRef {
        let path = format!("types::{}", name);
        ShapeRef::resolved(name, &path, &path)
    }

    fn list_objects() -> Operation {
        let mut op = Operation::new("ListObjects");
        op.http.method = "GET".to_string();
        op.http.request_uri = "/{Bucket}".to_string();
        op.input_ref = shape("ListObjectsInput");
        op.output_ref = shape("ListObjectsOutput");
        op.paginator = Some(Paginator {
            input_token: "Marker".to_string(),
            output_token: "NextMarker".to_string(),
            limit_key: "MaxKeys".to_string(),
            more_results: "IsTruncated".to_string(),
        });
        op
    }

    #[test]
    fn test_plan_for_paginated_operation() {
        let config = GeneratorConfig::default();
        let plan = RenderPlan::new(&Api::new("s3"), &list_objects(), &config);

        assert_eq!(plan.receiver, "S3");
        assert_eq!(plan.request_fn, "list_objects_request");
        assert_eq!(plan.call_fn, "list_objects");
        assert_eq!(plan.pages_fn, "list_objects_pages");
        assert_eq!(plan.descriptor, "OP_LIST_OBJECTS");
        assert_eq!(plan.http_method.as_deref(), Some("GET"));
        assert_eq!(plan.http_path.as_deref(), Some("/{Bucket}"));
        assert_eq!(plan.input_type, "types::ListObjectsInput");
        assert_eq!(
            plan.container_type,
            "opgen_runtime::Output<types::ListObjectsOutput>"
        );
        assert!(plan.has_pages());
        assert_eq!(plan.paginator.unwrap().truncation_token, "IsTruncated");
    }

    #[test]
    fn test_plan_without_payloads() {
        let op = Operation::new("Ping");
        let plan = RenderPlan::new(&Api::new("health"), &op, &GeneratorConfig::default());

        assert!(plan.input.is_none());
        assert!(plan.output.is_none());
        assert_eq!(plan.input_type, "()");
        assert_eq!(plan.output_type, "()");
        assert_eq!(plan.container_type, "()");
        assert!(plan.http_method.is_none());
        assert!(plan.http_path.is_none());
        assert!(!plan.has_pages());
        assert_eq!(plan.docstring, "");
    }

    #[test]
    fn test_plan_for_keyword_name() {
        let op = Operation::new("Move");
        let plan = RenderPlan::new(&Api::new("files"), &op, &GeneratorConfig::default());

        assert_eq!(plan.call_fn, "r#move");
        assert_eq!(plan.request_fn, "move_request");
        assert_eq!(plan.descriptor, "OP_MOVE");
    }

    #[test]
    fn test_output_allocated_as_signature_type() {
        let mut op = Operation::new("GetObject");
        op.output_ref = ShapeRef::resolved("GetObjectOutput", "Box<Out>", "Out");
        let plan = RenderPlan::new(&Api::new("s3"), &op, &GeneratorConfig::default());

        let output = plan.output.unwrap();
        assert_eq!(plan.output_type, "Box<Out>");
        assert_eq!(output.empty_value, "<Box<Out>>::from(<Out>::default())");

        let plan = RenderPlan::new(&Api::new("s3"), &list_objects(), &GeneratorConfig::default());
        assert_eq!(
            plan.output.unwrap().empty_value,
            "<types::ListObjectsOutput>::default()"
        );
    }
}
