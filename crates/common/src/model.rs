//! Operation data model
//!
//! One [`Operation`] is built per API operation by the model loader and stays
//! immutable while it is rendered.

use serde::{Deserialize, Serialize};

use crate::docstring::docstring;

/// The service an operation belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Api {
    /// Service identifier (e.g., "s3", "config-service")
    pub service_name: String,

    /// Explicit receiver type name; derived from `service_name` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub struct_name: Option<String>,
}

impl Api {
    /// Create an API with a derived receiver name
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            struct_name: None,
        }
    }

    /// Receiver type the generated methods are attached to
    ///
    /// # Examples
    /// ```
    /// use opgen_common::Api;
    ///
    /// assert_eq!(Api::new("s3").struct_name(), "S3");
    /// assert_eq!(Api::new("config-service").struct_name(), "ConfigService");
    /// ```
    pub fn struct_name(&self) -> String {
        match &self.struct_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => to_upper_camel(&self.service_name),
        }
    }
}

/// HTTP binding of an operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpInfo {
    /// HTTP verb; empty means the transport default
    #[serde(default)]
    pub method: String,

    /// Path template; empty means none
    #[serde(default, rename = "RequestURI")]
    pub request_uri: String,

    /// Expected success status (informational only)
    #[serde(default)]
    pub response_code: u16,
}

/// Reference from an operation to its input or output shape
///
/// `type_name` and `elem_type` are filled in by a shape resolver. An empty
/// `shape_name` means the operation has no such payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShapeRef {
    #[serde(default)]
    pub shape_name: String,

    /// Type as written in signatures
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub type_name: String,

    /// Underlying value type, used to allocate an empty value
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub elem_type: String,
}

impl ShapeRef {
    /// Reference to a shape whose type names are not resolved yet
    pub fn named(shape_name: &str) -> Self {
        Self {
            shape_name: shape_name.to_string(),
            ..Default::default()
        }
    }

    /// Reference with both derived type names already known
    pub fn resolved(shape_name: &str, type_name: &str, elem_type: &str) -> Self {
        Self {
            shape_name: shape_name.to_string(),
            type_name: type_name.to_string(),
            elem_type: elem_type.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shape_name.is_empty()
    }

    pub fn is_resolved(&self) -> bool {
        !self.type_name.is_empty() && !self.elem_type.is_empty()
    }
}

/// Pagination metadata of a paged operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paginator {
    /// Request field carrying the next-page token
    #[serde(default)]
    pub input_token: String,

    /// Response field carrying the next-page token
    #[serde(default)]
    pub output_token: String,

    /// Request field bounding the page size
    #[serde(default)]
    pub limit_key: String,

    /// Response field signalling more pages
    #[serde(default)]
    pub more_results: String,
}

/// One named remote action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Operation {
    /// Public identifier, unique within its API
    #[serde(default)]
    pub exported_name: String,

    /// Wire-level operation name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub documentation: String,

    #[serde(default, rename = "HTTP")]
    pub http: HttpInfo,

    #[serde(default, rename = "input")]
    pub input_ref: ShapeRef,

    #[serde(default, rename = "output")]
    pub output_ref: ShapeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paginator: Option<Paginator>,
}

impl Operation {
    /// Create an operation whose exported and wire names are the same
    pub fn new(name: &str) -> Self {
        Self {
            exported_name: name.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn has_input(&self) -> bool {
        !self.input_ref.is_empty()
    }

    pub fn has_output(&self) -> bool {
        !self.output_ref.is_empty()
    }

    pub fn is_paginated(&self) -> bool {
        self.paginator.is_some()
    }

    /// Documentation as a `///` comment block, or an empty string
    pub fn docstring(&self) -> String {
        if self.documentation.is_empty() {
            return String::new();
        }
        docstring(&self.documentation)
    }
}

fn to_upper_camel(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
