//! API model document loading

use crate::resolver::ShapeResolver;
use opgen_common::naming::{generated_names, has_method_name};
use opgen_common::{Api, GeneratorError, Operation, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Operations given either as a list or keyed by name
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OperationSet {
    List(Vec<Operation>),
    Named(BTreeMap<String, Operation>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ModelDocument {
    #[serde(rename = "API")]
    api: Api,
    operations: OperationSet,
}

/// A loaded API with its operations in model order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiModel {
    pub api: Api,
    pub operations: Vec<Operation>,
}

impl ApiModel {
    /// Load an API model from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read model file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate an API model from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ModelDocument = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse model JSON: {}", e)))?;

        let operations = match document.operations {
            OperationSet::List(ops) => ops,
            OperationSet::Named(ops) => ops
                .into_iter()
                .map(|(key, mut op)| {
                    if op.name.is_empty() {
                        op.name = key;
                    }
                    op
                })
                .collect(),
        };

        let mut model = Self {
            api: document.api,
            operations,
        };
        model.normalize()?;
        debug!(
            service = %model.api.service_name,
            operations = model.operations.len(),
            "loaded api model"
        );
        Ok(model)
    }

    /// Fill defaults and enforce the model invariants the generator relies on
    fn normalize(&mut self) -> Result<()> {
        if self.api.service_name.is_empty() {
            return Err(GeneratorError::Parse(
                "API model has no ServiceName".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut items: HashMap<String, String> = HashMap::new();
        for op in &mut self.operations {
            if op.name.is_empty() {
                return Err(GeneratorError::Parse(
                    "Operation without a Name".to_string(),
                ));
            }
            if op.exported_name.is_empty() {
                op.exported_name = op.name.clone();
            }
            if !is_identifier(&op.exported_name) || !has_method_name(&op.exported_name) {
                return Err(GeneratorError::Parse(format!(
                    "Operation {} has an invalid exported name '{}'",
                    op.name, op.exported_name
                )));
            }
            if !seen.insert(op.exported_name.clone()) {
                return Err(GeneratorError::Parse(format!(
                    "Duplicate operation {}",
                    op.exported_name
                )));
            }
            if op.is_paginated() && !(op.has_input() && op.has_output()) {
                return Err(GeneratorError::Parse(format!(
                    "Paginated operation {} needs both input and output shapes",
                    op.exported_name
                )));
            }

            for item in generated_names(&op.exported_name, op.is_paginated()) {
                if let Some(owner) = items.get(&item) {
                    return Err(GeneratorError::Parse(format!(
                        "Operations {} and {} both generate '{}'",
                        owner, op.exported_name, item
                    )));
                }
                items.insert(item, op.exported_name.clone());
            }
        }
        Ok(())
    }

    /// Resolve every shape reference; returns the names of unknown shapes
    pub fn resolve_shapes(&mut self, resolver: &dyn ShapeResolver) -> Vec<String> {
        let mut unresolved = Vec::new();
        for op in &mut self.operations {
            for shape_ref in [&mut op.input_ref, &mut op.output_ref] {
                if !resolver.resolve_ref(shape_ref) {
                    warn!(
                        operation = %op.exported_name,
                        shape = %shape_ref.shape_name,
                        "unresolved shape reference"
                    );
                    unresolved.push(shape_ref.shape_name.clone());
                }
            }
        }
        unresolved
    }

    /// Look up an operation by exported name
    pub fn operation(&self, exported_name: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.exported_name == exported_name)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
