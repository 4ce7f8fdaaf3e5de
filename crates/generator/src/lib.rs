//! Client operation code generation
//!
//! This crate turns one [`Operation`] of an API model into Rust source for a
//! generated client:
//! - a request builder that lazily creates the shared operation descriptor
//! - a synchronous call that sends the request
//! - a page stream for paginated operations
//! - the descriptor `static` itself
//!
//! Rendering goes through a [`RenderPlan`] and a Tera template; the result is
//! validated and formatted by [`format_source`], which rejects any text that
//! is not valid Rust.

mod format;
mod plan;
mod templates;

pub use format::format_source;
pub use opgen_common::naming;
pub use plan::{InputPlan, OutputPlan, PaginatorPlan, RenderPlan};

use opgen_common::{Api, GeneratorConfig, GeneratorError, Operation, Result};
use std::fs;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Notice placed at the top of aggregated files
const HEADER: &str = "// Code generated by opgen. DO NOT EDIT.";

/// Operation generator
///
/// Holds the loaded template and configuration; one instance can render any
/// number of operations, from any number of threads.
pub struct OperationGenerator {
    config: GeneratorConfig,
    tera: Tera,
}

impl OperationGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let tera = templates::load_templates()?;
        Ok(Self { config, tera })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the render plan for an operation
    pub fn plan(&self, api: &Api, op: &Operation) -> RenderPlan {
        RenderPlan::new(api, op, &self.config)
    }

    /// Render an operation to unformatted source text
    pub fn render(&self, api: &Api, op: &Operation) -> Result<String> {
        let plan = self.plan(api, op);
        let mut context = tera::Context::new();
        context.insert("plan", &plan);

        self.tera
            .render(templates::OPERATION, &context)
            .map_err(|e| {
                GeneratorError::Template(format!(
                    "Failed to render operation {}: {:?}",
                    op.exported_name, e
                ))
            })
    }

    /// Render and format one operation
    pub fn generate(&self, api: &Api, op: &Operation) -> Result<String> {
        let rendered = self.render(api, op)?;
        debug!(
            operation = %op.exported_name,
            paginated = op.is_paginated(),
            "rendered operation"
        );
        format_source(&rendered)
    }

    /// Generate all operations of an API as one source file
    ///
    /// Operations keep their model order. Any operation that fails to render
    /// or format fails the whole file.
    pub fn generate_api(&self, api: &Api, operations: &[Operation]) -> Result<String> {
        let mut rendered = String::new();
        for op in operations {
            rendered.push_str(&self.render(api, op)?);
            rendered.push_str("\n\n");
        }

        let formatted = format_source(&rendered)?;
        debug!(
            service = %api.service_name,
            operations = operations.len(),
            "generated api operations"
        );

        if self.config.header {
            Ok(format!("{}\n\n{}", HEADER, formatted))
        } else {
            Ok(formatted)
        }
    }

    /// Generate all operations of an API into a file
    pub fn generate_to_file(&self, api: &Api, operations: &[Operation], path: &Path) -> Result<()> {
        let source = self.generate_api(api, operations)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                GeneratorError::Generation(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(path, source + "\n").map_err(|e| {
            GeneratorError::Generation(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

/// Generate one operation with the default configuration (convenience function)
pub fn generate_operation(api: &Api, op: &Operation) -> Result<String> {
    let generator = OperationGenerator::new(GeneratorConfig::default())?;
    generator.generate(api, op)
}
