//! API model loading for opgen
//!
//! This crate reads an API model document (JSON) into the operation data
//! model and resolves shape references to Rust type names.
//!
//! ## Model document
//!
//! ```json
//! {
//!   "API": { "ServiceName": "s3" },
//!   "Operations": [
//!     {
//!       "Name": "ListBuckets",
//!       "HTTP": { "Method": "GET", "RequestURI": "/" },
//!       "output": { "ShapeName": "ListBucketsOutput" }
//!     }
//!   ]
//! }
//! ```

mod model;
mod resolver;

pub use model::ApiModel;
pub use resolver::{ModuleResolver, ResolvedShape, ShapeResolver, Unresolved};

use opgen_common::Result;
use std::path::Path;
use tracing::warn;

/// Load an API model and resolve its shapes
///
/// Unknown shapes are logged and left unresolved; generation of the
/// operations that use them fails at the formatting step.
pub fn load_model(path: &Path, resolver: &dyn ShapeResolver) -> Result<ApiModel> {
    let mut model = ApiModel::from_file(path)?;
    let unresolved = model.resolve_shapes(resolver);
    if !unresolved.is_empty() {
        warn!(count = unresolved.len(), "model has unresolved shapes");
    }
    Ok(model)
}
