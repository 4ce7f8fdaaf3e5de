//! Shape reference resolution
//!
//! Maps shape names from the API model to the Rust type names generated
//! code refers to.

use opgen_common::ShapeRef;

/// Type names derived for one shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShape {
    /// Type as written in signatures
    pub type_name: String,
    /// Underlying value type, used to allocate an empty value
    pub elem_type: String,
}

/// Resolves shape names to Rust type names
pub trait ShapeResolver {
    /// Type names for a shape, or `None` when the shape cannot be resolved
    fn resolve(&self, shape_name: &str) -> Option<ResolvedShape>;

    /// Fill in the type names of a reference that has none yet
    ///
    /// Returns `false` when the reference names a shape this resolver does
    /// not know; the reference is left unresolved.
    fn resolve_ref(&self, shape_ref: &mut ShapeRef) -> bool {
        if shape_ref.is_empty() || shape_ref.is_resolved() {
            return true;
        }
        match self.resolve(&shape_ref.shape_name) {
            Some(resolved) => {
                shape_ref.type_name = resolved.type_name;
                shape_ref.elem_type = resolved.elem_type;
                true
            }
            None => false,
        }
    }
}

/// Resolves every shape to a type of the same name inside one module
///
/// Namespaced shape ids (`com.example#ListBucketsOutput`) resolve by their
/// local name.
///
/// # Examples
/// ```
/// use opgen_parser::{ModuleResolver, ShapeResolver};
///
/// let resolver = ModuleResolver::new("crate::types");
/// let resolved = resolver.resolve("com.amazonaws.s3#ListBucketsOutput").unwrap();
/// assert_eq!(resolved.type_name, "crate::types::ListBucketsOutput");
/// assert!(resolver.resolve("not a type").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    module: String,
}

impl ModuleResolver {
    pub fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
        }
    }
}

impl ShapeResolver for ModuleResolver {
    fn resolve(&self, shape_name: &str) -> Option<ResolvedShape> {
        let local = shape_name.rsplit('#').next().unwrap_or(shape_name);
        if !is_type_ident(local) {
            return None;
        }

        let path = if self.module.is_empty() {
            local.to_string()
        } else {
            format!("{}::{}", self.module, local)
        };
        Some(ResolvedShape {
            type_name: path.clone(),
            elem_type: path,
        })
    }
}

/// Resolves nothing; every named reference stays unresolved
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolved;

impl ShapeResolver for Unresolved {
    fn resolve(&self, _shape_name: &str) -> Option<ResolvedShape> {
        None
    }
}

fn is_type_ident(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
