//! Source validation and formatting
//!
//! Rendered text is parsed with `syn` and printed back with `prettyplease`.
//! Text that does not parse is never emitted: the error carries the
//! rendered source so the template/model mismatch can be found.

use opgen_common::{GeneratorError, Result};
use tracing::warn;

/// Validate and canonically format Rust source
///
/// Returns the formatted text without leading or trailing blank lines.
///
/// # Examples
/// ```
/// use opgen_generator::format_source;
///
/// let formatted = format_source("fn  main( ){ }").unwrap();
/// assert_eq!(formatted, "fn main() {}");
/// assert!(format_source("fn main(").is_err());
/// ```
pub fn format_source(source: &str) -> Result<String> {
    let file = syn::parse_file(source).map_err(|e| {
        warn!(error = %e, "rendered source failed to parse");
        GeneratorError::Format {
            message: e.to_string(),
            source_text: source.to_string(),
        }
    })?;

    Ok(prettyplease::unparse(&file).trim().to_string())
}
