//! Doc comment formatting

use textwrap::{wrap, Options as WrapOptions};

/// Column at which documentation lines are wrapped (excluding the prefix)
const WRAP_WIDTH: usize = 76;

/// Format free text as a block of `///` lines
///
/// Each source line is wrapped at word boundaries and otherwise kept as
/// written, indentation included; blank lines are kept as empty `///`
/// lines. The result ends with a newline, or is empty when the text has no
/// visible content.
///
/// # Examples
/// ```
/// use opgen_common::docstring;
///
/// assert_eq!(docstring("Deletes a bucket."), "/// Deletes a bucket.\n");
/// assert_eq!(docstring("   "), "");
/// ```
pub fn docstring(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let options = WrapOptions::new(WRAP_WIDTH).break_words(false);
    let mut out = String::new();
    for line in text.trim_end().lines().skip_while(|l| l.trim().is_empty()) {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str("///\n");
            continue;
        }
        for wrapped in wrap(line, &options) {
            out.push_str("/// ");
            out.push_str(&wrapped);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_long_lines() {
        let text = "word ".repeat(40);
        let doc = docstring(&text);

        assert!(doc.lines().count() > 1);
        for line in doc.lines() {
            assert!(line.starts_with("/// "));
            assert!(line.len() <= WRAP_WIDTH + 4);
        }
    }

    #[test]
    fn test_keeps_paragraphs() {
        let doc = docstring("First paragraph.\n\nSecond paragraph.");
        assert_eq!(doc, "/// First paragraph.\n///\n/// Second paragraph.\n");
    }

    #[test]
    fn test_long_word_on_own_line() {
        let long = "x".repeat(100);
        let doc = docstring(&format!("see {}", long));
        assert_eq!(doc, format!("/// see\n/// {}\n", long));
    }

    #[test]
    fn test_keeps_indentation_and_spacing() {
        let doc = docstring("Example:\n    indented   code");
        assert_eq!(doc, "/// Example:\n///     indented   code\n");
    }

    #[test]
    fn test_surrounding_blank_lines_dropped() {
        assert_eq!(docstring("\n\nDeletes a bucket.\n\n"), "/// Deletes a bucket.\n");
    }
}
