//! Identifier conversion for generated items

/// Words that cannot be used as plain identifiers
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Convert PascalCase to snake_case
///
/// # Examples
/// ```
/// use opgen_common::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("ListBuckets"), "list_buckets");
/// assert_eq!(to_snake_case("GetHTTPEndpoint"), "get_http_endpoint");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            // Split before an uppercase letter that follows a lowercase letter or digit,
            // or that starts a new word after an acronym (HTTPServer -> http_server)
            let boundary = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));

            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else if ch == '-' || ch == ' ' || ch == '.' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(ch);
        }
    }

    while result.contains("__") {
        result = result.replace("__", "_");
    }

    result.trim_matches('_').to_string()
}

/// Convert PascalCase to SCREAMING_SNAKE_CASE
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Keywords that are not accepted as raw identifiers either
const NON_RAW: &[&str] = &["crate", "self", "super"];

/// Method name for an operation, escaped when it collides with a keyword
pub fn method_name(exported_name: &str) -> String {
    let name = to_snake_case(exported_name);
    if NON_RAW.contains(&name.as_str()) {
        format!("{}_", name)
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("r#{}", name)
    } else {
        name
    }
}

/// Name of the request builder of an operation
pub fn request_fn_name(exported_name: &str) -> String {
    format!("{}_request", to_snake_case(exported_name))
}

/// Name of the page stream function of a paginated operation
pub fn pages_fn_name(exported_name: &str) -> String {
    format!("{}_pages", to_snake_case(exported_name))
}

/// Name of the process-wide descriptor static of an operation
pub fn descriptor_name(exported_name: &str) -> String {
    format!("OP_{}", to_screaming_snake_case(exported_name))
}

/// Every item name generated for an operation
///
/// Methods come first, the descriptor static last. The page stream is only
/// included for paginated operations.
pub fn generated_names(exported_name: &str, paginated: bool) -> Vec<String> {
    let mut names = vec![method_name(exported_name), request_fn_name(exported_name)];
    if paginated {
        names.push(pages_fn_name(exported_name));
    }
    names.push(descriptor_name(exported_name));
    names
}

/// Whether an exported name maps to a usable method name
///
/// The snake_case form must be non-empty and start with a letter; names
/// such as `_` or `_2Fast` do not.
pub fn has_method_name(exported_name: &str) -> bool {
    to_snake_case(exported_name)
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}
