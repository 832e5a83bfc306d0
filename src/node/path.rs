//! JSONPath-style locations
//!
//! - root is `$`
//! - identifier-safe keys append `.key`
//! - other keys append a bracketed JSON string, e.g. `["@context"]`
//! - array elements append `[i]`

use serde_json::Value;

/// Path of the document root
pub const ROOT: &str = "$";

/// Whether `key` matches `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Append a field segment to `path`
pub fn push_field(path: &mut String, key: &str) {
    if is_identifier(key) {
        path.push('.');
        path.push_str(key);
    } else {
        path.push('[');
        path.push_str(&Value::String(key.to_string()).to_string());
        path.push(']');
    }
}

/// Append an array index segment to `path`
pub fn push_index(path: &mut String, index: usize) {
    path.push('[');
    path.push_str(&index.to_string());
    path.push(']');
}

/// `base` extended by a field
pub fn field_path(base: &str, key: &str) -> String {
    let mut path = base.to_string();
    push_field(&mut path, key);
    path
}

/// `base` extended by a field and an array index
pub fn index_path(base: &str, key: &str, index: usize) -> String {
    let mut path = field_path(base, key);
    push_index(&mut path, index);
    path
}

/// `base` extended by a bracketed union of fields, e.g. `$["a","b"]`
pub fn union_path(base: &str, keys: &[String]) -> String {
    let quoted: Vec<String> = keys
        .iter()
        .map(|key| Value::String(key.clone()).to_string())
        .collect();
    format!("{}[{}]", base, quoted.join(","))
}
