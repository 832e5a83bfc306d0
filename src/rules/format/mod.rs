//! Format rules for string datatypes
//!
//! Each rule fires only when the field's flattened type set is exactly its
//! datatype. Strings are checked individually, also inside arrays; values of
//! any other shape are left to `FieldsCorrectTypeRule`.

mod date;
mod datetime;
mod duration;
mod time;

use serde_json::Value;

use crate::model::{DataType, SemanticType};
use crate::node::ModelNode;

pub use date::DateFormatRule;
pub use datetime::DateTimeFormatRule;
pub use duration::DurationFormatRule;
pub use time::TimeFormatRule;

pub(crate) use datetime::parse_date_time;

/// `(path, string)` of every string under `field` when its only type is `data_type`
pub(crate) fn typed_strings<'a>(
    node: &ModelNode<'a>,
    field: &str,
    data_type: DataType,
) -> Vec<(String, &'a str)> {
    let only_type = node
        .field_for(field)
        .is_some_and(|definition| definition.is_only_type(&SemanticType::Data(data_type)));
    if !only_type {
        return Vec::new();
    }

    match node.get_value(field) {
        Some(Value::String(s)) => vec![(node.path_to(field), s.as_str())],
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| item.as_str().map(|s| (node.path_to_index(field, i), s)))
            .collect(),
        _ => Vec::new(),
    }
}
