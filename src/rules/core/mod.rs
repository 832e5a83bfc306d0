//! Structural and schema conformance rules

mod context_in_root;
mod fields_correct_type;
mod fields_not_in_model;
mod no_empty_values;
mod no_prefix_or_namespace;
mod recommended_fields;
mod required_fields;
mod required_optional_fields;
mod valid_model_type;
mod value_in_options;

pub use context_in_root::ContextInRootNodeRule;
pub use fields_correct_type::FieldsCorrectTypeRule;
pub use fields_not_in_model::FieldsNotInModelRule;
pub use no_empty_values::NoEmptyValuesRule;
pub use no_prefix_or_namespace::NoPrefixOrNamespaceRule;
pub use recommended_fields::RecommendedFieldsRule;
pub use required_fields::RequiredFieldsRule;
pub use required_optional_fields::RequiredOptionalFieldsRule;
pub use valid_model_type::ValidModelTypeRule;
pub use value_in_options::ValueInOptionsRule;
