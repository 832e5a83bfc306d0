//! Zero duration detection

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::types::is_duration;
use crate::model::DataType;
use crate::node::ModelNode;
use crate::rules::format::typed_strings;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

/// Flags well-formed durations of zero length
pub struct NoZeroDurationRule {
    meta: RuleMeta,
}

impl NoZeroDurationRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "NoZeroDurationRule",
            "Validates that durations are not zero.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Warning,
                ValidationErrorType::NoZeroDuration,
                "Durations of zero length are not allowed. Please remove `{{field}}` or give it a length.",
            ),
        );
        Self { meta }
    }
}

impl Default for NoZeroDurationRule {
    fn default() -> Self {
        Self::new()
    }
}

fn is_zero_duration(s: &str) -> bool {
    is_duration(s) && s.chars().filter(char::is_ascii_digit).all(|c| c == '0')
}

impl Rule for NoZeroDurationRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        typed_strings(node, field, DataType::Duration)
            .into_iter()
            .filter(|(_, value)| is_zero_duration(value))
            .map(|(path, value)| {
                self.meta
                    .create_error("default", Some(value.into()), path, &[("field", field)])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{located, run};
    use serde_json::json;

    #[test]
    fn test_is_zero_duration() {
        assert!(is_zero_duration("PT0S"));
        assert!(is_zero_duration("P0D"));
        assert!(is_zero_duration("PT0H0M"));
        assert!(!is_zero_duration("PT0.5H"));
        assert!(!is_zero_duration("PT1H"));
        assert!(!is_zero_duration("zero"));
    }

    #[test]
    fn test_zero_duration_field() {
        let errors = run(NoZeroDurationRule::new(), json!({"type": "Event", "duration": "PT0M"}));
        assert_eq!(located(&errors), vec![("$.duration".to_string(), "no_zero_duration")]);
    }
}
