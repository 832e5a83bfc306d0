//! ISO 8601 date format check

use chrono::NaiveDate;

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::model::DataType;
use crate::node::ModelNode;
use crate::rules::{
    Capability, Rule, RuleContext, RuleMeta, RuleResult, TargetFields, TestDefinition,
};

use super::typed_strings;

pub struct DateFormatRule {
    meta: RuleMeta,
}

impl DateFormatRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "DateFormatRule",
            "Validates that Date fields are in the correct format.",
        )
        .with_capability(Capability::Field)
        .targeting_fields(TargetFields::All)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::Conformance,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::InvalidFormat,
                "Dates should be expressed as ISO 8601 dates. For example, 2018-08-01.",
            ),
        );
        Self { meta }
    }
}

impl Default for DateFormatRule {
    fn default() -> Self {
        Self::new()
    }
}

/// `YYYY-MM-DD`, or the basic `YYYYMMDD` form
pub(crate) fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || (s.len() == 8 && NaiveDate::parse_from_str(s, "%Y%m%d").is_ok())
}

impl Rule for DateFormatRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_field(
        &self,
        node: &ModelNode<'_>,
        field: &str,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        typed_strings(node, field, DataType::Date)
            .into_iter()
            .filter(|(_, value)| !is_date(value))
            .map(|(path, value)| {
                self.meta
                    .create_error("default", Some(value.into()), path, &[])
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
    fn test_is_date() {
        assert!(is_date("2018-08-01"));
        assert!(is_date("20180801"));
        assert!(!is_date("2018-02-30"));
        assert!(!is_date("01/08/2018"));
        assert!(!is_date("2018-08-01T10:00:00Z"));
    }

    #[test]
    fn test_date_fields() {
        let errors = run(
            DateFormatRule::new(),
            json!({
                "type": "Event",
                "eventSchedule": [
                    {"type": "Schedule", "startDate": "2018-08-01"},
                    {"type": "Schedule", "startDate": "1st August"}
                ]
            }),
        );
        assert_eq!(
            located(&errors),
            vec![("$.eventSchedule[1].startDate".to_string(), "invalid_format")]
        );
        assert_eq!(errors[0].value, Some(json!("1st August")));
    }

    #[test]
    fn test_other_types_are_ignored() {
        let errors = run(DateFormatRule::new(), json!({"type": "Event", "startDate": "1st August"}));
        assert!(errors.is_empty());
    }
}
