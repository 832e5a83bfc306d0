//! Start and end date ordering

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::errors::{
    ValidationError, ValidationErrorCategory, ValidationErrorSeverity, ValidationErrorType,
};
use crate::node::ModelNode;
use crate::rules::format::parse_date_time;
use crate::rules::{Capability, Rule, RuleContext, RuleMeta, RuleResult, TestDefinition};

/// Checks `startDate` is not after `endDate`
pub struct EndBeforeStartRule {
    meta: RuleMeta,
}

impl EndBeforeStartRule {
    pub fn new() -> Self {
        let meta = RuleMeta::new(
            "EndBeforeStartRule",
            "Validates that startDate is before the endDate of an Event.",
        )
        .with_capability(Capability::Model)
        .with_test(
            "default",
            TestDefinition::new(
                ValidationErrorCategory::DataQuality,
                ValidationErrorSeverity::Failure,
                ValidationErrorType::StartDateAfterEndDate,
                "The startDate of this \"{{model}}\" should be before its endDate.",
            ),
        );
        Self { meta }
    }
}

impl Default for EndBeforeStartRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Date-times compare as UTC; a bare date is its midnight
fn parse_instant(value: &Value) -> Option<NaiveDateTime> {
    let s = value.as_str()?;
    parse_date_time(s).or_else(|| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}

impl Rule for EndBeforeStartRule {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn validate_model(
        &self,
        node: &ModelNode<'_>,
        _ctx: &RuleContext<'_>,
    ) -> RuleResult<Vec<ValidationError>> {
        let start = node.get_value_with_inheritance("startDate").and_then(parse_instant);
        let end = node.get_value_with_inheritance("endDate").and_then(parse_instant);
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(Vec::new());
        };
        if start <= end {
            return Ok(Vec::new());
        }

        let key = node.key_for("startDate").unwrap_or("startDate");
        Ok(vec![self.meta.create_error(
            "default",
            node.get_value(key).cloned(),
            node.path_to(key),
            &[("model", node.model().type_name().unwrap_or("object"))],
        )?])
    }
}
