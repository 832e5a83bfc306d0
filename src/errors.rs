//! Validation findings
//!
//! Every check produces `ValidationError` records:
//! - category: conformance, data-quality or internal
//! - type: a stable snake_case tag
//! - severity: notice < suggestion < warning < failure
//! - a rendered message, the offending value and a JSONPath-style location
//!
//! Findings are plain data. A rule creates them, the orchestrator appends
//! them to the result list, and nothing mutates them afterwards.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Broad grouping of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCategory {
    /// The document does not conform to the specification
    Conformance,
    /// The document conforms but the data is likely wrong or unhelpful
    DataQuality,
    /// The validator itself could not complete a check
    Internal,
}

impl ValidationErrorCategory {
    /// Returns the string code
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorCategory::Conformance => "conformance",
            ValidationErrorCategory::DataQuality => "data-quality",
            ValidationErrorCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for ValidationErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ValidationErrorCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Severity ladder, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationErrorSeverity {
    /// Informational only
    Notice = 0,
    /// Worth considering
    Suggestion = 1,
    /// Advisory, likely a problem
    Warning = 2,
    /// Blocks conformance
    Failure = 3,
}

impl ValidationErrorSeverity {
    /// Returns the string code
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorSeverity::Notice => "notice",
            ValidationErrorSeverity::Suggestion => "suggestion",
            ValidationErrorSeverity::Warning => "warning",
            ValidationErrorSeverity::Failure => "failure",
        }
    }

    /// Only failures block conformance
    pub fn is_blocking(&self) -> bool {
        *self == ValidationErrorSeverity::Failure
    }
}

impl fmt::Display for ValidationErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ValidationErrorSeverity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Finding type tags
///
/// The set is open: rules plugged in from outside the crate use `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorType {
    // Structural
    /// Input is not a JSON object
    InvalidJson,

    // Schema shape
    /// No specification exists for the named type
    ModelNotFound,
    /// Property is not defined by the specification
    FieldNotInSpec,
    /// Property is explicitly disallowed on this model
    FieldNotAllowedInSpec,
    /// Property is a known misspelling
    FieldCouldBeTypo,
    /// Required property is missing
    MissingRequiredField,
    /// Recommended property is missing
    MissingRecommendedField,

    // Value shape
    /// Value has the wrong type
    InvalidType,
    /// Value has the right type but the wrong format
    InvalidFormat,
    /// Value is null or empty
    FieldIsEmpty,
    /// Value is not one of the allowed values
    FieldNotInDefinedValues,
    /// Value uses a form the validator cannot check
    UnsupportedValue,

    // Cross-field logic
    /// startDate is after endDate
    StartDateAfterEndDate,
    /// startDate and endDate given without duration
    DatesMustHaveDuration,
    /// Duration of zero length
    NoZeroDuration,
    /// minValue is greater than maxValue
    MinValueGreaterThanMaxValue,
    /// Concept has only one of id and inScheme
    ConceptIdAndInSchemeTogether,
    /// Activity is not in the referenced activity list
    ActivityNotInActivityList,

    // Informational
    /// Experimental or extension property that cannot be checked
    ExperimentalFieldsNotChecked,
    /// Property is documented only by the superclass vocabulary
    SchemaOrgFieldsNotChecked,
    /// An alias or namespaced form was used instead of the plain field
    UseFieldAliases,
    /// The document is a paginated feed envelope
    FoundRpdeFeed,
    /// Activity list lookups were disabled for this run
    ActivityListNotChecked,

    // Infrastructure
    /// A referenced resource could not be loaded
    FileNotFound,

    /// Tag defined by a rule outside this crate
    Custom(&'static str),
}

impl ValidationErrorType {
    /// Returns the string tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorType::InvalidJson => "invalid_json",
            ValidationErrorType::ModelNotFound => "model_not_found",
            ValidationErrorType::FieldNotInSpec => "field_not_in_spec",
            ValidationErrorType::FieldNotAllowedInSpec => "field_not_allowed_in_spec",
            ValidationErrorType::FieldCouldBeTypo => "field_could_be_typo",
            ValidationErrorType::MissingRequiredField => "missing_required_field",
            ValidationErrorType::MissingRecommendedField => "missing_recommended_field",
            ValidationErrorType::InvalidType => "invalid_type",
            ValidationErrorType::InvalidFormat => "invalid_format",
            ValidationErrorType::FieldIsEmpty => "field_is_empty",
            ValidationErrorType::FieldNotInDefinedValues => "field_not_in_defined_values",
            ValidationErrorType::UnsupportedValue => "unsupported_value",
            ValidationErrorType::StartDateAfterEndDate => "start_date_after_end_date",
            ValidationErrorType::DatesMustHaveDuration => "dates_must_have_duration",
            ValidationErrorType::NoZeroDuration => "no_zero_duration",
            ValidationErrorType::MinValueGreaterThanMaxValue => "min_value_greater_than_max_value",
            ValidationErrorType::ConceptIdAndInSchemeTogether => "concept_id_and_in_scheme_together",
            ValidationErrorType::ActivityNotInActivityList => "activity_not_in_activity_list",
            ValidationErrorType::ExperimentalFieldsNotChecked => "experimental_fields_not_checked",
            ValidationErrorType::SchemaOrgFieldsNotChecked => "schema_org_fields_not_checked",
            ValidationErrorType::UseFieldAliases => "use_field_aliases",
            ValidationErrorType::FoundRpdeFeed => "found_rpde_feed",
            ValidationErrorType::ActivityListNotChecked => "activity_list_not_checked",
            ValidationErrorType::FileNotFound => "file_not_found",
            ValidationErrorType::Custom(tag) => tag,
        }
    }

    /// Generic message used when a finding is built without a rule template
    pub fn default_message(&self) -> &'static str {
        match self {
            ValidationErrorType::InvalidJson => "The JSON fragment supplied is invalid.",
            ValidationErrorType::ModelNotFound => "Could not load definition for model.",
            ValidationErrorType::FieldNotInSpec => "This field is not defined in the specification.",
            ValidationErrorType::FieldNotAllowedInSpec => "This field is not allowed on this model.",
            ValidationErrorType::FieldCouldBeTypo => {
                "This field is not defined in the specification, but could be a typo."
            }
            ValidationErrorType::MissingRequiredField => "Required field is missing.",
            ValidationErrorType::MissingRecommendedField => "Recommended field is missing.",
            ValidationErrorType::InvalidType => "Field is an invalid type.",
            ValidationErrorType::InvalidFormat => "Field is not in the correct format.",
            ValidationErrorType::FieldIsEmpty => "Field is not allowed to be empty.",
            ValidationErrorType::FieldNotInDefinedValues => {
                "The value supplied is not in the allowed values for this field."
            }
            ValidationErrorType::UnsupportedValue => {
                "The value you have provided is not supported by the validator."
            }
            ValidationErrorType::StartDateAfterEndDate => "Start date is after the end date.",
            ValidationErrorType::DatesMustHaveDuration => {
                "A duration must be provided when a start date and end date are set."
            }
            ValidationErrorType::NoZeroDuration => "Zero durations are not allowed.",
            ValidationErrorType::MinValueGreaterThanMaxValue => {
                "minValue must not be greater than maxValue."
            }
            ValidationErrorType::ConceptIdAndInSchemeTogether => {
                "If one of 'id' or 'inScheme' is set on a Concept, the other should be set too."
            }
            ValidationErrorType::ActivityNotInActivityList => {
                "Activities should use values from the activity list."
            }
            ValidationErrorType::ExperimentalFieldsNotChecked => {
                "The validator does not currently check experimental fields."
            }
            ValidationErrorType::SchemaOrgFieldsNotChecked => {
                "This field is declared by the parent vocabulary and is not checked."
            }
            ValidationErrorType::UseFieldAliases => "Use the plain field name instead of an alias.",
            ValidationErrorType::FoundRpdeFeed => "The document is a paginated data feed.",
            ValidationErrorType::ActivityListNotChecked => "The activity list was not checked.",
            ValidationErrorType::FileNotFound => "Could not load file.",
            ValidationErrorType::Custom(_) => "Validation finding.",
        }
    }
}

impl fmt::Display for ValidationErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ValidationErrorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single, path-located finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Broad grouping
    pub category: ValidationErrorCategory,
    /// Stable type tag
    #[serde(rename = "type")]
    pub error_type: ValidationErrorType,
    /// Position on the severity ladder
    pub severity: ValidationErrorSeverity,
    /// Rendered message
    pub message: String,
    /// Offending value, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// JSONPath-style location
    pub path: String,
    /// Name of the rule that produced this finding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl ValidationError {
    /// Create a finding with the type's default message
    pub fn new(
        category: ValidationErrorCategory,
        error_type: ValidationErrorType,
        severity: ValidationErrorSeverity,
        path: impl Into<String>,
    ) -> Self {
        Self {
            category,
            error_type,
            severity,
            message: error_type.default_message().to_string(),
            value: None,
            path: path.into(),
            rule: None,
        }
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the offending value
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Record the emitting rule
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Finding for input that is not a JSON object
    pub fn invalid_json(severity: ValidationErrorSeverity, message: impl Into<String>) -> Self {
        Self::new(
            ValidationErrorCategory::Conformance,
            ValidationErrorType::InvalidJson,
            severity,
            crate::node::path::ROOT,
        )
        .with_message(message)
    }

    /// Whether this finding blocks conformance
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at {}: {}",
            self.severity, self.error_type, self.path, self.message
        )
    }
}
