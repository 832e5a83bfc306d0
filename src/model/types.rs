//! Semantic types and structural type detection
//!
//! Definitions name permitted types as strings:
//! - a datatype IRI such as `https://schema.org/Text`
//! - a model reference such as `#Place`
//! - either of those prefixed by `ArrayOf`, e.g. `ArrayOf#Concept`
//!
//! Detection classifies a raw JSON value by shape alone, independent of any
//! declared type.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::SpecError;

/// Namespace of the built-in datatypes
pub const SCHEMA_ORG: &str = "https://schema.org/";

const ARRAY_OF: &str = "ArrayOf";

static DATE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-?\d{4,}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])T([01]\d|2[0-3]):[0-5]\d(:[0-5]\d(\.\d+)?)?(Z|[+-]([01]\d|2[0-3]):?[0-5]\d)?$",
    )
    .expect("date-time pattern")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d{4,}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("date pattern")
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d(\.\d+)?)?(Z|[+-]([01]\d|2[0-3]):?[0-5]\d)?$")
        .expect("time pattern")
});

/// Full ISO-8601 duration grammar: `PnYnMnDTnHnMnS` with only the smallest
/// present unit allowed a fraction, or `PnW`
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^P(",
        r"(([0-9]+Y)?([0-9]+M)?([0-9]+D)?T([0-9]+H)?([0-9]+M)?([0-9]+([,.][0-9]+)?S)",
        r"|([0-9]+Y)?([0-9]+M)?([0-9]+D)?T([0-9]+H)?([0-9]+([,.][0-9]+)?M)",
        r"|([0-9]+Y)?([0-9]+M)?([0-9]+D)?T([0-9]+([,.][0-9]+)?H)",
        r"|([0-9]+Y)?([0-9]+M)?([0-9]+([,.][0-9]+)?D)",
        r"|([0-9]+Y)?([0-9]+([,.][0-9]+)?M)",
        r"|([0-9]+([,.][0-9]+)?Y))",
        r"|([0-9]+W)",
        r")$"
    ))
    .expect("duration pattern")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url pattern"));

/// Whether `s` matches the ISO-8601 duration grammar
pub fn is_duration(s: &str) -> bool {
    DURATION_RE.is_match(s)
}

/// Whether `s` looks like an ISO-8601 time of day
pub fn is_time(s: &str) -> bool {
    TIME_RE.is_match(s)
}

/// Built-in datatypes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Text,
    Url,
    Boolean,
    Integer,
    Float,
    Number,
    Date,
    DateTime,
    Time,
    Duration,
    /// Any other datatype IRI; accepts any scalar
    Other(String),
}

impl DataType {
    /// Parse a datatype IRI (`https://`, `http://` or `schema:` forms)
    pub fn from_iri(iri: &str) -> Self {
        let local = iri
            .strip_prefix("https://schema.org/")
            .or_else(|| iri.strip_prefix("http://schema.org/"))
            .or_else(|| iri.strip_prefix("schema:"));

        match local {
            Some("Text") => DataType::Text,
            Some("URL") => DataType::Url,
            Some("Boolean") => DataType::Boolean,
            Some("Integer") => DataType::Integer,
            Some("Float") => DataType::Float,
            Some("Number") => DataType::Number,
            Some("Date") => DataType::Date,
            Some("DateTime") => DataType::DateTime,
            Some("Time") => DataType::Time,
            Some("Duration") => DataType::Duration,
            _ => DataType::Other(iri.to_string()),
        }
    }

    /// Canonical IRI
    pub fn iri(&self) -> String {
        match self {
            DataType::Other(iri) => iri.clone(),
            known => format!("{}{}", SCHEMA_ORG, known.local_name()),
        }
    }

    fn local_name(&self) -> &str {
        match self {
            DataType::Text => "Text",
            DataType::Url => "URL",
            DataType::Boolean => "Boolean",
            DataType::Integer => "Integer",
            DataType::Float => "Float",
            DataType::Number => "Number",
            DataType::Date => "Date",
            DataType::DateTime => "DateTime",
            DataType::Time => "Time",
            DataType::Duration => "Duration",
            DataType::Other(iri) => iri,
        }
    }

    /// Whether a scalar of the detected type is acceptable
    ///
    /// Temporal types accept any string: the format rules judge the content.
    pub fn accepts(&self, detected: &DetectedType) -> bool {
        let is_string = detected.is_string();
        match self {
            DataType::Text
            | DataType::Date
            | DataType::DateTime
            | DataType::Time
            | DataType::Duration => is_string,
            DataType::Url => *detected == DetectedType::Url,
            DataType::Boolean => *detected == DetectedType::Boolean,
            DataType::Integer => *detected == DetectedType::Integer,
            DataType::Float | DataType::Number => {
                matches!(detected, DetectedType::Integer | DetectedType::Float)
            }
            DataType::Other(_) => {
                is_string
                    || matches!(
                        detected,
                        DetectedType::Boolean | DetectedType::Integer | DetectedType::Float
                    )
            }
        }
    }
}

/// A permitted type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SemanticType {
    /// A datatype
    Data(DataType),
    /// A reference to another model by name
    Model(String),
    /// An array whose elements have the inner type
    ArrayOf(Box<SemanticType>),
}

impl SemanticType {
    /// The type with every array wrapper removed
    pub fn element(&self) -> &SemanticType {
        match self {
            SemanticType::ArrayOf(inner) => inner.element(),
            other => other,
        }
    }

    /// Whether this is an array type
    pub fn is_array(&self) -> bool {
        matches!(self, SemanticType::ArrayOf(_))
    }

    /// Model name of the element type, if it references a model
    pub fn model_name(&self) -> Option<&str> {
        match self.element() {
            SemanticType::Model(name) => Some(name),
            _ => None,
        }
    }

    /// Whether `value` is acceptable for this type
    ///
    /// Arrays are accepted element-wise; a nested array never is.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            SemanticType::ArrayOf(inner) => match value {
                Value::Array(items) => items
                    .iter()
                    .all(|item| !item.is_array() && inner.accepts(item)),
                _ => false,
            },
            SemanticType::Model(_) => {
                matches!(value, Value::Object(map) if !map.contains_key("@value"))
            }
            SemanticType::Data(data_type) => {
                !value.is_array() && data_type.accepts(&detect_type(value))
            }
        }
    }
}

impl FromStr for SemanticType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix(ARRAY_OF) {
            return Ok(SemanticType::ArrayOf(Box::new(inner.parse()?)));
        }
        if let Some(name) = s.strip_prefix('#') {
            if name.is_empty() {
                return Err(SpecError::InvalidType(s.to_string()));
            }
            return Ok(SemanticType::Model(name.to_string()));
        }
        if s.is_empty() {
            return Err(SpecError::InvalidType(s.to_string()));
        }
        Ok(SemanticType::Data(DataType::from_iri(s)))
    }
}

impl TryFrom<String> for SemanticType {
    type Error = SpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SemanticType> for String {
    fn from(value: SemanticType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Data(data_type) => write!(f, "{}", data_type.iri()),
            SemanticType::Model(name) => write!(f, "#{}", name),
            SemanticType::ArrayOf(inner) => write!(f, "{}{}", ARRAY_OF, inner),
        }
    }
}

/// Shape of a raw value as seen by detection
#[derive(Debug, Clone, PartialEq)]
pub enum DetectedType {
    Null,
    Boolean,
    Integer,
    Float,
    Text,
    Url,
    Date,
    DateTime,
    Time,
    Duration,
    /// `{"@value": ...}` wrapper, which the validator does not support
    ValueObject,
    /// Object whose model could be identified
    Model(String),
    /// Object with no recognizable model
    Object,
    /// Array typed by its first non-null element
    ArrayOf(Box<DetectedType>),
    EmptyArray,
}

impl DetectedType {
    /// Whether the value was a JSON string
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            DetectedType::Text
                | DetectedType::Url
                | DetectedType::Date
                | DetectedType::DateTime
                | DetectedType::Time
                | DetectedType::Duration
        )
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectedType::Null => write!(f, "null"),
            DetectedType::Boolean => write!(f, "{}Boolean", SCHEMA_ORG),
            DetectedType::Integer => write!(f, "{}Integer", SCHEMA_ORG),
            DetectedType::Float => write!(f, "{}Float", SCHEMA_ORG),
            DetectedType::Text => write!(f, "{}Text", SCHEMA_ORG),
            DetectedType::Url => write!(f, "{}URL", SCHEMA_ORG),
            DetectedType::Date => write!(f, "{}Date", SCHEMA_ORG),
            DetectedType::DateTime => write!(f, "{}DateTime", SCHEMA_ORG),
            DetectedType::Time => write!(f, "{}Time", SCHEMA_ORG),
            DetectedType::Duration => write!(f, "{}Duration", SCHEMA_ORG),
            DetectedType::ValueObject => write!(f, "@value"),
            DetectedType::Model(name) => write!(f, "#{}", name),
            DetectedType::Object => write!(f, "object"),
            DetectedType::ArrayOf(inner) => write!(f, "{}{}", ARRAY_OF, inner),
            DetectedType::EmptyArray => write!(f, "{}", ARRAY_OF),
        }
    }
}

/// Type indicator of an object: `type` then `@type`, first string of an array
pub fn type_indicator(map: &Map<String, Value>) -> Option<&str> {
    ["type", "@type"].iter().find_map(|key| match map.get(*key) {
        Some(Value::String(name)) => Some(name.as_str()),
        Some(Value::Array(items)) => items.iter().find_map(Value::as_str),
        _ => None,
    })
}

/// Whether an object is a `{"@value": ...}` wrapper
pub fn is_value_object(map: &Map<String, Value>) -> bool {
    map.contains_key("@value")
}

/// Classify a raw value by shape
pub fn detect_type(value: &Value) -> DetectedType {
    match value {
        Value::Null => DetectedType::Null,
        Value::Bool(_) => DetectedType::Boolean,
        Value::Number(number) => {
            let whole = number.is_i64()
                || number.is_u64()
                || number.as_f64().is_some_and(|f| f.fract() == 0.0);
            if whole {
                DetectedType::Integer
            } else {
                DetectedType::Float
            }
        }
        Value::String(s) => detect_string(s),
        Value::Object(map) => detect_object(map),
        Value::Array(items) => {
            if items.is_empty() {
                return DetectedType::EmptyArray;
            }
            let first = items.iter().find(|item| !item.is_null());
            DetectedType::ArrayOf(Box::new(first.map_or(DetectedType::Null, detect_type)))
        }
    }
}

fn detect_string(s: &str) -> DetectedType {
    if DATE_TIME_RE.is_match(s) {
        DetectedType::DateTime
    } else if DATE_RE.is_match(s) {
        DetectedType::Date
    } else if TIME_RE.is_match(s) {
        DetectedType::Time
    } else if DURATION_RE.is_match(s) {
        DetectedType::Duration
    } else if URL_RE.is_match(s) {
        DetectedType::Url
    } else {
        DetectedType::Text
    }
}

fn detect_object(map: &Map<String, Value>) -> DetectedType {
    if is_value_object(map) {
        return DetectedType::ValueObject;
    }
    let numeric = |key: &str| map.get(key).is_some_and(Value::is_number);
    if numeric("latitude") && numeric("longitude") {
        return DetectedType::Model("GeoCoordinates".to_string());
    }
    match type_indicator(map) {
        Some(name) => DetectedType::Model(name.to_string()),
        None => DetectedType::Object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_semantic_types() {
        assert_eq!(
            "https://schema.org/Text".parse::<SemanticType>().unwrap(),
            SemanticType::Data(DataType::Text)
        );
        assert_eq!(
            "#Place".parse::<SemanticType>().unwrap(),
            SemanticType::Model("Place".to_string())
        );
        assert_eq!(
            "ArrayOf#Concept".parse::<SemanticType>().unwrap(),
            SemanticType::ArrayOf(Box::new(SemanticType::Model("Concept".to_string())))
        );
        assert_eq!(
            "https://schema.org/EventStatusType".parse::<SemanticType>().unwrap(),
            SemanticType::Data(DataType::Other("https://schema.org/EventStatusType".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!("".parse::<SemanticType>().is_err());
        assert!("#".parse::<SemanticType>().is_err());
        assert!("ArrayOf".parse::<SemanticType>().is_err());
    }

    #[test]
    fn test_display_is_the_definition_form() {
        let ty: SemanticType = "ArrayOfhttps://schema.org/URL".parse().unwrap();
        assert_eq!(ty.to_string(), "ArrayOfhttps://schema.org/URL");
        assert_eq!(ty.element(), &SemanticType::Data(DataType::Url));
    }

    #[test]
    fn test_serde_uses_string_form() {
        let ty: SemanticType = serde_json::from_value(json!("ArrayOf#Offer")).unwrap();
        assert_eq!(ty.model_name(), Some("Offer"));
        assert_eq!(serde_json::to_value(&ty).unwrap(), json!("ArrayOf#Offer"));
    }

    #[test]
    fn test_detect_scalars() {
        assert_eq!(detect_type(&json!(null)), DetectedType::Null);
        assert_eq!(detect_type(&json!(true)), DetectedType::Boolean);
        assert_eq!(detect_type(&json!(5)), DetectedType::Integer);
        assert_eq!(detect_type(&json!(5.0)), DetectedType::Integer);
        assert_eq!(detect_type(&json!(5.5)), DetectedType::Float);
        assert_eq!(detect_type(&json!("Tai chi")), DetectedType::Text);
    }

    #[test]
    fn test_detect_temporal_strings() {
        assert_eq!(detect_type(&json!("2017-03-22T20:00:00Z")), DetectedType::DateTime);
        assert_eq!(detect_type(&json!("2017-03-22T20:00:00+01:00")), DetectedType::DateTime);
        assert_eq!(detect_type(&json!("2017-03-22")), DetectedType::Date);
        assert_eq!(detect_type(&json!("20:00")), DetectedType::Time);
        assert_eq!(detect_type(&json!("PT1H30M")), DetectedType::Duration);
        assert_eq!(detect_type(&json!("P1W")), DetectedType::Duration);
        assert_eq!(detect_type(&json!("P")), DetectedType::Text);
    }

    #[test]
    fn test_detect_urls() {
        assert_eq!(detect_type(&json!("https://example.org/events/1")), DetectedType::Url);
        assert_eq!(detect_type(&json!("www.example.org")), DetectedType::Text);
    }

    #[test]
    fn test_detect_objects() {
        assert_eq!(detect_type(&json!({"@value": "x"})), DetectedType::ValueObject);
        assert_eq!(
            detect_type(&json!({"latitude": 51.4, "longitude": -0.2})),
            DetectedType::Model("GeoCoordinates".to_string())
        );
        assert_eq!(
            detect_type(&json!({"@type": ["Place", "Thing"]})),
            DetectedType::Model("Place".to_string())
        );
        assert_eq!(detect_type(&json!({"name": "x"})), DetectedType::Object);
    }

    #[test]
    fn test_detect_arrays() {
        assert_eq!(detect_type(&json!([])), DetectedType::EmptyArray);
        assert_eq!(
            detect_type(&json!([null, 3])),
            DetectedType::ArrayOf(Box::new(DetectedType::Integer))
        );
        assert_eq!(
            detect_type(&json!([[1]])),
            DetectedType::ArrayOf(Box::new(DetectedType::ArrayOf(Box::new(DetectedType::Integer))))
        );
    }

    #[test]
    fn test_duration_grammar() {
        for valid in ["P1D", "PT1H", "PT0.5S", "P1Y2M3DT4H5M6S", "P2W", "PT1,5H"] {
            assert!(is_duration(valid), "{} should be a duration", valid);
        }
        for invalid in ["P", "PT", "1H", "P1H", "PT1.5H30M", "P1W2D"] {
            assert!(!is_duration(invalid), "{} should not be a duration", invalid);
        }
    }

    #[test]
    fn test_float_accepts_integers() {
        let float: SemanticType = "https://schema.org/Float".parse().unwrap();
        assert!(float.accepts(&json!(5)));
        assert!(float.accepts(&json!(5.25)));
        assert!(!float.accepts(&json!("5")));
    }

    #[test]
    fn test_array_type_rejects_bad_and_nested_elements() {
        let people: SemanticType = "ArrayOf#Person".parse().unwrap();
        assert!(people.accepts(&json!([{"type": "Person"}])));
        assert!(people.accepts(&json!([])));
        assert!(!people.accepts(&json!([{"type": "Person"}, "a string"])));
        assert!(!people.accepts(&json!([[{"type": "Person"}]])));
        assert!(!people.accepts(&json!({"type": "Person"})));
    }

    #[test]
    fn test_scalar_type_rejects_arrays() {
        let text: SemanticType = "https://schema.org/Text".parse().unwrap();
        assert!(text.accepts(&json!("x")));
        assert!(!text.accepts(&json!(["x"])));
    }

    #[test]
    fn test_model_type_rejects_value_objects() {
        let place: SemanticType = "#Place".parse().unwrap();
        assert!(place.accepts(&json!({"name": "Gym"})));
        assert!(!place.accepts(&json!({"@value": "Gym"})));
        assert!(!place.accepts(&json!("Gym")));
    }
}
