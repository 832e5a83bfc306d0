//! Cross-field and data quality rules

mod activity_in_activity_list;
mod concept_id_in_scheme;
mod dates_must_have_duration;
mod end_before_start;
mod max_less_than_min;
mod no_zero_duration;

pub use activity_in_activity_list::{ActivityInActivityListRule, DEFAULT_ACTIVITY_LIST};
pub use concept_id_in_scheme::ConceptIdInSchemeRule;
pub use dates_must_have_duration::DatesMustHaveDurationRule;
pub use end_before_start::EndBeforeStartRule;
pub use max_less_than_min::MaxLessThanMinRule;
pub use no_zero_duration::NoZeroDurationRule;
