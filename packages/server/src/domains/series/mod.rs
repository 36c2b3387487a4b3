//! Series domain - grouping recurring exhibition editions
//!
//! A series is keyed by its exact, case-sensitive name and created on the
//! first classify call that uses the name.

pub mod activities;

pub use activities::{
    classify, list_series, normalize_series_name, series_members, ClassifyReport,
    ClassifyRequest, MIN_SERIES_NAME_CHARS,
};
