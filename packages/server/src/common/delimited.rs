//! Multi-value fields at the serialization boundary.
//!
//! Import producers still send contact lists as one `;`-joined string
//! (`"010-1;010-2"`). Inside the directory these are always ordered
//! `Vec<String>`s; the split happens here and nowhere else.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(default, deserialize_with = "directory_core::common::delimited::deserialize")]
//!     phone: Vec<String>,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{"phone": "010-1; 010-2"}"#).unwrap();
//! assert_eq!(row.phone, vec!["010-1", "010-2"]);
//! ```

use serde::{Deserialize, Deserializer};

pub const SEPARATOR: char = ';';

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValues {
    List(Vec<String>),
    Joined(String),
}

/// Accepts a JSON array, a `;`-joined string, or null.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawValues>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(RawValues::List(values)) => clean(values),
        Some(RawValues::Joined(joined)) => split(&joined),
    })
}

/// Split a joined string into trimmed, non-empty values.
pub fn split(joined: &str) -> Vec<String> {
    clean(joined.split(SEPARATOR).map(String::from))
}

fn clean(values: impl IntoIterator<Item = String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
