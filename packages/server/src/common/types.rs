// Common types used across multiple domains and layers
//
// These types are shared between the kernel and domain layers to avoid
// circular dependencies while maintaining type safety.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of record held by the entity store.
///
/// Merges only ever happen between records of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Exhibition,
    Organizer,
    Pavilion,
    Exhibitor,
    Series,
    IndustryCategory,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Exhibition,
        EntityKind::Organizer,
        EntityKind::Pavilion,
        EntityKind::Exhibitor,
        EntityKind::Series,
        EntityKind::IndustryCategory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exhibition => "exhibition",
            Self::Organizer => "organizer",
            Self::Pavilion => "pavilion",
            Self::Exhibitor => "exhibitor",
            Self::Series => "series",
            Self::IndustryCategory => "industry_category",
        }
    }

    /// Backing table in the Postgres schema.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Exhibition => "exhibitions",
            Self::Organizer => "organizers",
            Self::Pavilion => "pavilions",
            Self::Exhibitor => "exhibitors",
            Self::Series => "series",
            Self::IndustryCategory => "industry_categories",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid entity kind: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_roundtrip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
        assert!("venue".parse::<EntityKind>().is_err());
    }
}
