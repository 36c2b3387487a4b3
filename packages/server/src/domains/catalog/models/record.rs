use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::EntityKind;

use super::{Exhibition, Exhibitor, IndustryCategory, Organizer, Pavilion, Series};

/// Any record held by the entity store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Exhibition(Exhibition),
    Organizer(Organizer),
    Pavilion(Pavilion),
    Exhibitor(Exhibitor),
    Series(Series),
    IndustryCategory(IndustryCategory),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Exhibition(_) => EntityKind::Exhibition,
            Record::Organizer(_) => EntityKind::Organizer,
            Record::Pavilion(_) => EntityKind::Pavilion,
            Record::Exhibitor(_) => EntityKind::Exhibitor,
            Record::Series(_) => EntityKind::Series,
            Record::IndustryCategory(_) => EntityKind::IndustryCategory,
        }
    }

    pub fn raw_id(&self) -> i64 {
        match self {
            Record::Exhibition(r) => r.id.into_raw(),
            Record::Organizer(r) => r.id.into_raw(),
            Record::Pavilion(r) => r.id.into_raw(),
            Record::Exhibitor(r) => r.id.into_raw(),
            Record::Series(r) => r.id.into_raw(),
            Record::IndustryCategory(r) => r.id.into_raw(),
        }
    }

    pub fn version(&self) -> i64 {
        match self {
            Record::Exhibition(r) => r.version,
            Record::Organizer(r) => r.version,
            Record::Pavilion(r) => r.version,
            Record::Exhibitor(r) => r.version,
            Record::Series(r) => r.version,
            Record::IndustryCategory(r) => r.version,
        }
    }

    /// Stamp store-assigned identity onto a freshly inserted record.
    pub fn assign(&mut self, raw_id: i64, now: DateTime<Utc>) {
        macro_rules! stamp {
            ($r:expr) => {{
                $r.id = raw_id.into();
                $r.version = 1;
                $r.created_at = now;
                $r.updated_at = now;
            }};
        }
        match self {
            Record::Exhibition(r) => stamp!(r),
            Record::Organizer(r) => stamp!(r),
            Record::Pavilion(r) => stamp!(r),
            Record::Exhibitor(r) => stamp!(r),
            Record::Series(r) => stamp!(r),
            Record::IndustryCategory(r) => stamp!(r),
        }
    }

    /// Bump the version after a successful write.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        macro_rules! bump {
            ($r:expr) => {{
                $r.version += 1;
                $r.updated_at = now;
            }};
        }
        match self {
            Record::Exhibition(r) => bump!(r),
            Record::Organizer(r) => bump!(r),
            Record::Pavilion(r) => bump!(r),
            Record::Exhibitor(r) => bump!(r),
            Record::Series(r) => bump!(r),
            Record::IndustryCategory(r) => bump!(r),
        }
    }

    /// Free-text location triple, for the region projection.
    pub fn location(&self) -> Option<Location> {
        let (country, province, city) = match self {
            Record::Exhibition(r) => (&r.country, &r.province, &r.city),
            Record::Organizer(r) => (&r.country, &r.province, &r.city),
            Record::Pavilion(r) => (&r.country, &r.province, &r.city),
            Record::Exhibitor(r) => (&r.country, &r.province, &r.city),
            Record::Series(_) | Record::IndustryCategory(_) => return None,
        };
        Some(Location {
            country: country.clone(),
            province: province.clone(),
            city: city.clone(),
        })
    }
}

macro_rules! record_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Record {
                fn from(record: $variant) -> Self {
                    Record::$variant(record)
                }
            }
        )*
    };
}

record_from!(Exhibition, Organizer, Pavilion, Exhibitor, Series, IndustryCategory);

/// Country / province / city as entered on a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, sqlx::FromRow)]
pub struct Location {
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
}

/// A stored id field pointing at another entity without ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeakRef {
    /// `Exhibition.organizer_id` -> Organizer
    ExhibitionOrganizer,
    /// `Exhibition.pavilion_id` -> Pavilion
    ExhibitionPavilion,
    /// `Exhibition.fair_series_id` -> Series
    ExhibitionSeries,
    /// `Exhibitor.fair_id` -> Exhibition
    ExhibitorFair,
}

impl WeakRef {
    pub const ALL: [WeakRef; 4] = [
        WeakRef::ExhibitionOrganizer,
        WeakRef::ExhibitionPavilion,
        WeakRef::ExhibitionSeries,
        WeakRef::ExhibitorFair,
    ];

    /// Kind of the record that holds the field.
    pub fn holder(&self) -> EntityKind {
        match self {
            Self::ExhibitorFair => EntityKind::Exhibitor,
            _ => EntityKind::Exhibition,
        }
    }

    /// Kind of the record the field points at.
    pub fn target(&self) -> EntityKind {
        match self {
            Self::ExhibitionOrganizer => EntityKind::Organizer,
            Self::ExhibitionPavilion => EntityKind::Pavilion,
            Self::ExhibitionSeries => EntityKind::Series,
            Self::ExhibitorFair => EntityKind::Exhibition,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::ExhibitionOrganizer => "organizer_id",
            Self::ExhibitionPavilion => "pavilion_id",
            Self::ExhibitionSeries => "fair_series_id",
            Self::ExhibitorFair => "fair_id",
        }
    }

    /// Every weak reference whose target is `kind`.
    pub fn targeting(kind: EntityKind) -> Vec<WeakRef> {
        WeakRef::ALL
            .into_iter()
            .filter(|reference| reference.target() == kind)
            .collect()
    }

    /// Rewrite the field on `record` if it points into `from`. Returns whether it changed.
    pub fn repoint(&self, record: &mut Record, from: &[i64], to: i64) -> bool {
        fn swap<T>(slot: &mut crate::common::Id<T>, from: &[i64], to: i64) -> bool {
            if from.contains(&slot.into_raw()) {
                *slot = to.into();
                true
            } else {
                false
            }
        }
        fn swap_opt<T>(slot: &mut Option<crate::common::Id<T>>, from: &[i64], to: i64) -> bool {
            slot.as_mut().is_some_and(|id| swap(id, from, to))
        }

        match (self, record) {
            (Self::ExhibitionOrganizer, Record::Exhibition(r)) => {
                swap_opt(&mut r.organizer_id, from, to)
            }
            (Self::ExhibitionPavilion, Record::Exhibition(r)) => {
                swap_opt(&mut r.pavilion_id, from, to)
            }
            (Self::ExhibitionSeries, Record::Exhibition(r)) => {
                swap_opt(&mut r.fair_series_id, from, to)
            }
            (Self::ExhibitorFair, Record::Exhibitor(r)) => swap(&mut r.fair_id, from, to),
            _ => false,
        }
    }
}
