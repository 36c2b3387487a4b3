//! What the search engine needs to know about each searchable kind.

use chrono::NaiveDate;
use serde::Serialize;

use crate::common::{ExhibitionId, OrganizerId};
use crate::domains::catalog::{Exhibition, Exhibitor, Organizer, Pavilion};
use crate::kernel::ExhibitorRow;

/// Filterable dimensions of a search result.
///
/// Default methods describe a document that lacks the dimension; a filter on
/// a missing dimension never matches.
pub trait Searchable {
    /// Primary and translated names.
    fn names(&self) -> Vec<&str>;

    fn organizer_id(&self) -> Option<OrganizerId> {
        None
    }

    fn fair_id(&self) -> Option<ExhibitionId> {
        None
    }

    /// Every country value the record carries.
    fn countries(&self) -> Vec<&str>;

    /// Start dates matched by `fair_date` and listed by the date facet.
    fn start_dates(&self) -> Vec<NaiveDate> {
        Vec::new()
    }

    /// Inclusive date ranges used by `date_status`.
    fn date_ranges(&self) -> Vec<(NaiveDate, NaiveDate)> {
        Vec::new()
    }

    fn sort_country(&self) -> Option<&str> {
        self.countries().into_iter().next()
    }

    fn sort_start_date(&self) -> Option<NaiveDate> {
        self.start_dates().into_iter().min()
    }
}

fn text(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl Searchable for Exhibition {
    fn names(&self) -> Vec<&str> {
        std::iter::once(self.fair_name.as_str())
            .chain(self.fair_name_trans.as_deref())
            .collect()
    }

    fn organizer_id(&self) -> Option<OrganizerId> {
        self.organizer_id
    }

    fn fair_id(&self) -> Option<ExhibitionId> {
        Some(self.id)
    }

    fn countries(&self) -> Vec<&str> {
        text(&self.country).into_iter().collect()
    }

    fn start_dates(&self) -> Vec<NaiveDate> {
        self.fair_start_date.into_iter().collect()
    }

    fn date_ranges(&self) -> Vec<(NaiveDate, NaiveDate)> {
        self.date_range().into_iter().collect()
    }
}

/// Exhibitors are searched together with their exhibition: organizer, dates
/// and the fallback date range come from it.
impl Searchable for ExhibitorRow {
    fn names(&self) -> Vec<&str> {
        let Exhibitor {
            exhibitor_name,
            company_name,
            ..
        } = &self.exhibitor;
        exhibitor_name
            .as_deref()
            .into_iter()
            .chain(company_name.as_deref())
            .collect()
    }

    fn organizer_id(&self) -> Option<OrganizerId> {
        self.fair.as_ref().and_then(|fair| fair.organizer_id)
    }

    fn fair_id(&self) -> Option<ExhibitionId> {
        Some(self.exhibitor.fair_id)
    }

    fn countries(&self) -> Vec<&str> {
        let mut countries: Vec<&str> = text(&self.exhibitor.country).into_iter().collect();
        for country in self.exhibitor.expo_info.iter().filter_map(|e| text(&e.country)) {
            if !countries.contains(&country) {
                countries.push(country);
            }
        }
        countries
    }

    fn start_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .exhibitor
            .expo_info
            .iter()
            .filter_map(|edition| edition.fair_start_date)
            .collect();
        if let Some(start) = self.fair.as_ref().and_then(|fair| fair.fair_start_date) {
            dates.push(start);
        }
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    fn date_ranges(&self) -> Vec<(NaiveDate, NaiveDate)> {
        let editions: Vec<_> = self
            .exhibitor
            .expo_info
            .iter()
            .filter_map(|edition| edition.date_range())
            .collect();
        if !editions.is_empty() {
            return editions;
        }
        self.fair
            .as_ref()
            .and_then(Exhibition::date_range)
            .into_iter()
            .collect()
    }
}

impl Searchable for Organizer {
    fn names(&self) -> Vec<&str> {
        std::iter::once(self.organizer_name.as_str())
            .chain(self.organizer_name_trans.as_deref())
            .collect()
    }

    fn organizer_id(&self) -> Option<OrganizerId> {
        Some(self.id)
    }

    fn countries(&self) -> Vec<&str> {
        text(&self.country).into_iter().collect()
    }
}

impl Searchable for Pavilion {
    fn names(&self) -> Vec<&str> {
        std::iter::once(self.pavilion_name.as_str())
            .chain(self.pavilion_name_trans.as_deref())
            .collect()
    }

    fn countries(&self) -> Vec<&str> {
        text(&self.country).into_iter().collect()
    }
}

/// Exhibitor search result: the exhibitor plus a summary of its exhibition.
#[derive(Debug, Clone, Serialize)]
pub struct ExhibitorHit {
    #[serde(flatten)]
    pub exhibitor: Exhibitor,
    pub fair_name: Option<String>,
    pub fair_start_date: Option<NaiveDate>,
    pub fair_end_date: Option<NaiveDate>,
}

impl From<ExhibitorRow> for ExhibitorHit {
    fn from(row: ExhibitorRow) -> Self {
        let (fair_name, fair_start_date, fair_end_date) = match row.fair {
            Some(fair) => (Some(fair.fair_name), fair.fair_start_date, fair.fair_end_date),
            None => (None, None, None),
        };
        Self {
            exhibitor: row.exhibitor,
            fair_name,
            fair_start_date,
            fair_end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::ExpoEdition;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blank_country_is_not_a_facet_value() {
        let fair = Exhibition::builder()
            .fair_name("Expo")
            .country("  ")
            .build();
        assert!(fair.countries().is_empty());
        assert_eq!(fair.sort_country(), None);
    }

    #[test]
    fn test_exhibitor_dates_merge_editions_and_fair() {
        let row = ExhibitorRow {
            exhibitor: Exhibitor::builder()
                .fair_id(ExhibitionId::from_raw(1))
                .expo_info(vec![
                    ExpoEdition::builder()
                        .fair_start_date(date(2024, 5, 1))
                        .fair_end_date(date(2024, 5, 3))
                        .country("Germany")
                        .build(),
                    ExpoEdition::builder()
                        .fair_start_date(date(2025, 5, 1))
                        .country("China")
                        .build(),
                ])
                .country("China")
                .build(),
            fair: Some(
                Exhibition::builder()
                    .fair_name("Expo")
                    .fair_start_date(date(2025, 5, 1))
                    .fair_end_date(date(2025, 5, 4))
                    .build(),
            ),
        };

        assert_eq!(row.countries(), vec!["China", "Germany"]);
        assert_eq!(row.start_dates(), vec![date(2024, 5, 1), date(2025, 5, 1)]);
        // Edition ranges take precedence over the exhibition's own range
        assert_eq!(
            row.date_ranges(),
            vec![
                (date(2024, 5, 1), date(2024, 5, 3)),
                (date(2025, 5, 1), date(2025, 5, 1))
            ]
        );
    }

    #[test]
    fn test_exhibitor_without_editions_uses_fair_range() {
        let row = ExhibitorRow {
            exhibitor: Exhibitor::builder()
                .fair_id(ExhibitionId::from_raw(1))
                .build(),
            fair: Some(
                Exhibition::builder()
                    .fair_name("Expo")
                    .fair_start_date(date(2025, 5, 1))
                    .fair_end_date(date(2025, 5, 4))
                    .build(),
            ),
        };
        assert_eq!(row.date_ranges(), vec![(date(2025, 5, 1), date(2025, 5, 4))]);
    }
}
