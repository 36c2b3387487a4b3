use std::collections::BTreeSet;

use crate::domains::catalog::Location;

fn clean(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Country -> province -> city lookup observed from record locations.
///
/// Advisory only: nothing here constrains which locations a record may carry.
#[derive(Debug, Clone, Default)]
pub struct RegionHierarchy {
    locations: Vec<Location>,
}

impl RegionHierarchy {
    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            locations: locations.into_iter().collect(),
        }
    }

    /// Sorted distinct countries.
    pub fn countries(&self) -> Vec<String> {
        self.project(|location| clean(&location.country))
    }

    /// Sorted distinct provinces seen together with `country`.
    pub fn provinces(&self, country: &str) -> Vec<String> {
        let country = country.trim();
        self.project(|location| {
            (clean(&location.country) == Some(country))
                .then(|| clean(&location.province))
                .flatten()
        })
    }

    /// Sorted distinct cities seen together with both `country` and `province`.
    pub fn cities(&self, country: &str, province: &str) -> Vec<String> {
        let (country, province) = (country.trim(), province.trim());
        self.project(|location| {
            (clean(&location.country) == Some(country)
                && clean(&location.province) == Some(province))
            .then(|| clean(&location.city))
            .flatten()
        })
    }

    fn project<'a>(&'a self, pick: impl Fn(&'a Location) -> Option<&'a str>) -> Vec<String> {
        self.locations
            .iter()
            .filter_map(pick)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(country: &str, province: &str, city: &str) -> Location {
        let opt = |value: &str| (!value.is_empty()).then(|| value.to_string());
        Location {
            country: opt(country),
            province: opt(province),
            city: opt(city),
        }
    }

    fn hierarchy() -> RegionHierarchy {
        RegionHierarchy::from_locations([
            at("China", "Shanghai", "Shanghai"),
            at("China", "Guangdong", "Guangzhou"),
            at("China", "Guangdong", "Shenzhen"),
            at(" China ", "Guangdong", "Guangzhou"),
            at("Germany", "Lower Saxony", "Hannover"),
            at("USA", "Shanghai", "Springfield"),
            at("", "", ""),
        ])
    }

    #[test]
    fn test_countries_sorted_distinct() {
        assert_eq!(hierarchy().countries(), vec!["China", "Germany", "USA"]);
    }

    #[test]
    fn test_provinces_scoped_to_country() {
        assert_eq!(
            hierarchy().provinces("China"),
            vec!["Guangdong", "Shanghai"]
        );
    }

    #[test]
    fn test_cities_require_both_parents() {
        assert_eq!(hierarchy().cities("China", "Shanghai"), vec!["Shanghai"]);
        assert_eq!(
            hierarchy().cities("China", "Guangdong"),
            vec!["Guangzhou", "Shenzhen"]
        );
    }

    #[test]
    fn test_unmatched_pair_is_empty() {
        assert!(hierarchy().cities("Germany", "Shanghai").is_empty());
        assert!(hierarchy().provinces("Atlantis").is_empty());
    }
}
