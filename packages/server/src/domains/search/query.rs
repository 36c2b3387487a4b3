//! Search request parsing.
//!
//! `SearchRequest` is what arrives over the wire, every field optional and
//! stringly typed. `SearchRequest::validate` turns it into a `SearchQuery`
//! that the engine can evaluate without further checks.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::{
    DirectoryError, DirectoryResult, ExhibitionId, OrganizerId, PageArgs, PageSettings,
    ValidatedPageArgs,
};

/// Date format accepted by `fair_date` and produced by the date facet.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Enumerated filter values
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    /// Some date range contains today.
    Ongoing,
    /// Every date range ended before today.
    Expired,
}

impl FromStr for DateStatus {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(Self::Ongoing),
            "expired" => Ok(Self::Expired),
            other => Err(DirectoryError::validation(format!(
                "date_status must be 'ongoing' or 'expired', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Country,
    StartDate,
}

impl FromStr for SortField {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" => Ok(Self::Country),
            "start_date" => Ok(Self::StartDate),
            other => Err(DirectoryError::validation(format!(
                "sort_by must be 'country' or 'start_date', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DirectoryError::validation(format!(
                "sort_order must be 'asc' or 'desc', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

// ============================================================================
// Wire request
// ============================================================================

/// Search parameters as received from a caller (JSON body or query string).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient_int")]
    pub page: Option<i64>,
    #[serde(
        default,
        alias = "size",
        alias = "limit",
        deserialize_with = "lenient_int"
    )]
    pub page_size: Option<i64>,
    #[serde(default, alias = "keyword")]
    pub search_name: Option<String>,
    /// Kept as text until `validate`, which rejects anything non-numeric.
    #[serde(default, deserialize_with = "id_text")]
    pub organizer_id: Option<String>,
    #[serde(default, deserialize_with = "id_text")]
    pub fair_id: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub fair_date: Option<String>,
    #[serde(default)]
    pub date_status: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
}

/// Accepts a number, a numeric string, or anything else as `None`.
///
/// Paging is forgiving, so `page_size=abc` falls back to the default instead
/// of rejecting the request.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite())
                .map(|value| value.trunc() as i64)
        }),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts an id filter as a number or a string, keeping its text.
fn id_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Blank is absent; anything else must be an integer.
fn parse_id(field: &str, value: &Option<String>) -> DirectoryResult<Option<i64>> {
    present(value)
        .map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                DirectoryError::validation(format!("{} must be an integer, got '{}'", field, raw))
            })
        })
        .transpose()
}

/// Trimmed, non-empty value.
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl SearchRequest {
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    /// Check every filter and normalize paging.
    ///
    /// Unknown enum values and malformed dates are rejected; paging never is.
    pub fn validate(&self, settings: &PageSettings) -> DirectoryResult<SearchQuery> {
        let fair_date = present(&self.fair_date)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
                    DirectoryError::validation(format!(
                        "fair_date must be YYYY-MM-DD, got '{}'",
                        raw
                    ))
                })
            })
            .transpose()?;

        let date_status = present(&self.date_status)
            .map(str::parse::<DateStatus>)
            .transpose()?;

        let order = present(&self.sort_order)
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        let sort = present(&self.sort_by)
            .map(str::parse::<SortField>)
            .transpose()?
            .map(|field| SortSpec { field, order });

        let organizer_id = parse_id("organizer_id", &self.organizer_id)?;
        let fair_id = parse_id("fair_id", &self.fair_id)?;

        Ok(SearchQuery {
            name: present(&self.search_name).map(str::to_lowercase),
            organizer_id: organizer_id.map(OrganizerId::from_raw),
            fair_id: fair_id.map(ExhibitionId::from_raw),
            country: present(&self.country).map(str::to_string),
            fair_date,
            date_status,
            sort,
            page: PageArgs {
                page: self.page,
                page_size: self.page_size,
            }
            .validate(settings),
        })
    }
}

/// Fluent construction of requests, mostly for tests and internal callers.
#[derive(Debug, Default)]
pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    pub fn page(mut self, page: i64) -> Self {
        self.request.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.request.page_size = Some(page_size);
        self
    }

    pub fn search_name(mut self, name: impl Into<String>) -> Self {
        self.request.search_name = Some(name.into());
        self
    }

    pub fn organizer_id(mut self, id: impl Into<i64>) -> Self {
        self.request.organizer_id = Some(id.into().to_string());
        self
    }

    pub fn fair_id(mut self, id: impl Into<i64>) -> Self {
        self.request.fair_id = Some(id.into().to_string());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.request.country = Some(country.into());
        self
    }

    pub fn fair_date(mut self, date: impl Into<String>) -> Self {
        self.request.fair_date = Some(date.into());
        self
    }

    pub fn date_status(mut self, status: impl Into<String>) -> Self {
        self.request.date_status = Some(status.into());
        self
    }

    pub fn sort(mut self, by: impl Into<String>, order: impl Into<String>) -> Self {
        self.request.sort_by = Some(by.into());
        self.request.sort_order = Some(order.into());
        self
    }

    pub fn build(self) -> SearchRequest {
        self.request
    }
}

// ============================================================================
// Validated query
// ============================================================================

/// A checked, stateless search query. Every present filter must match.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Lowercased substring matched against primary and translated names.
    pub name: Option<String>,
    pub organizer_id: Option<OrganizerId>,
    pub fair_id: Option<ExhibitionId>,
    pub country: Option<String>,
    pub fair_date: Option<NaiveDate>,
    pub date_status: Option<DateStatus>,
    /// `None` keeps insertion order.
    pub sort: Option<SortSpec>,
    pub page: ValidatedPageArgs,
}
