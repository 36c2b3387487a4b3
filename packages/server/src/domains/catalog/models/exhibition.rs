use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use typed_builder::TypedBuilder;

use crate::common::delimited;
use crate::common::{ExhibitionId, OrganizerId, PavilionId, SeriesId};

/// One edition of a trade show.
///
/// `organizer_id`, `pavilion_id` and `fair_series_id` are weak references: no
/// ownership, no cascading delete. `industry_field` holds free-form tag names,
/// not category ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Exhibition {
    #[serde(default)]
    #[builder(default)]
    pub id: ExhibitionId,

    // Identity
    pub fair_name: String,
    #[builder(default, setter(strip_option))]
    pub fair_name_trans: Option<String>,
    #[builder(default, setter(strip_option))]
    pub fair_label: Option<String>,
    #[builder(default, setter(strip_option))]
    pub event_format: Option<String>,
    #[builder(default, setter(strip_option))]
    pub website: Option<String>,

    // Schedule
    #[builder(default, setter(strip_option))]
    pub fair_start_date: Option<NaiveDate>,
    #[builder(default, setter(strip_option))]
    pub fair_end_date: Option<NaiveDate>,
    #[builder(default, setter(strip_option))]
    pub period: Option<String>,
    #[builder(default, setter(strip_option))]
    pub open_hour: Option<String>,

    // Content
    #[builder(default, setter(strip_option))]
    pub intro: Option<String>,
    #[builder(default, setter(strip_option))]
    pub exhibition_items: Option<String>,
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub industry_field: Vec<String>,

    // Location
    #[builder(default, setter(strip_option))]
    pub country: Option<String>,
    #[builder(default, setter(strip_option))]
    pub province: Option<String>,
    #[builder(default, setter(strip_option))]
    pub city: Option<String>,
    #[builder(default, setter(strip_option))]
    pub pavilion: Option<String>,

    // Weak references
    #[builder(default, setter(strip_option))]
    pub pavilion_id: Option<PavilionId>,
    #[builder(default, setter(strip_option))]
    pub organizer_name: Option<String>,
    #[builder(default, setter(strip_option))]
    pub organizer_id: Option<OrganizerId>,
    #[builder(default, setter(strip_option))]
    pub fair_series_id: Option<SeriesId>,

    // Contact
    #[builder(default, setter(strip_option))]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub phone: Vec<String>,
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub email: Vec<String>,

    // Media
    #[builder(default, setter(strip_option))]
    pub logo_url: Option<String>,
    #[builder(default, setter(strip_option))]
    pub banner_url: Option<String>,

    // Bookkeeping
    #[serde(default)]
    #[builder(default)]
    pub version: i64,
    #[serde(default = "Utc::now")]
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

impl Exhibition {
    /// Inclusive date range. A fair with only a start date is a one-day range.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.fair_start_date, self.fair_end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            (Some(start), None) => Some((start, start)),
            _ => None,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

impl Exhibition {
    /// Insert a new exhibition. Id, version and timestamps come from the database.
    pub async fn insert(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Exhibition>(
            r#"
            INSERT INTO exhibitions (
                fair_name, fair_name_trans, fair_label, event_format, website,
                fair_start_date, fair_end_date, period, open_hour,
                intro, exhibition_items, industry_field,
                country, province, city, pavilion,
                pavilion_id, organizer_name, organizer_id, fair_series_id,
                contact, phone, email, logo_url, banner_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
            RETURNING *
            "#,
        )
        .bind(&self.fair_name)
        .bind(&self.fair_name_trans)
        .bind(&self.fair_label)
        .bind(&self.event_format)
        .bind(&self.website)
        .bind(self.fair_start_date)
        .bind(self.fair_end_date)
        .bind(&self.period)
        .bind(&self.open_hour)
        .bind(&self.intro)
        .bind(&self.exhibition_items)
        .bind(&self.industry_field)
        .bind(&self.country)
        .bind(&self.province)
        .bind(&self.city)
        .bind(&self.pavilion)
        .bind(self.pavilion_id)
        .bind(&self.organizer_name)
        .bind(self.organizer_id)
        .bind(self.fair_series_id)
        .bind(&self.contact)
        .bind(&self.phone)
        .bind(&self.email)
        .bind(&self.logo_url)
        .bind(&self.banner_url)
        .fetch_one(conn)
        .await
    }

    /// Overwrite every column if the stored version still equals `self.version`.
    ///
    /// Returns `None` when no row matched (missing or moved on).
    pub async fn update(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Exhibition>(
            r#"
            UPDATE exhibitions
            SET
                fair_name = $3, fair_name_trans = $4, fair_label = $5,
                event_format = $6, website = $7,
                fair_start_date = $8, fair_end_date = $9, period = $10, open_hour = $11,
                intro = $12, exhibition_items = $13, industry_field = $14,
                country = $15, province = $16, city = $17, pavilion = $18,
                pavilion_id = $19, organizer_name = $20, organizer_id = $21,
                fair_series_id = $22, contact = $23, phone = $24, email = $25,
                logo_url = $26, banner_url = $27,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.version)
        .bind(&self.fair_name)
        .bind(&self.fair_name_trans)
        .bind(&self.fair_label)
        .bind(&self.event_format)
        .bind(&self.website)
        .bind(self.fair_start_date)
        .bind(self.fair_end_date)
        .bind(&self.period)
        .bind(&self.open_hour)
        .bind(&self.intro)
        .bind(&self.exhibition_items)
        .bind(&self.industry_field)
        .bind(&self.country)
        .bind(&self.province)
        .bind(&self.city)
        .bind(&self.pavilion)
        .bind(self.pavilion_id)
        .bind(&self.organizer_name)
        .bind(self.organizer_id)
        .bind(self.fair_series_id)
        .bind(&self.contact)
        .bind(&self.phone)
        .bind(&self.email)
        .bind(&self.logo_url)
        .bind(&self.banner_url)
        .fetch_optional(conn)
        .await
    }
}
