use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use typed_builder::TypedBuilder;

use crate::common::delimited;
use crate::common::OrganizerId;

/// Organizer - the company or association running one or more exhibitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Organizer {
    #[serde(default)]
    #[builder(default)]
    pub id: OrganizerId,
    pub organizer_name: String,
    #[builder(default, setter(strip_option))]
    pub organizer_name_trans: Option<String>,
    #[builder(default, setter(strip_option))]
    pub found_year: Option<i32>,
    #[builder(default, setter(strip_option))]
    pub organizer_type: Option<String>,
    #[builder(default, setter(strip_option))]
    pub website: Option<String>,
    #[builder(default, setter(strip_option))]
    pub country: Option<String>,
    #[builder(default, setter(strip_option))]
    pub province: Option<String>,
    #[builder(default, setter(strip_option))]
    pub city: Option<String>,
    #[builder(default, setter(strip_option))]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub phone: Vec<String>,
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub email: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub postal_code: Option<String>,
    #[builder(default, setter(strip_option))]
    pub logo_url: Option<String>,
    #[builder(default, setter(strip_option))]
    pub social_media_url: Option<String>,
    #[builder(default, setter(strip_option))]
    pub intro: Option<String>,
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

// =============================================================================
// Queries
// =============================================================================

impl Organizer {
    pub async fn insert(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Organizer>(
            r#"
            INSERT INTO organizers (
                organizer_name, organizer_name_trans, found_year, organizer_type, website,
                country, province, city, address, phone,
                email, postal_code, logo_url, social_media_url, intro
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15)
            RETURNING *
            "#,
        )
        .bind(&self.organizer_name)
        .bind(&self.organizer_name_trans)
        .bind(self.found_year)
        .bind(&self.organizer_type)
        .bind(&self.website)
        .bind(&self.country)
        .bind(&self.province)
        .bind(&self.city)
        .bind(&self.address)
        .bind(&self.phone)
        .bind(&self.email)
        .bind(&self.postal_code)
        .bind(&self.logo_url)
        .bind(&self.social_media_url)
        .bind(&self.intro)
        .fetch_one(conn)
        .await
    }

    /// Version-checked overwrite. `None` when no row matched.
    pub async fn update(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Organizer>(
            r#"
            UPDATE organizers
            SET
                organizer_name = $3, organizer_name_trans = $4, found_year = $5,
                organizer_type = $6, website = $7, country = $8,
                province = $9, city = $10, address = $11,
                phone = $12, email = $13, postal_code = $14,
                logo_url = $15, social_media_url = $16, intro = $17,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.version)
        .bind(&self.organizer_name)
        .bind(&self.organizer_name_trans)
        .bind(self.found_year)
        .bind(&self.organizer_type)
        .bind(&self.website)
        .bind(&self.country)
        .bind(&self.province)
        .bind(&self.city)
        .bind(&self.address)
        .bind(&self.phone)
        .bind(&self.email)
        .bind(&self.postal_code)
        .bind(&self.logo_url)
        .bind(&self.social_media_url)
        .bind(&self.intro)
        .fetch_optional(conn)
        .await
    }
}
