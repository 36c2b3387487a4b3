use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use typed_builder::TypedBuilder;

use crate::common::delimited;
use crate::common::PavilionId;

/// Pavilion - an exhibition venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Pavilion {
    #[serde(default)]
    #[builder(default)]
    pub id: PavilionId,
    pub pavilion_name: String,
    #[builder(default, setter(strip_option))]
    pub pavilion_name_trans: Option<String>,
    #[builder(default, setter(strip_option))]
    pub country: Option<String>,
    #[builder(default, setter(strip_option))]
    pub province: Option<String>,
    #[builder(default, setter(strip_option))]
    pub city: Option<String>,
    #[builder(default, setter(strip_option))]
    pub space: Option<String>, // floor area as entered, e.g. "340,000 m²"
    #[builder(default, setter(strip_option))]
    pub address: Option<String>,
    #[builder(default, setter(strip_option))]
    pub intro: Option<String>,
    #[builder(default, setter(strip_option))]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub phone: Vec<String>,
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

impl Pavilion {
    pub async fn insert(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Pavilion>(
            r#"
            INSERT INTO pavilions (
                pavilion_name, pavilion_name_trans, country, province, city,
                space, address, intro, website, phone
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&self.pavilion_name)
        .bind(&self.pavilion_name_trans)
        .bind(&self.country)
        .bind(&self.province)
        .bind(&self.city)
        .bind(&self.space)
        .bind(&self.address)
        .bind(&self.intro)
        .bind(&self.website)
        .bind(&self.phone)
        .fetch_one(conn)
        .await
    }

    /// Version-checked overwrite. `None` when no row matched.
    pub async fn update(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Pavilion>(
            r#"
            UPDATE pavilions
            SET
                pavilion_name = $3, pavilion_name_trans = $4, country = $5,
                province = $6, city = $7, space = $8,
                address = $9, intro = $10, website = $11,
                phone = $12,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.version)
        .bind(&self.pavilion_name)
        .bind(&self.pavilion_name_trans)
        .bind(&self.country)
        .bind(&self.province)
        .bind(&self.city)
        .bind(&self.space)
        .bind(&self.address)
        .bind(&self.intro)
        .bind(&self.website)
        .bind(&self.phone)
        .fetch_optional(conn)
        .await
    }
}
