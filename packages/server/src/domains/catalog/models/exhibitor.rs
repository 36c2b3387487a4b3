use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use typed_builder::TypedBuilder;

use crate::common::delimited;
use crate::common::{ExhibitionId, ExhibitorId};

/// One recorded appearance of an exhibitor at a show edition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct ExpoEdition {
    pub fair_start_date: Option<NaiveDate>,
    pub fair_end_date: Option<NaiveDate>,
    pub hall: Option<String>,
    pub booth_number: Option<String>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
}

impl ExpoEdition {
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.fair_start_date, self.fair_end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            (Some(start), None) => Some((start, start)),
            _ => None,
        }
    }
}

/// Exhibitor - a company exhibiting at exactly one exhibition edition
///
/// `fair_id` is a required weak reference; it is repointed, never cleared,
/// when its exhibition is merged away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Exhibitor {
    #[serde(default)]
    #[builder(default)]
    pub id: ExhibitorId,
    pub fair_id: ExhibitionId,

    // Company identity
    #[builder(default, setter(strip_option))]
    pub exhibitor_name: Option<String>,
    #[builder(default, setter(strip_option))]
    pub company_name: Option<String>,
    #[builder(default, setter(strip_option))]
    pub uni_code: Option<String>,
    #[builder(default, setter(strip_option))]
    pub legal_person: Option<String>,
    #[builder(default, setter(strip_option))]
    pub register_date: Option<String>,
    #[builder(default, setter(strip_option))]
    pub registered_capital: Option<String>,

    // Profile
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub website: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub intro: Option<String>,
    #[builder(default, setter(strip_option))]
    pub country: Option<String>,
    #[builder(default, setter(strip_option))]
    pub province: Option<String>,
    #[builder(default, setter(strip_option))]
    pub city: Option<String>,
    #[builder(default, setter(strip_option))]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub category: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub products: Option<String>,
    #[builder(default, setter(strip_option))]
    pub brands: Option<String>,

    // Contact
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub email: Vec<String>,
    #[serde(default, deserialize_with = "delimited::deserialize")]
    #[builder(default)]
    pub phone: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub booth_number: Option<String>,

    // Appearances across editions
    #[serde(default)]
    #[sqlx(json)]
    #[builder(default)]
    pub expo_info: Vec<ExpoEdition>,

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

impl Exhibitor {
    pub async fn insert(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Exhibitor>(
            r#"
            INSERT INTO exhibitors (
                fair_id, exhibitor_name, company_name, uni_code, legal_person,
                register_date, registered_capital, website, intro, country,
                province, city, logo_url, category, products,
                brands, email, phone, booth_number, expo_info
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20)
            RETURNING *
            "#,
        )
        .bind(self.fair_id)
        .bind(&self.exhibitor_name)
        .bind(&self.company_name)
        .bind(&self.uni_code)
        .bind(&self.legal_person)
        .bind(&self.register_date)
        .bind(&self.registered_capital)
        .bind(&self.website)
        .bind(&self.intro)
        .bind(&self.country)
        .bind(&self.province)
        .bind(&self.city)
        .bind(&self.logo_url)
        .bind(&self.category)
        .bind(&self.products)
        .bind(&self.brands)
        .bind(&self.email)
        .bind(&self.phone)
        .bind(&self.booth_number)
        .bind(sqlx::types::Json(&self.expo_info))
        .fetch_one(conn)
        .await
    }

    /// Version-checked overwrite. `None` when no row matched.
    pub async fn update(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Exhibitor>(
            r#"
            UPDATE exhibitors
            SET
                fair_id = $3, exhibitor_name = $4, company_name = $5,
                uni_code = $6, legal_person = $7, register_date = $8,
                registered_capital = $9, website = $10, intro = $11,
                country = $12, province = $13, city = $14,
                logo_url = $15, category = $16, products = $17,
                brands = $18, email = $19, phone = $20,
                booth_number = $21, expo_info = $22,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.version)
        .bind(self.fair_id)
        .bind(&self.exhibitor_name)
        .bind(&self.company_name)
        .bind(&self.uni_code)
        .bind(&self.legal_person)
        .bind(&self.register_date)
        .bind(&self.registered_capital)
        .bind(&self.website)
        .bind(&self.intro)
        .bind(&self.country)
        .bind(&self.province)
        .bind(&self.city)
        .bind(&self.logo_url)
        .bind(&self.category)
        .bind(&self.products)
        .bind(&self.brands)
        .bind(&self.email)
        .bind(&self.phone)
        .bind(&self.booth_number)
        .bind(sqlx::types::Json(&self.expo_info))
        .fetch_optional(conn)
        .await
    }
}
