use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use typed_builder::TypedBuilder;

use crate::common::IndustryId;

/// Deepest level of the industry taxonomy.
pub const MAX_INDUSTRY_DEPTH: i32 = 3;

/// IndustryCategory - node of the industry taxonomy (depth <= 3)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct IndustryCategory {
    #[serde(default)]
    #[builder(default)]
    pub id: IndustryId,
    pub name_zh: String,
    pub name_en: String,
    #[builder(default, setter(strip_option))]
    pub parent_id: Option<IndustryId>,
    #[builder(default = 1)]
    pub level: i32, // 1 = root
    #[serde(default)]
    #[builder(default)]
    pub sort_order: i32,
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

impl IndustryCategory {
    pub async fn insert(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, IndustryCategory>(
            r#"
            INSERT INTO industry_categories (
                name_zh, name_en, parent_id, level, sort_order
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&self.name_zh)
        .bind(&self.name_en)
        .bind(self.parent_id)
        .bind(self.level)
        .bind(self.sort_order)
        .fetch_one(conn)
        .await
    }

    /// Version-checked overwrite. `None` when no row matched.
    pub async fn update(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, IndustryCategory>(
            r#"
            UPDATE industry_categories
            SET
                name_zh = $3, name_en = $4, parent_id = $5,
                level = $6, sort_order = $7,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.version)
        .bind(&self.name_zh)
        .bind(&self.name_en)
        .bind(self.parent_id)
        .bind(self.level)
        .bind(self.sort_order)
        .fetch_optional(conn)
        .await
    }
}
