use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use typed_builder::TypedBuilder;

use crate::common::SeriesId;

/// Series - groups recurring editions of the same show.
///
/// `name` is the natural key: unique, compared exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Series {
    #[serde(default)]
    #[builder(default)]
    pub id: SeriesId,
    pub name: String,
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

impl Series {
    pub async fn insert(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Series>(
            r#"
            INSERT INTO series (
                name
            )
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(&self.name)
        .fetch_one(conn)
        .await
    }

    /// Version-checked overwrite. `None` when no row matched.
    pub async fn update(&self, conn: impl PgExecutor<'_>) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Series>(
            r#"
            UPDATE series
            SET
                name = $3,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(self.id)
        .bind(self.version)
        .bind(&self.name)
        .fetch_optional(conn)
        .await
    }

    /// Exact, case-sensitive lookup.
    pub async fn find_by_name(name: &str, conn: impl PgExecutor<'_>) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Series>("SELECT * FROM series WHERE name = $1")
            .bind(name)
            .fetch_optional(conn)
            .await
    }

    /// Insert unless the name is taken. Returns `None` when another row already has it.
    pub async fn create_if_absent(
        name: &str,
        conn: impl PgExecutor<'_>,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Series>(
            r#"
            INSERT INTO series (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_optional(conn)
        .await
    }
}
