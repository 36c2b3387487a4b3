//! Postgres-backed entity store.
//!
//! Multi-record writes run in one transaction and lock the rows they check
//! (`SELECT ... FOR UPDATE`) so version checks and the writes that follow see
//! the same state. Rows are locked in ascending id order.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::{debug, info};

use crate::common::{DirectoryError, DirectoryResult, EntityKind, ExhibitionId};
use crate::domains::catalog::{
    Exhibition, Exhibitor, IndustryCategory, Location, Organizer, Pavilion, Record, Series,
};
use crate::kernel::traits::{
    BaseEntityStore, ExhibitorRow, MergeOutcome, MergePlan, SeriesAssignment,
};

pub struct PostgresEntityStore {
    pool: PgPool,
}

impl PostgresEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// =============================================================================
// Kind-dispatched row helpers
// =============================================================================

async fn fetch_record(
    kind: EntityKind,
    raw_id: i64,
    for_update: bool,
    conn: impl PgExecutor<'_>,
) -> sqlx::Result<Option<Record>> {
    let sql = format!(
        "SELECT * FROM {} WHERE id = $1{}",
        kind.table(),
        if for_update { " FOR UPDATE" } else { "" }
    );

    macro_rules! fetch {
        ($ty:ty) => {
            sqlx::query_as::<_, $ty>(&sql)
                .bind(raw_id)
                .fetch_optional(conn)
                .await?
                .map(Record::from)
        };
    }

    Ok(match kind {
        EntityKind::Exhibition => fetch!(Exhibition),
        EntityKind::Organizer => fetch!(Organizer),
        EntityKind::Pavilion => fetch!(Pavilion),
        EntityKind::Exhibitor => fetch!(Exhibitor),
        EntityKind::Series => fetch!(Series),
        EntityKind::IndustryCategory => fetch!(IndustryCategory),
    })
}

async fn list_all<T>(table: &str, pool: &PgPool) -> sqlx::Result<Vec<T>>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    sqlx::query_as::<_, T>(&format!("SELECT * FROM {} ORDER BY id", table))
        .fetch_all(pool)
        .await
}

async fn insert_record(record: &Record, conn: impl PgExecutor<'_>) -> sqlx::Result<Record> {
    Ok(match record {
        Record::Exhibition(r) => r.insert(conn).await?.into(),
        Record::Organizer(r) => r.insert(conn).await?.into(),
        Record::Pavilion(r) => r.insert(conn).await?.into(),
        Record::Exhibitor(r) => r.insert(conn).await?.into(),
        Record::Series(r) => r.insert(conn).await?.into(),
        Record::IndustryCategory(r) => r.insert(conn).await?.into(),
    })
}

async fn update_record(
    record: &Record,
    conn: impl PgExecutor<'_>,
) -> sqlx::Result<Option<Record>> {
    Ok(match record {
        Record::Exhibition(r) => r.update(conn).await?.map(Record::from),
        Record::Organizer(r) => r.update(conn).await?.map(Record::from),
        Record::Pavilion(r) => r.update(conn).await?.map(Record::from),
        Record::Exhibitor(r) => r.update(conn).await?.map(Record::from),
        Record::Series(r) => r.update(conn).await?.map(Record::from),
        Record::IndustryCategory(r) => r.update(conn).await?.map(Record::from),
    })
}

/// Lock a row and compare its version with the one the caller read.
async fn lock_checked(
    kind: EntityKind,
    raw_id: i64,
    version: i64,
    conn: impl PgExecutor<'_>,
) -> DirectoryResult<Record> {
    let stored = fetch_record(kind, raw_id, true, conn)
        .await?
        .ok_or_else(|| DirectoryError::not_found(kind, raw_id))?;
    if stored.version() != version {
        return Err(DirectoryError::conflict(format!(
            "{} {} was modified concurrently (expected version {}, found {})",
            kind,
            raw_id,
            version,
            stored.version()
        )));
    }
    Ok(stored)
}

/// SQLSTATEs Postgres raises when it aborts one of two competing transactions.
const DEADLOCK_DETECTED: &str = "40P01";
const SERIALIZATION_FAILURE: &str = "40001";

/// Unique violations and aborted competing transactions surface as conflicts;
/// everything else stays a storage error.
fn storage_error(error: sqlx::Error) -> DirectoryError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DirectoryError::conflict(db.message().to_string())
        }
        sqlx::Error::Database(db)
            if matches!(
                db.code().as_deref(),
                Some(DEADLOCK_DETECTED) | Some(SERIALIZATION_FAILURE)
            ) =>
        {
            DirectoryError::conflict(format!("concurrent write aborted: {}", db.message()))
        }
        _ => DirectoryError::Storage(error),
    }
}

/// Re-map storage errors raised anywhere inside a write transaction.
fn transaction_error(error: DirectoryError) -> DirectoryError {
    match error {
        DirectoryError::Storage(error) => storage_error(error),
        other => other,
    }
}

// =============================================================================
// BaseEntityStore
// =============================================================================

#[async_trait]
impl BaseEntityStore for PostgresEntityStore {
    async fn kind_of(&self, raw_id: i64) -> DirectoryResult<Option<EntityKind>> {
        let union = EntityKind::ALL
            .iter()
            .map(|kind| {
                format!(
                    "SELECT '{}' AS kind FROM {} WHERE id = $1",
                    kind.as_str(),
                    kind.table()
                )
            })
            .collect::<Vec<_>>()
            .join(" UNION ALL ");

        let kind: Option<String> = sqlx::query_scalar(&format!("{} LIMIT 1", union))
            .bind(raw_id)
            .fetch_optional(&self.pool)
            .await?;

        kind.map(|kind| kind.parse().map_err(DirectoryError::Internal))
            .transpose()
    }

    async fn get(&self, kind: EntityKind, raw_id: i64) -> DirectoryResult<Option<Record>> {
        Ok(fetch_record(kind, raw_id, false, &self.pool).await?)
    }

    async fn list_exhibitions(&self) -> DirectoryResult<Vec<Exhibition>> {
        Ok(list_all(EntityKind::Exhibition.table(), &self.pool).await?)
    }

    async fn list_exhibitor_rows(
        &self,
        fair_id: Option<ExhibitionId>,
    ) -> DirectoryResult<Vec<ExhibitorRow>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let exhibitors = sqlx::query_as::<_, Exhibitor>(
            "SELECT * FROM exhibitors WHERE ($1::BIGINT IS NULL OR fair_id = $1) ORDER BY id",
        )
        .bind(fair_id)
        .fetch_all(&mut *tx)
        .await?;

        let fair_ids: Vec<ExhibitionId> = exhibitors.iter().map(|e| e.fair_id).collect();
        let fairs: HashMap<ExhibitionId, Exhibition> =
            sqlx::query_as::<_, Exhibition>("SELECT * FROM exhibitions WHERE id = ANY($1)")
                .bind(&fair_ids)
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .map(|fair| (fair.id, fair))
                .collect();

        tx.commit().await?;

        Ok(exhibitors
            .into_iter()
            .map(|exhibitor| ExhibitorRow {
                fair: fairs.get(&exhibitor.fair_id).cloned(),
                exhibitor,
            })
            .collect())
    }

    async fn list_organizers(&self) -> DirectoryResult<Vec<Organizer>> {
        Ok(list_all(EntityKind::Organizer.table(), &self.pool).await?)
    }

    async fn list_pavilions(&self) -> DirectoryResult<Vec<Pavilion>> {
        Ok(list_all(EntityKind::Pavilion.table(), &self.pool).await?)
    }

    async fn list_series(&self) -> DirectoryResult<Vec<Series>> {
        Ok(list_all(EntityKind::Series.table(), &self.pool).await?)
    }

    async fn list_industries(&self) -> DirectoryResult<Vec<IndustryCategory>> {
        Ok(list_all(EntityKind::IndustryCategory.table(), &self.pool).await?)
    }

    async fn locations(&self) -> DirectoryResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT country, province, city FROM exhibitions
            UNION ALL
            SELECT country, province, city FROM organizers
            UNION ALL
            SELECT country, province, city FROM pavilions
            UNION ALL
            SELECT country, province, city FROM exhibitors
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn insert(&self, record: Record) -> DirectoryResult<Record> {
        let inserted = insert_record(&record, &self.pool)
            .await
            .map_err(storage_error)?;
        debug!(kind = %inserted.kind(), id = inserted.raw_id(), "Inserted record");
        Ok(inserted)
    }

    async fn update(&self, record: Record) -> DirectoryResult<Record> {
        let mut tx = self.pool.begin().await?;
        lock_checked(record.kind(), record.raw_id(), record.version(), &mut *tx).await?;

        let updated = update_record(&record, &mut *tx)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| DirectoryError::not_found(record.kind(), record.raw_id()))?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, kind: EntityKind, raw_id: i64) -> DirectoryResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(raw_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::not_found(kind, raw_id));
        }
        Ok(())
    }

    async fn commit_merge(&self, plan: MergePlan) -> DirectoryResult<MergeOutcome> {
        self.merge_in_transaction(plan)
            .await
            .map_err(transaction_error)
    }

    async fn assign_series(
        &self,
        name: &str,
        exhibition_ids: &[ExhibitionId],
    ) -> DirectoryResult<SeriesAssignment> {
        self.assign_in_transaction(name, exhibition_ids)
            .await
            .map_err(transaction_error)
    }
}

impl PostgresEntityStore {
    async fn merge_in_transaction(&self, plan: MergePlan) -> DirectoryResult<MergeOutcome> {
        let kind = plan.keep.kind();
        let keep_id = plan.keep.raw_id();
        let duplicate_ids = plan.duplicate_ids();

        let mut expected: Vec<(i64, i64)> = plan
            .duplicates
            .iter()
            .map(|dup| (dup.id, dup.version))
            .chain(std::iter::once((keep_id, plan.keep.version())))
            .collect();
        expected.sort_unstable();

        let mut tx = self.pool.begin().await?;

        for (raw_id, version) in expected {
            lock_checked(kind, raw_id, version, &mut *tx).await?;
        }

        update_record(&plan.keep, &mut *tx)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| DirectoryError::not_found(kind, keep_id))?;

        let mut repointed_count = 0;
        for reference in &plan.repoint {
            // Holder rows are locked in id order, the same order assign_series uses
            sqlx::query(&format!(
                "SELECT id FROM {table} WHERE {column} = ANY($1) ORDER BY id FOR UPDATE",
                table = reference.holder().table(),
                column = reference.column(),
            ))
            .bind(&duplicate_ids)
            .execute(&mut *tx)
            .await?;

            let sql = format!(
                r#"
                UPDATE {table}
                SET {column} = $1, version = version + 1, updated_at = NOW()
                WHERE {column} = ANY($2)
                "#,
                table = reference.holder().table(),
                column = reference.column(),
            );
            let result = sqlx::query(&sql)
                .bind(keep_id)
                .bind(&duplicate_ids)
                .execute(&mut *tx)
                .await?;
            repointed_count += result.rows_affected() as usize;
        }

        let deleted = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = ANY($1)",
            kind.table()
        ))
        .bind(&duplicate_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            kind = %kind,
            keep_id,
            merged_count = deleted.rows_affected(),
            repointed_count,
            "Merge committed"
        );

        Ok(MergeOutcome {
            merged_count: deleted.rows_affected() as usize,
            repointed_count,
        })
    }

    async fn assign_in_transaction(
        &self,
        name: &str,
        exhibition_ids: &[ExhibitionId],
    ) -> DirectoryResult<SeriesAssignment> {
        let mut tx = self.pool.begin().await?;

        let locked: Vec<ExhibitionId> = sqlx::query_scalar(
            "SELECT id FROM exhibitions WHERE id = ANY($1) ORDER BY id FOR UPDATE",
        )
        .bind(exhibition_ids)
        .fetch_all(&mut *tx)
        .await?;

        if let Some(missing) = exhibition_ids.iter().find(|id| !locked.contains(id)) {
            return Err(DirectoryError::not_found(EntityKind::Exhibition, *missing));
        }

        let (series, created) = match Series::create_if_absent(name, &mut *tx).await? {
            Some(series) => (series, true),
            None => {
                let series = Series::find_by_name(name, &mut *tx).await?.ok_or_else(|| {
                    DirectoryError::conflict(format!("series '{}' changed concurrently", name))
                })?;
                (series, false)
            }
        };

        let result = sqlx::query(
            r#"
            UPDATE exhibitions
            SET fair_series_id = $1, version = version + 1, updated_at = NOW()
            WHERE id = ANY($2) AND fair_series_id IS DISTINCT FROM $1
            "#,
        )
        .bind(series.id)
        .bind(exhibition_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SeriesAssignment {
            series,
            created,
            affected_count: result.rows_affected() as usize,
        })
    }
}
