//! In-process entity store.
//!
//! Every record lives in one id-ordered map, so ids are unique across kinds and
//! listing in map order is insertion order. Write methods take the lock once,
//! validate everything, then mutate; nothing after the first mutation can fail,
//! which makes each call all-or-nothing for concurrent readers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::common::{DirectoryError, DirectoryResult, EntityKind, ExhibitionId};
use crate::domains::catalog::{
    Exhibition, IndustryCategory, Location, Organizer, Pavilion, Record, Series,
};
use crate::kernel::traits::{
    BaseEntityStore, ExhibitorRow, MergeOutcome, MergePlan, SeriesAssignment,
};

#[derive(Debug, Default)]
struct Tables {
    records: BTreeMap<i64, Record>,
    last_id: i64,
}

impl Tables {
    fn get(&self, kind: EntityKind, raw_id: i64) -> Option<&Record> {
        self.records
            .get(&raw_id)
            .filter(|record| record.kind() == kind)
    }

    fn collect<T: Clone>(&self, pick: impl Fn(&Record) -> Option<&T>) -> Vec<T> {
        self.records.values().filter_map(pick).cloned().collect()
    }

    fn series_named(&self, name: &str) -> Option<&Series> {
        self.records.values().find_map(|record| match record {
            Record::Series(series) if series.name == name => Some(series),
            _ => None,
        })
    }

    fn ensure_series_name_free(&self, record: &Record) -> DirectoryResult<()> {
        if let Record::Series(series) = record {
            if let Some(existing) = self.series_named(&series.name) {
                if existing.id != series.id {
                    return Err(DirectoryError::conflict(format!(
                        "series '{}' already exists",
                        series.name
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_version(&self, kind: EntityKind, raw_id: i64, version: i64) -> DirectoryResult<()> {
        let stored = self
            .get(kind, raw_id)
            .ok_or_else(|| DirectoryError::not_found(kind, raw_id))?;
        if stored.version() != version {
            return Err(stale(kind, raw_id, version, stored.version()));
        }
        Ok(())
    }

    fn insert(&mut self, mut record: Record) -> Record {
        self.last_id += 1;
        record.assign(self.last_id, Utc::now());
        self.records.insert(self.last_id, record.clone());
        record
    }

    /// Caller has already checked existence and version.
    fn overwrite(&mut self, mut record: Record) -> Record {
        record.touch(Utc::now());
        self.records.insert(record.raw_id(), record.clone());
        record
    }
}

fn stale(kind: EntityKind, raw_id: i64, expected: i64, found: i64) -> DirectoryError {
    DirectoryError::conflict(format!(
        "{} {} was modified concurrently (expected version {}, found {})",
        kind, raw_id, expected, found
    ))
}

/// Entity store held entirely in memory. Used when no database is configured
/// and by the test suites.
#[derive(Debug, Default)]
pub struct MemoryEntityStore {
    state: RwLock<Tables>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records of every kind.
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BaseEntityStore for MemoryEntityStore {
    async fn kind_of(&self, raw_id: i64) -> DirectoryResult<Option<EntityKind>> {
        Ok(self.state.read().await.records.get(&raw_id).map(Record::kind))
    }

    async fn get(&self, kind: EntityKind, raw_id: i64) -> DirectoryResult<Option<Record>> {
        Ok(self.state.read().await.get(kind, raw_id).cloned())
    }

    async fn list_exhibitions(&self) -> DirectoryResult<Vec<Exhibition>> {
        Ok(self.state.read().await.collect(|record| match record {
            Record::Exhibition(r) => Some(r),
            _ => None,
        }))
    }

    async fn list_exhibitor_rows(
        &self,
        fair_id: Option<ExhibitionId>,
    ) -> DirectoryResult<Vec<ExhibitorRow>> {
        let tables = self.state.read().await;
        let rows = tables
            .records
            .values()
            .filter_map(|record| match record {
                Record::Exhibitor(exhibitor)
                    if fair_id.map_or(true, |wanted| exhibitor.fair_id == wanted) =>
                {
                    Some(exhibitor)
                }
                _ => None,
            })
            .map(|exhibitor| {
                let fair = match tables.get(EntityKind::Exhibition, exhibitor.fair_id.into_raw()) {
                    Some(Record::Exhibition(fair)) => Some(fair.clone()),
                    _ => None,
                };
                ExhibitorRow {
                    exhibitor: exhibitor.clone(),
                    fair,
                }
            })
            .collect();
        Ok(rows)
    }

    async fn list_organizers(&self) -> DirectoryResult<Vec<Organizer>> {
        Ok(self.state.read().await.collect(|record| match record {
            Record::Organizer(r) => Some(r),
            _ => None,
        }))
    }

    async fn list_pavilions(&self) -> DirectoryResult<Vec<Pavilion>> {
        Ok(self.state.read().await.collect(|record| match record {
            Record::Pavilion(r) => Some(r),
            _ => None,
        }))
    }

    async fn list_series(&self) -> DirectoryResult<Vec<Series>> {
        Ok(self.state.read().await.collect(|record| match record {
            Record::Series(r) => Some(r),
            _ => None,
        }))
    }

    async fn list_industries(&self) -> DirectoryResult<Vec<IndustryCategory>> {
        Ok(self.state.read().await.collect(|record| match record {
            Record::IndustryCategory(r) => Some(r),
            _ => None,
        }))
    }

    async fn locations(&self) -> DirectoryResult<Vec<Location>> {
        Ok(self
            .state
            .read()
            .await
            .records
            .values()
            .filter_map(Record::location)
            .collect())
    }

    async fn insert(&self, record: Record) -> DirectoryResult<Record> {
        let mut tables = self.state.write().await;
        tables.ensure_series_name_free(&record)?;
        let record = tables.insert(record);
        debug!(kind = %record.kind(), id = record.raw_id(), "Inserted record");
        Ok(record)
    }

    async fn update(&self, record: Record) -> DirectoryResult<Record> {
        let mut tables = self.state.write().await;
        tables.check_version(record.kind(), record.raw_id(), record.version())?;
        tables.ensure_series_name_free(&record)?;
        Ok(tables.overwrite(record))
    }

    async fn delete(&self, kind: EntityKind, raw_id: i64) -> DirectoryResult<()> {
        let mut tables = self.state.write().await;
        if tables.get(kind, raw_id).is_none() {
            return Err(DirectoryError::not_found(kind, raw_id));
        }
        tables.records.remove(&raw_id);
        Ok(())
    }

    async fn commit_merge(&self, plan: MergePlan) -> DirectoryResult<MergeOutcome> {
        let kind = plan.keep.kind();
        let keep_id = plan.keep.raw_id();
        let duplicate_ids = plan.duplicate_ids();

        let mut tables = self.state.write().await;

        // Validate the whole plan before touching anything
        tables.check_version(kind, keep_id, plan.keep.version())?;
        for duplicate in &plan.duplicates {
            tables.check_version(kind, duplicate.id, duplicate.version)?;
        }

        tables.overwrite(plan.keep);

        let now = Utc::now();
        let mut repointed_count = 0;
        for record in tables.records.values_mut() {
            let holder = record.kind();
            let mut changed = false;
            for reference in plan.repoint.iter().filter(|r| r.holder() == holder) {
                changed |= reference.repoint(record, &duplicate_ids, keep_id);
            }
            if changed {
                record.touch(now);
                repointed_count += 1;
            }
        }

        for raw_id in &duplicate_ids {
            tables.records.remove(raw_id);
        }

        Ok(MergeOutcome {
            merged_count: duplicate_ids.len(),
            repointed_count,
        })
    }

    async fn assign_series(
        &self,
        name: &str,
        exhibition_ids: &[ExhibitionId],
    ) -> DirectoryResult<SeriesAssignment> {
        let mut tables = self.state.write().await;

        for id in exhibition_ids {
            if tables.get(EntityKind::Exhibition, id.into_raw()).is_none() {
                return Err(DirectoryError::not_found(EntityKind::Exhibition, *id));
            }
        }

        let (series, created) = match tables.series_named(name) {
            Some(existing) => (existing.clone(), false),
            None => match tables.insert(Series::builder().name(name).build().into()) {
                Record::Series(series) => (series, true),
                other => {
                    return Err(DirectoryError::Internal(anyhow::anyhow!(
                        "series insert produced a {} record",
                        other.kind()
                    )))
                }
            },
        };

        let now = Utc::now();
        let mut affected_count = 0;
        for id in exhibition_ids {
            if let Some(Record::Exhibition(fair)) = tables.records.get_mut(&id.into_raw()) {
                if fair.fair_series_id != Some(series.id) {
                    fair.fair_series_id = Some(series.id);
                    fair.version += 1;
                    fair.updated_at = now;
                    affected_count += 1;
                }
            }
        }

        Ok(SeriesAssignment {
            series,
            created,
            affected_count,
        })
    }
}
