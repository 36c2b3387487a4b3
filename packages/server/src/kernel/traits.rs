// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "merge these organizers") lives in domain activities that
// use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEntityStore)

use async_trait::async_trait;

use crate::common::{DirectoryResult, EntityKind, ExhibitionId};
use crate::domains::catalog::{
    Exhibition, Exhibitor, IndustryCategory, Location, Organizer, Pavilion, Record, Series,
    WeakRef,
};

// =============================================================================
// Transaction payloads
// =============================================================================

/// An id together with the version observed when it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionedId {
    pub id: i64,
    pub version: i64,
}

/// Everything one merge writes, committed as a single transaction.
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// The keep record with merged field values. Its `version` is the version
    /// observed at read time; the store rejects the plan if it moved.
    pub keep: Record,
    /// Records to delete, in caller order, with their observed versions.
    pub duplicates: Vec<VersionedId>,
    /// Weak-reference fields to rewrite from any duplicate id to the keep id.
    pub repoint: Vec<WeakRef>,
}

impl MergePlan {
    pub fn duplicate_ids(&self) -> Vec<i64> {
        self.duplicates.iter().map(|dup| dup.id).collect()
    }
}

/// What a committed merge changed.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Number of duplicate records deleted.
    pub merged_count: usize,
    /// Number of records whose weak reference was rewritten.
    pub repointed_count: usize,
}

/// Result of a series get-or-create plus membership assignment.
#[derive(Debug, Clone)]
pub struct SeriesAssignment {
    pub series: Series,
    /// Whether the series was created by this call.
    pub created: bool,
    /// Exhibitions whose `fair_series_id` actually changed.
    pub affected_count: usize,
}

/// An exhibitor joined with the exhibition it belongs to.
///
/// `fair` is `None` only when the weak reference points at nothing, which the
/// store tolerates (weak references are advisory outside of merges).
#[derive(Debug, Clone)]
pub struct ExhibitorRow {
    pub exhibitor: Exhibitor,
    pub fair: Option<Exhibition>,
}

// =============================================================================
// Entity Store Trait (Infrastructure - canonical record persistence)
// =============================================================================

/// Canonical persisted records.
///
/// Implementations must make every write method atomic: readers observe either
/// the state before a call or the state after it, never a mix. Listing methods
/// return records in insertion (id) order.
#[async_trait]
pub trait BaseEntityStore: Send + Sync {
    /// Which kind owns this id, if any record has it.
    async fn kind_of(&self, raw_id: i64) -> DirectoryResult<Option<EntityKind>>;

    /// Fetch one record of a known kind.
    async fn get(&self, kind: EntityKind, raw_id: i64) -> DirectoryResult<Option<Record>>;

    async fn list_exhibitions(&self) -> DirectoryResult<Vec<Exhibition>>;

    /// Exhibitors (optionally for one exhibition) joined with their exhibitions,
    /// read from one consistent snapshot.
    async fn list_exhibitor_rows(
        &self,
        fair_id: Option<ExhibitionId>,
    ) -> DirectoryResult<Vec<ExhibitorRow>>;

    async fn list_organizers(&self) -> DirectoryResult<Vec<Organizer>>;

    async fn list_pavilions(&self) -> DirectoryResult<Vec<Pavilion>>;

    async fn list_series(&self) -> DirectoryResult<Vec<Series>>;

    async fn list_industries(&self) -> DirectoryResult<Vec<IndustryCategory>>;

    /// Location triples of every record that carries one.
    async fn locations(&self) -> DirectoryResult<Vec<Location>>;

    /// Insert a record. The store assigns id, version and timestamps.
    async fn insert(&self, record: Record) -> DirectoryResult<Record>;

    /// Overwrite a record. `record.version` must equal the stored version.
    async fn update(&self, record: Record) -> DirectoryResult<Record>;

    /// Delete a single record. Weak references to it are left as they are.
    async fn delete(&self, kind: EntityKind, raw_id: i64) -> DirectoryResult<()>;

    /// Write a merged keep record, repoint references and delete duplicates in
    /// one transaction.
    async fn commit_merge(&self, plan: MergePlan) -> DirectoryResult<MergeOutcome>;

    /// Get-or-create the series named `name` and point every listed exhibition
    /// at it, in one transaction.
    async fn assign_series(
        &self,
        name: &str,
        exhibition_ids: &[ExhibitionId],
    ) -> DirectoryResult<SeriesAssignment>;
}
