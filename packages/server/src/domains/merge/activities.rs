//! Merge activities - consolidate duplicate records into a keep record
//!
//! Validation happens up front against a read of every involved record; the
//! store then re-checks versions under row locks and commits field merge,
//! reference repoint and duplicate deletion as one transaction.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{DirectoryError, DirectoryResult, EntityKind};
use crate::domains::catalog::{Record, WeakRef};
use crate::kernel::{MergePlan, ServerDeps, VersionedId};

use super::policy::absorb_record;

// ============================================================================
// Types
// ============================================================================

/// Merge request as received over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    pub keep_id: i64,
    #[serde(alias = "duplicate_ids")]
    pub duplicate_ids_to_delete: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub status: &'static str,
    pub kind: EntityKind,
    pub keep_id: i64,
    pub merged_count: usize,
    pub repointed_count: usize,
}

// ============================================================================
// Activities
// ============================================================================

/// Kinds that may be merged.
pub fn is_mergeable(kind: EntityKind) -> bool {
    !matches!(kind, EntityKind::IndustryCategory)
}

/// Load a record that must exist as `kind`.
///
/// An id owned by another kind is an integrity error, not a missing record.
async fn load(kind: EntityKind, raw_id: i64, deps: &ServerDeps) -> DirectoryResult<Record> {
    if let Some(record) = deps.store.get(kind, raw_id).await? {
        return Ok(record);
    }
    match deps.store.kind_of(raw_id).await? {
        Some(actual) => Err(DirectoryError::integrity(format!(
            "id {} is a {}, not a {}",
            raw_id, actual, kind
        ))),
        None => Err(DirectoryError::not_found(kind, raw_id)),
    }
}

/// Merge `duplicate_ids` into `keep_id`.
///
/// Repeated duplicate ids are collapsed to their first occurrence. Not
/// idempotent: replaying a merge fails with `NotFound` for the consumed ids.
pub async fn merge_records(
    kind: EntityKind,
    keep_id: i64,
    duplicate_ids: &[i64],
    actor: &Actor,
    deps: &ServerDeps,
) -> DirectoryResult<MergeReport> {
    actor.can(AdminCapability::MergeRecords).check()?;

    if !is_mergeable(kind) {
        return Err(DirectoryError::validation(format!(
            "{} records cannot be merged",
            kind
        )));
    }

    let duplicate_ids: IndexSet<i64> = duplicate_ids.iter().copied().collect();
    if duplicate_ids.is_empty() {
        return Err(DirectoryError::validation(
            "duplicate_ids_to_delete must not be empty",
        ));
    }
    if duplicate_ids.contains(&keep_id) {
        return Err(DirectoryError::integrity(format!(
            "keep_id {} is also listed as a duplicate",
            keep_id
        )));
    }

    let keep = load(kind, keep_id, deps).await?;
    let mut duplicates = Vec::with_capacity(duplicate_ids.len());
    for raw_id in &duplicate_ids {
        duplicates.push(load(kind, *raw_id, deps).await?);
    }

    let mut merged = keep;
    for duplicate in &duplicates {
        absorb_record(&mut merged, duplicate)?;
    }

    let plan = MergePlan {
        keep: merged,
        duplicates: duplicates
            .iter()
            .map(|record| VersionedId {
                id: record.raw_id(),
                version: record.version(),
            })
            .collect(),
        repoint: WeakRef::targeting(kind),
    };

    let outcome = deps.store.commit_merge(plan).await?;

    info!(
        kind = %kind,
        keep_id,
        duplicate_ids = ?duplicate_ids,
        merged_count = outcome.merged_count,
        repointed_count = outcome.repointed_count,
        actor = ?actor.subject(),
        "Merged duplicate records"
    );

    Ok(MergeReport {
        status: "success",
        kind,
        keep_id,
        merged_count: outcome.merged_count,
        repointed_count: outcome.repointed_count,
    })
}
