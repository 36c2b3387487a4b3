//! Series activities - get-or-create a series and assign exhibitions to it

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{DirectoryError, DirectoryResult, EntityKind, ExhibitionId, SeriesId};
use crate::domains::catalog::{Exhibition, Series};
use crate::kernel::ServerDeps;

/// Shortest accepted series name, in characters, after trimming.
pub const MIN_SERIES_NAME_CHARS: usize = 2;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    pub fair_ids: Vec<i64>,
    pub custom_series_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    pub series_id: SeriesId,
    pub series_name: String,
    pub created: bool,
    pub affected_count: usize,
    pub message: String,
}

// ============================================================================
// Activities
// ============================================================================

/// Trim and check a series name.
pub fn normalize_series_name(raw: &str) -> DirectoryResult<String> {
    let name = raw.trim();
    if name.chars().count() < MIN_SERIES_NAME_CHARS {
        return Err(DirectoryError::validation(format!(
            "series name must be at least {} characters",
            MIN_SERIES_NAME_CHARS
        )));
    }
    Ok(name.to_string())
}

/// Point every listed exhibition at the series named `series_name`, creating
/// the series on first use. Running it again with the same input changes
/// nothing and returns the same series id.
pub async fn classify(
    exhibition_ids: &[i64],
    series_name: &str,
    actor: &Actor,
    deps: &ServerDeps,
) -> DirectoryResult<ClassifyReport> {
    actor.can(AdminCapability::ClassifySeries).check()?;

    let ids: IndexSet<i64> = exhibition_ids.iter().copied().collect();
    if ids.is_empty() {
        return Err(DirectoryError::validation("fair_ids must not be empty"));
    }
    let name = normalize_series_name(series_name)?;

    for raw_id in &ids {
        match deps.store.kind_of(*raw_id).await? {
            Some(EntityKind::Exhibition) => {}
            Some(other) => {
                return Err(DirectoryError::integrity(format!(
                    "id {} is a {}, not an exhibition",
                    raw_id, other
                )))
            }
            None => return Err(DirectoryError::not_found(EntityKind::Exhibition, *raw_id)),
        }
    }

    let ids: Vec<ExhibitionId> = ids.into_iter().map(ExhibitionId::from_raw).collect();
    let assignment = deps.store.assign_series(&name, &ids).await?;

    info!(
        series_id = %assignment.series.id,
        series_name = %name,
        created = assignment.created,
        affected_count = assignment.affected_count,
        actor = ?actor.subject(),
        "Classified exhibitions into series"
    );

    Ok(ClassifyReport {
        series_id: assignment.series.id,
        series_name: assignment.series.name,
        created: assignment.created,
        affected_count: assignment.affected_count,
        message: format!(
            "Categorized {} exhibitions into series '{}'",
            ids.len(),
            name
        ),
    })
}

/// All series, oldest first.
pub async fn list_series(deps: &ServerDeps) -> DirectoryResult<Vec<Series>> {
    deps.store.list_series().await
}

/// Exhibitions currently assigned to a series.
pub async fn series_members(
    series_id: SeriesId,
    deps: &ServerDeps,
) -> DirectoryResult<Vec<Exhibition>> {
    if deps
        .store
        .get(EntityKind::Series, series_id.into_raw())
        .await?
        .is_none()
    {
        return Err(DirectoryError::not_found(EntityKind::Series, series_id));
    }

    Ok(deps
        .store
        .list_exhibitions()
        .await?
        .into_iter()
        .filter(|fair| fair.fair_series_id == Some(series_id))
        .collect())
}
