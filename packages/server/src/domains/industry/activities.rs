//! Industry taxonomy activities

use serde::Deserialize;
use tracing::info;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{DirectoryError, DirectoryResult, EntityKind, IndustryId};
use crate::domains::catalog::{IndustryCategory, Record, MAX_INDUSTRY_DEPTH};
use crate::kernel::ServerDeps;

use super::tree::{build_tree, descendants, field_names, IndustryNode};

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryInput {
    pub name_zh: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub parent_id: Option<IndustryId>,
    #[serde(default)]
    pub sort_order: i32,
}

async fn load(id: IndustryId, deps: &ServerDeps) -> DirectoryResult<IndustryCategory> {
    match deps
        .store
        .get(EntityKind::IndustryCategory, id.into_raw())
        .await?
    {
        Some(Record::IndustryCategory(category)) => Ok(category),
        _ => Err(DirectoryError::not_found(EntityKind::IndustryCategory, id)),
    }
}

/// Level a node gets under `parent_id`.
async fn level_under(parent_id: Option<IndustryId>, deps: &ServerDeps) -> DirectoryResult<i32> {
    let Some(parent_id) = parent_id else {
        return Ok(1);
    };
    let parent = load(parent_id, deps).await?;
    let level = parent.level + 1;
    if level > MAX_INDUSTRY_DEPTH {
        return Err(DirectoryError::validation(format!(
            "industry categories nest at most {} levels deep",
            MAX_INDUSTRY_DEPTH
        )));
    }
    Ok(level)
}

fn checked_names(input: &IndustryInput) -> DirectoryResult<(String, String)> {
    let name_zh = input.name_zh.trim();
    if name_zh.is_empty() {
        return Err(DirectoryError::validation("name_zh must not be blank"));
    }
    Ok((name_zh.to_string(), input.name_en.trim().to_string()))
}

pub async fn industry_tree(deps: &ServerDeps) -> DirectoryResult<Vec<IndustryNode>> {
    Ok(build_tree(deps.store.list_industries().await?))
}

pub async fn industry_fields(deps: &ServerDeps) -> DirectoryResult<Vec<String>> {
    Ok(field_names(&deps.store.list_industries().await?))
}

pub async fn create_industry(
    input: &IndustryInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> DirectoryResult<IndustryCategory> {
    actor.can(AdminCapability::ManageIndustries).check()?;

    let (name_zh, name_en) = checked_names(input)?;
    let level = level_under(input.parent_id, deps).await?;

    let mut category = IndustryCategory::builder()
        .name_zh(name_zh)
        .name_en(name_en)
        .level(level)
        .sort_order(input.sort_order)
        .build();
    category.parent_id = input.parent_id;

    let record = deps.store.insert(category.into()).await?;
    info!(id = record.raw_id(), level, "Created industry category");

    match record {
        Record::IndustryCategory(category) => Ok(category),
        other => Err(DirectoryError::Internal(anyhow::anyhow!(
            "industry insert produced a {} record",
            other.kind()
        ))),
    }
}

/// Rename, reorder or move a category.
///
/// A category with children may only move to a parent at its current level,
/// so the subtree keeps its depth.
pub async fn update_industry(
    id: IndustryId,
    input: &IndustryInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> DirectoryResult<IndustryCategory> {
    actor.can(AdminCapability::ManageIndustries).check()?;

    let (name_zh, name_en) = checked_names(input)?;
    let mut category = load(id, deps).await?;

    if input.parent_id != category.parent_id {
        if let Some(parent_id) = input.parent_id {
            let all = deps.store.list_industries().await?;
            if parent_id == id || descendants(id, &all).contains(&parent_id) {
                return Err(DirectoryError::validation(
                    "an industry category cannot be moved under itself",
                ));
            }
        }

        let level = level_under(input.parent_id, deps).await?;
        if level != category.level {
            let has_children = deps
                .store
                .list_industries()
                .await?
                .iter()
                .any(|c| c.parent_id == Some(id));
            if has_children {
                return Err(DirectoryError::validation(
                    "move the children of this category before changing its level",
                ));
            }
        }
        category.parent_id = input.parent_id;
        category.level = level;
    }

    category.name_zh = name_zh;
    category.name_en = name_en;
    category.sort_order = input.sort_order;

    match deps.store.update(category.into()).await? {
        Record::IndustryCategory(category) => {
            info!(id = %category.id, "Updated industry category");
            Ok(category)
        }
        other => Err(DirectoryError::Internal(anyhow::anyhow!(
            "industry update produced a {} record",
            other.kind()
        ))),
    }
}

/// Delete a leaf category. Categories with children are a conflict.
pub async fn delete_industry(
    id: IndustryId,
    actor: &Actor,
    deps: &ServerDeps,
) -> DirectoryResult<()> {
    actor.can(AdminCapability::ManageIndustries).check()?;

    load(id, deps).await?;
    let child_count = deps
        .store
        .list_industries()
        .await?
        .iter()
        .filter(|c| c.parent_id == Some(id))
        .count();
    if child_count > 0 {
        return Err(DirectoryError::conflict(format!(
            "industry category {} still has {} children",
            id, child_count
        )));
    }

    deps.store
        .delete(EntityKind::IndustryCategory, id.into_raw())
        .await?;
    info!(id = %id, "Deleted industry category");
    Ok(())
}
