use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::common::IndustryId;
use crate::domains::catalog::IndustryCategory;

/// A taxonomy node with its children, siblings ordered by `sort_order` then id.
#[derive(Debug, Clone, Serialize)]
pub struct IndustryNode {
    #[serde(flatten)]
    pub category: IndustryCategory,
    pub children: Vec<IndustryNode>,
}

/// Nest a flat category list. Categories whose parent is missing become roots.
pub fn build_tree(categories: Vec<IndustryCategory>) -> Vec<IndustryNode> {
    let known: HashSet<IndustryId> = categories.iter().map(|c| c.id).collect();

    let mut by_parent: HashMap<Option<IndustryId>, Vec<IndustryCategory>> = HashMap::new();
    for category in categories {
        let parent = category.parent_id.filter(|parent| known.contains(parent));
        by_parent.entry(parent).or_default().push(category);
    }

    attach(None, &mut by_parent)
}

fn attach(
    parent: Option<IndustryId>,
    by_parent: &mut HashMap<Option<IndustryId>, Vec<IndustryCategory>>,
) -> Vec<IndustryNode> {
    let mut siblings = by_parent.remove(&parent).unwrap_or_default();
    siblings.sort_by_key(|category| (category.sort_order, category.id));

    siblings
        .into_iter()
        .map(|category| {
            let children = attach(Some(category.id), by_parent);
            IndustryNode { category, children }
        })
        .collect()
}

/// Flat, sorted, distinct Chinese names: the tag vocabulary for exhibitions.
pub fn field_names(categories: &[IndustryCategory]) -> Vec<String> {
    categories
        .iter()
        .map(|category| category.name_zh.trim())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Ids of every descendant of `root`.
pub fn descendants(root: IndustryId, categories: &[IndustryCategory]) -> HashSet<IndustryId> {
    let mut found = HashSet::new();
    let mut frontier = vec![root];
    while let Some(parent) = frontier.pop() {
        for child in categories.iter().filter(|c| c.parent_id == Some(parent)) {
            if found.insert(child.id) {
                frontier.push(child.id);
            }
        }
    }
    found
}
