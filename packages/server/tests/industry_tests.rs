//! Industry taxonomy integration tests.

mod common;

use crate::common::*;
use directory_core::common::{DirectoryError, IndustryId};
use directory_core::domains::industry::{
    create_industry, delete_industry, industry_fields, industry_tree, update_industry,
    IndustryInput,
};

fn input(name: &str, parent_id: Option<IndustryId>) -> IndustryInput {
    IndustryInput {
        name_zh: name.to_string(),
        name_en: String::new(),
        parent_id,
        sort_order: 0,
    }
}

#[tokio::test]
async fn categories_nest_three_levels() {
    let harness = MemoryHarness::new();
    let deps = &harness.deps;

    let root = create_industry(&input("Machinery", None), &admin(), deps)
        .await
        .unwrap();
    let child = create_industry(&input("Auto", Some(root.id)), &admin(), deps)
        .await
        .unwrap();
    let leaf = create_industry(&input("Parts", Some(child.id)), &admin(), deps)
        .await
        .unwrap();
    assert_eq!((root.level, child.level, leaf.level), (1, 2, 3));

    let err = create_industry(&input("Bolts", Some(leaf.id)), &admin(), deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation(_)));

    let tree = industry_tree(deps).await.unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children[0].children[0].category.id, leaf.id);

    assert_eq!(
        industry_fields(deps).await.unwrap(),
        vec!["Auto", "Machinery", "Parts"]
    );
}

#[tokio::test]
async fn category_cannot_move_under_its_descendant() {
    let harness = MemoryHarness::new();
    let deps = &harness.deps;

    let root = create_industry(&input("Machinery", None), &admin(), deps)
        .await
        .unwrap();
    let child = create_industry(&input("Auto", Some(root.id)), &admin(), deps)
        .await
        .unwrap();

    let err = update_industry(root.id, &input("Machinery", Some(child.id)), &admin(), deps)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation(_)));
}

#[tokio::test]
async fn rename_bumps_version() {
    let harness = MemoryHarness::new();
    let deps = &harness.deps;

    let root = create_industry(&input("Machinery", None), &admin(), deps)
        .await
        .unwrap();
    let renamed = update_industry(root.id, &input("Heavy Machinery", None), &admin(), deps)
        .await
        .unwrap();

    assert_eq!(renamed.name_zh, "Heavy Machinery");
    assert_eq!(renamed.version, root.version + 1);
}

#[tokio::test]
async fn delete_refuses_categories_with_children() {
    let harness = MemoryHarness::new();
    let deps = &harness.deps;

    let root = create_industry(&input("Machinery", None), &admin(), deps)
        .await
        .unwrap();
    let child = create_industry(&input("Auto", Some(root.id)), &admin(), deps)
        .await
        .unwrap();

    let err = delete_industry(root.id, &admin(), deps).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Conflict(_)));

    delete_industry(child.id, &admin(), deps).await.unwrap();
    delete_industry(root.id, &admin(), deps).await.unwrap();
    assert!(industry_tree(deps).await.unwrap().is_empty());
}

#[tokio::test]
async fn taxonomy_changes_require_admin() {
    let harness = MemoryHarness::new();

    let err = create_industry(&input("Machinery", None), &viewer(), &harness.deps)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "permission_denied");
}
