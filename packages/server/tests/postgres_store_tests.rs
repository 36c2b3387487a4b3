//! Postgres store tests. Need a Docker daemon for the testcontainers harness:
//! `cargo test -- --ignored`.

mod common;

use crate::common::*;
use directory_core::common::{DirectoryError, EntityKind};
use directory_core::domains::catalog::{Exhibitor, ExpoEdition, Record};
use directory_core::domains::merge::merge_records;
use directory_core::domains::search::{search_exhibitors, SearchRequest};
use directory_core::domains::series::classify;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn ids_are_unique_across_tables(ctx: &TestHarness) {
    let (keep, _) = seed_duplicate_organizers(ctx.store()).await.unwrap();
    let series = create_series(ctx.store(), &format!("Series {}", keep.id))
        .await
        .unwrap();

    assert_ne!(keep.id.into_raw(), series.id.into_raw());
    assert_eq!(
        ctx.store().kind_of(series.id.into_raw()).await.unwrap(),
        Some(EntityKind::Series)
    );
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn stale_update_is_a_conflict(ctx: &TestHarness) {
    let (keep, _) = seed_duplicate_organizers(ctx.store()).await.unwrap();
    let record: Record = keep.into();

    let updated = ctx.store().update(record.clone()).await.unwrap();
    assert_eq!(updated.version(), 2);

    let err = ctx.store().update(record).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Conflict(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn merge_commits_fields_repoints_and_deletes(ctx: &TestHarness) {
    let (keep, duplicate) = seed_duplicate_organizers(ctx.store()).await.unwrap();
    let fair = create_exhibition_for_organizer(ctx.store(), "Canton Fair", duplicate.id)
        .await
        .unwrap();

    let report = merge_records(
        EntityKind::Organizer,
        keep.id.into_raw(),
        &[duplicate.id.into_raw()],
        &admin(),
        &ctx.deps,
    )
    .await
    .unwrap();
    assert_eq!(report.repointed_count, 1);

    let Some(Record::Organizer(merged)) = ctx
        .store()
        .get(EntityKind::Organizer, keep.id.into_raw())
        .await
        .unwrap()
    else {
        panic!("keep organizer missing after merge");
    };
    assert_eq!(merged.website.as_deref(), Some("a.com"));
    assert_eq!(merged.phone, vec!["111", "222"]);

    let Some(Record::Exhibition(fair)) = ctx
        .store()
        .get(EntityKind::Exhibition, fair.id.into_raw())
        .await
        .unwrap()
    else {
        panic!("exhibition missing after merge");
    };
    assert_eq!(fair.organizer_id, Some(keep.id));

    assert_eq!(ctx.store().kind_of(duplicate.id.into_raw()).await.unwrap(), None);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn classify_is_idempotent(ctx: &TestHarness) {
    let catalog = seed_fair_catalog(ctx.store()).await.unwrap();
    let ids = [catalog.shanghai.id.into_raw(), catalog.beijing.id.into_raw()];
    // Unique per run: the database is shared between tests
    let name = format!("Canton Fair {}", catalog.shanghai.id);

    let first = classify(&ids, &name, &admin(), &ctx.deps).await.unwrap();
    let second = classify(&ids, &name, &admin(), &ctx.deps).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.series_id, second.series_id);
    assert_eq!(second.affected_count, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn exhibitor_rows_round_trip_editions(ctx: &TestHarness) {
    let catalog = seed_fair_catalog(ctx.store()).await.unwrap();
    let edition = ExpoEdition::builder()
        .country("Japan")
        .hall("W1")
        .fair_start_date(date(2024, 10, 2))
        .fair_end_date(date(2024, 10, 6))
        .build();
    let booth = create_exhibitor(
        ctx.store(),
        Exhibitor::builder()
            .fair_id(catalog.hannover.id)
            .company_name("Acme")
            .expo_info(vec![edition.clone()])
            .build(),
    )
    .await
    .unwrap();
    assert_eq!(booth.expo_info, vec![edition]);

    let page = search_exhibitors(
        &SearchRequest::builder().fair_id(catalog.hannover.id).build(),
        date(2025, 1, 1),
        &ctx.deps,
    )
    .await
    .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.results[0].fair_name.as_deref(), Some("Hannover Messe"));
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires docker"]
async fn merge_racing_series_assignment_never_surfaces_storage_errors(ctx: &TestHarness) {
    for round in 0..5 {
        let (keep, duplicate) = seed_duplicate_organizers(ctx.store()).await.unwrap();
        let mut fair_ids = Vec::new();
        for index in 0..6 {
            let fair = create_exhibition_for_organizer(
                ctx.store(),
                &format!("Race Fair {} {}", round, index),
                duplicate.id,
            )
            .await
            .unwrap();
            fair_ids.push(fair.id.into_raw());
        }
        let name = format!("Race Series {}", duplicate.id);

        let duplicate_ids = [duplicate.id.into_raw()];
        let merge_actor = admin();
        let classify_actor = admin();
        let (merged, classified) = tokio::join!(
            merge_records(
                EntityKind::Organizer,
                keep.id.into_raw(),
                &duplicate_ids,
                &merge_actor,
                &ctx.deps,
            ),
            classify(&fair_ids, &name, &classify_actor, &ctx.deps),
        );

        for err in [merged.err(), classified.err()].into_iter().flatten() {
            assert!(
                matches!(
                    err,
                    DirectoryError::Conflict(_) | DirectoryError::NotFound { .. }
                ),
                "unexpected error: {:?}",
                err
            );
        }
    }
}
