//! HTTP surface tests: routing, JSON shapes, auth and error mapping.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn health_reports_memory_store() {
    let harness = MemoryHarness::new();
    let client = HttpClient::new(harness.deps.clone());

    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["store"], "memory");
}

#[tokio::test]
async fn exhibition_search_returns_page_and_facets() {
    let harness = MemoryHarness::new();
    seed_fair_catalog(harness.store()).await.unwrap();
    let client = HttpClient::new(harness.deps.clone());

    let response = client
        .post(
            "/exhibitions/search",
            json!({ "country": "China", "page": "1", "page_size": 1 }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_count"], 2);
    assert_eq!(response.body["total_pages"], 2);
    assert_eq!(response.body["results"].as_array().unwrap().len(), 1);
    assert_eq!(
        response.body["available_dates"],
        json!(["2025-10-01", "2025-11-01"])
    );
}

#[tokio::test]
async fn exhibition_listing_accepts_query_string() {
    let harness = MemoryHarness::new();
    seed_fair_catalog(harness.store()).await.unwrap();
    let client = HttpClient::new(harness.deps.clone());

    let response = client
        .get("/exhibitions?search_name=messe&sort_by=start_date&sort_order=desc")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_count"], 1);
    assert_eq!(response.body["results"][0]["fair_name"], "Hannover Messe");
}

#[tokio::test]
async fn listing_honours_client_paging_aliases() {
    let harness = MemoryHarness::new();
    seed_fair_catalog(harness.store()).await.unwrap();
    let client = HttpClient::new(harness.deps.clone());

    let response = client.get("/exhibitions?page=1&size=1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_count"], 3);
    assert_eq!(response.body["results"].as_array().unwrap().len(), 1);

    seed_duplicate_organizers(harness.store()).await.unwrap();
    let response = client.get("/organizers?limit=1&keyword=a%20corp").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_count"], 2);
    assert_eq!(response.body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_numeric_id_filter_is_a_400() {
    let harness = MemoryHarness::new();
    seed_fair_catalog(harness.store()).await.unwrap();
    let client = HttpClient::new(harness.deps.clone());

    let response = client.get("/exhibitions?organizer_id=abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "validation_error");

    let response = client
        .post("/exhibitions/search", json!({ "fair_id": "xyz" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_date_filter_is_a_400() {
    let harness = MemoryHarness::new();
    let client = HttpClient::new(harness.deps.clone());

    let response = client
        .post("/exhibitions/search", json!({ "fair_date": "next week" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "validation_error");
}

#[tokio::test]
async fn merge_requires_a_token() {
    let harness = MemoryHarness::new();
    let (keep, duplicate) = seed_duplicate_organizers(harness.store()).await.unwrap();
    let body = json!({
        "keep_id": keep.id.into_raw(),
        "duplicate_ids_to_delete": [duplicate.id.into_raw()],
    });

    let anonymous = HttpClient::new(harness.deps.clone());
    let response = anonymous.post("/organizers/merge", body.clone()).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let viewer = HttpClient::new(harness.deps.clone()).signed_in(&harness.deps, "viewer", false);
    let response = viewer.post("/organizers/merge", body.clone()).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "permission_denied");

    let curator = HttpClient::new(harness.deps.clone()).signed_in(&harness.deps, "curator", true);
    let response = curator.post("/organizers/merge", body.clone()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "success");
    assert_eq!(response.body["merged_count"], 1);

    let replay = curator.post("/organizers/merge", body).await;
    assert_eq!(replay.status, StatusCode::NOT_FOUND);
    assert_eq!(replay.body["error"], "not_found");
}

#[tokio::test]
async fn merge_route_is_bound_to_its_kind() {
    let harness = MemoryHarness::new();
    let (keep, duplicate) = seed_duplicate_organizers(harness.store()).await.unwrap();
    let curator = HttpClient::new(harness.deps.clone()).signed_in(&harness.deps, "curator", true);

    let response = curator
        .post(
            "/pavilions/merge",
            json!({
                "keep_id": keep.id.into_raw(),
                "duplicate_ids": [duplicate.id.into_raw()],
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "integrity_error");
}

#[tokio::test]
async fn categorize_series_then_list_members() {
    let harness = MemoryHarness::new();
    let catalog = seed_fair_catalog(harness.store()).await.unwrap();
    let curator = HttpClient::new(harness.deps.clone()).signed_in(&harness.deps, "curator", true);

    let response = curator
        .post(
            "/exhibitions/categorize-series",
            json!({
                "fair_ids": [catalog.shanghai.id.into_raw(), catalog.beijing.id.into_raw()],
                "custom_series_name": "China Fairs",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Categorized 2 exhibitions into series 'China Fairs'"
    );
    let series_id = response.body["series_id"].as_i64().unwrap();

    let members = curator
        .get(&format!("/series/{}/exhibitions", series_id))
        .await;
    assert_eq!(members.status, StatusCode::OK);
    assert_eq!(members.body.as_array().unwrap().len(), 2);

    let series = curator.get("/series").await;
    assert_eq!(series.body[0]["name"], "China Fairs");
}

#[tokio::test]
async fn region_routes_project_locations() {
    let harness = MemoryHarness::new();
    seed_fair_catalog(harness.store()).await.unwrap();
    let client = HttpClient::new(harness.deps.clone());

    let countries = client.get("/regions/countries").await;
    assert_eq!(countries.body, json!(["China", "Germany"]));

    let provinces = client.get("/regions/provinces?country=China").await;
    assert_eq!(provinces.body, json!(["Beijing", "Shanghai"]));

    let cities = client
        .get("/regions/cities?country=Germany&province=Lower%20Saxony")
        .await;
    assert_eq!(cities.body, json!(["Hannover"]));

    let missing = client.get("/regions/provinces").await;
    assert_eq!(missing.status, StatusCode::OK);
    assert_eq!(missing.body, json!([]));
}

#[tokio::test]
async fn industry_crud_over_http() {
    let harness = MemoryHarness::new();
    let curator = HttpClient::new(harness.deps.clone()).signed_in(&harness.deps, "curator", true);

    let created = curator
        .post("/industries", json!({ "name_zh": "Machinery" }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();

    let updated = curator
        .put(
            &format!("/industries/{}", id),
            json!({ "name_zh": "Heavy Machinery", "sort_order": 2 }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["version"], 2);

    let fields = curator.get("/industries/fields").await;
    assert_eq!(fields.body, json!(["Heavy Machinery"]));

    let deleted = curator.delete(&format!("/industries/{}", id)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let tree = curator.get("/industries/tree").await;
    assert_eq!(tree.body, json!([]));
}

#[tokio::test]
async fn search_history_round_trip() {
    let harness = MemoryHarness::new();
    let client = HttpClient::new(harness.deps.clone());

    client.post("/search-history?keyword=canton", json!(null)).await;
    client.post("/search-history?keyword=%20%20", json!(null)).await;
    let response = client.post("/search-history?keyword=auto", json!(null)).await;
    assert_eq!(response.body, json!(["auto", "canton"]));

    let listed = client.get("/search-history").await;
    assert!(listed.body.is_array());
    assert_eq!(listed.body, json!(["auto", "canton"]));
}
