//! Search endpoints. POST takes a JSON body, GET the same fields as a query string.

use axum::{
    extract::{Extension, Query},
    Json,
};
use chrono::Utc;

use crate::common::DirectoryResult;
use crate::domains::catalog::{Exhibition, Organizer, Pavilion};
use crate::domains::search::{self, ExhibitorHit, SearchPage, SearchRequest};
use crate::server::app::AppState;

pub async fn search_exhibitions_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<SearchRequest>,
) -> DirectoryResult<Json<SearchPage<Exhibition>>> {
    let today = Utc::now().date_naive();
    Ok(Json(
        search::search_exhibitions(&request, today, &state.deps).await?,
    ))
}

pub async fn list_exhibitions_handler(
    Extension(state): Extension<AppState>,
    Query(request): Query<SearchRequest>,
) -> DirectoryResult<Json<SearchPage<Exhibition>>> {
    let today = Utc::now().date_naive();
    Ok(Json(
        search::search_exhibitions(&request, today, &state.deps).await?,
    ))
}

pub async fn search_exhibitors_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<SearchRequest>,
) -> DirectoryResult<Json<SearchPage<ExhibitorHit>>> {
    let today = Utc::now().date_naive();
    Ok(Json(
        search::search_exhibitors(&request, today, &state.deps).await?,
    ))
}

pub async fn list_organizers_handler(
    Extension(state): Extension<AppState>,
    Query(request): Query<SearchRequest>,
) -> DirectoryResult<Json<SearchPage<Organizer>>> {
    let today = Utc::now().date_naive();
    Ok(Json(
        search::search_organizers(&request, today, &state.deps).await?,
    ))
}

pub async fn list_pavilions_handler(
    Extension(state): Extension<AppState>,
    Query(request): Query<SearchRequest>,
) -> DirectoryResult<Json<SearchPage<Pavilion>>> {
    let today = Utc::now().date_naive();
    Ok(Json(
        search::search_pavilions(&request, today, &state.deps).await?,
    ))
}
