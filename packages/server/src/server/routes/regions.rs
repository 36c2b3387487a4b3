use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::Deserialize;

use crate::common::DirectoryResult;
use crate::domains::regions;
use crate::server::app::AppState;

/// Missing parameters behave like unmatched ones: an empty list.
#[derive(Debug, Default, Deserialize)]
pub struct RegionParams {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub province: String,
}

pub async fn countries_handler(
    Extension(state): Extension<AppState>,
) -> DirectoryResult<Json<Vec<String>>> {
    Ok(Json(regions::get_countries(&state.deps).await?))
}

pub async fn provinces_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<RegionParams>,
) -> DirectoryResult<Json<Vec<String>>> {
    Ok(Json(
        regions::get_provinces(&params.country, &state.deps).await?,
    ))
}

pub async fn cities_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<RegionParams>,
) -> DirectoryResult<Json<Vec<String>>> {
    Ok(Json(
        regions::get_cities(&params.country, &params.province, &state.deps).await?,
    ))
}
