use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{DirectoryResult, SeriesId};
use crate::domains::catalog::{Exhibition, Series};
use crate::domains::series::{self, ClassifyReport, ClassifyRequest};
use crate::server::app::AppState;
use crate::server::middleware::CurrentActor;

pub async fn categorize_series_handler(
    Extension(state): Extension<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<ClassifyRequest>,
) -> DirectoryResult<Json<ClassifyReport>> {
    let report = series::classify(
        &request.fair_ids,
        &request.custom_series_name,
        &actor,
        &state.deps,
    )
    .await?;
    Ok(Json(report))
}

pub async fn list_series_handler(
    Extension(state): Extension<AppState>,
) -> DirectoryResult<Json<Vec<Series>>> {
    Ok(Json(series::list_series(&state.deps).await?))
}

pub async fn series_members_handler(
    Extension(state): Extension<AppState>,
    Path(series_id): Path<SeriesId>,
) -> DirectoryResult<Json<Vec<Exhibition>>> {
    Ok(Json(series::series_members(series_id, &state.deps).await?))
}
