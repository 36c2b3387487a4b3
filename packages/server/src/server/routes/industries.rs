use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};

use crate::common::{DirectoryResult, IndustryId};
use crate::domains::catalog::IndustryCategory;
use crate::domains::industry::{self, IndustryInput, IndustryNode};
use crate::server::app::AppState;
use crate::server::middleware::CurrentActor;

pub async fn industry_tree_handler(
    Extension(state): Extension<AppState>,
) -> DirectoryResult<Json<Vec<IndustryNode>>> {
    Ok(Json(industry::industry_tree(&state.deps).await?))
}

pub async fn industry_fields_handler(
    Extension(state): Extension<AppState>,
) -> DirectoryResult<Json<Vec<String>>> {
    Ok(Json(industry::industry_fields(&state.deps).await?))
}

pub async fn create_industry_handler(
    Extension(state): Extension<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(input): Json<IndustryInput>,
) -> DirectoryResult<(StatusCode, Json<IndustryCategory>)> {
    let category = industry::create_industry(&input, &actor, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_industry_handler(
    Extension(state): Extension<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<IndustryId>,
    Json(input): Json<IndustryInput>,
) -> DirectoryResult<Json<IndustryCategory>> {
    Ok(Json(
        industry::update_industry(id, &input, &actor, &state.deps).await?,
    ))
}

pub async fn delete_industry_handler(
    Extension(state): Extension<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<IndustryId>,
) -> DirectoryResult<StatusCode> {
    industry::delete_industry(id, &actor, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
