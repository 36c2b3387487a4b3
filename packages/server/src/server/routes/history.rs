use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::Deserialize;

use crate::server::app::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RecordParams {
    #[serde(default)]
    pub keyword: String,
}

/// Most recent first, as a bare array of terms.
pub async fn list_history_handler(Extension(state): Extension<AppState>) -> Json<Vec<String>> {
    Json(state.deps.search_history.list())
}

/// Blank keywords are accepted and ignored.
pub async fn record_history_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<RecordParams>,
) -> Json<Vec<String>> {
    state.deps.search_history.record(&params.keyword);
    Json(state.deps.search_history.list())
}
