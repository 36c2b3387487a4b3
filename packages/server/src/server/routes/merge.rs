use axum::{
    extract::Extension,
    routing::{post, MethodRouter},
    Json,
};

use crate::common::{DirectoryResult, EntityKind};
use crate::domains::merge::{merge_records, MergeReport, MergeRequest};
use crate::server::app::AppState;
use crate::server::middleware::CurrentActor;

async fn merge_handler(
    kind: EntityKind,
    state: AppState,
    actor: CurrentActor,
    request: MergeRequest,
) -> DirectoryResult<Json<MergeReport>> {
    let report = merge_records(
        kind,
        request.keep_id,
        &request.duplicate_ids_to_delete,
        &actor.0,
        &state.deps,
    )
    .await?;
    Ok(Json(report))
}

/// `POST /<kind>/merge` for one entity kind.
pub fn merge_route(kind: EntityKind) -> MethodRouter {
    post(
        move |Extension(state): Extension<AppState>,
              actor: CurrentActor,
              Json(request): Json<MergeRequest>| async move {
            merge_handler(kind, state, actor, request).await
        },
    )
}
