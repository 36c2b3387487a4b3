//! Application setup and router construction.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::common::EntityKind;
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// Present when the store is Postgres; used by the health check.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(deps: ServerDeps, db_pool: Option<PgPool>) -> Self {
        Self {
            deps: Arc::new(deps),
            db_pool,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // No configured origins means development: allow any
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let jwt_service = state.deps.jwt_service.clone();

    Router::new()
        .route("/health", get(health_handler))
        // Search
        .route("/exhibitions", get(list_exhibitions_handler))
        .route("/exhibitions/search", post(search_exhibitions_handler))
        .route("/exhibitors/search", post(search_exhibitors_handler))
        .route("/organizers", get(list_organizers_handler))
        .route("/pavilions", get(list_pavilions_handler))
        // Merge
        .route("/exhibitions/merge", merge_route(EntityKind::Exhibition))
        .route("/organizers/merge", merge_route(EntityKind::Organizer))
        .route("/pavilions/merge", merge_route(EntityKind::Pavilion))
        .route("/exhibitors/merge", merge_route(EntityKind::Exhibitor))
        .route("/series/merge", merge_route(EntityKind::Series))
        // Series
        .route(
            "/exhibitions/categorize-series",
            post(categorize_series_handler),
        )
        .route("/series", get(list_series_handler))
        .route("/series/:id/exhibitions", get(series_members_handler))
        // Regions
        .route("/regions/countries", get(countries_handler))
        .route("/regions/provinces", get(provinces_handler))
        .route("/regions/cities", get(cities_handler))
        // Industries
        .route("/industries", post(create_industry_handler))
        .route("/industries/tree", get(industry_tree_handler))
        .route("/industries/fields", get(industry_fields_handler))
        .route(
            "/industries/:id",
            put(update_industry_handler).delete(delete_industry_handler),
        )
        // Search history
        .route(
            "/search-history",
            get(list_history_handler).post(record_history_handler),
        )
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
