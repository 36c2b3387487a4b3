//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! activities. The entity store sits behind `BaseEntityStore` so the same
//! activities run against Postgres in production and memory in tests.

use std::sync::Arc;

use crate::common::PageSettings;
use crate::domains::auth::JwtService;
use crate::domains::history::SearchHistoryLog;
use crate::kernel::{BaseEntityStore, MemoryEntityStore};

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseEntityStore>,
    /// Bounds for caller-supplied page sizes
    pub page_settings: PageSettings,
    /// Recent search terms, shared by every caller of this process
    pub search_history: Arc<SearchHistoryLog>,
    /// JWT service for token verification (and issuance in tooling)
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        store: Arc<dyn BaseEntityStore>,
        page_settings: PageSettings,
        search_history: Arc<SearchHistoryLog>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            store,
            page_settings,
            search_history,
            jwt_service,
        }
    }

    /// Dependencies over a fresh in-memory store with default settings.
    pub fn in_memory(jwt_service: Arc<JwtService>) -> Self {
        Self::new(
            Arc::new(MemoryEntityStore::new()),
            PageSettings::default(),
            Arc::new(SearchHistoryLog::default()),
            jwt_service,
        )
    }
}
