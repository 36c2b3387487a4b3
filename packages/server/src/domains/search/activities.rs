//! Search activities - load documents from the store, run the engine
//!
//! Every call is a stateless read: the request carries all filter, sort and
//! paging state.

use chrono::NaiveDate;
use tracing::debug;

use crate::common::DirectoryResult;
use crate::domains::catalog::{Exhibition, Organizer, Pavilion};
use crate::kernel::ServerDeps;

use super::document::ExhibitorHit;
use super::engine::{search, SearchPage};
use super::query::SearchRequest;

pub async fn search_exhibitions(
    request: &SearchRequest,
    today: NaiveDate,
    deps: &ServerDeps,
) -> DirectoryResult<SearchPage<Exhibition>> {
    let query = request.validate(&deps.page_settings)?;
    let documents = deps.store.list_exhibitions().await?;
    let page = search(documents, &query, today);

    debug!(
        total_count = page.total_count,
        page = page.current_page,
        "Exhibition search"
    );
    Ok(page)
}

/// Exhibitors are read together with their exhibitions in one snapshot.
/// A `fair_id` filter narrows the read itself.
pub async fn search_exhibitors(
    request: &SearchRequest,
    today: NaiveDate,
    deps: &ServerDeps,
) -> DirectoryResult<SearchPage<ExhibitorHit>> {
    let query = request.validate(&deps.page_settings)?;
    let rows = deps.store.list_exhibitor_rows(query.fair_id).await?;
    let page = search(rows, &query, today).map(ExhibitorHit::from);

    debug!(
        total_count = page.total_count,
        fair_id = ?query.fair_id,
        "Exhibitor search"
    );
    Ok(page)
}

pub async fn search_organizers(
    request: &SearchRequest,
    today: NaiveDate,
    deps: &ServerDeps,
) -> DirectoryResult<SearchPage<Organizer>> {
    let query = request.validate(&deps.page_settings)?;
    let documents = deps.store.list_organizers().await?;
    Ok(search(documents, &query, today))
}

pub async fn search_pavilions(
    request: &SearchRequest,
    today: NaiveDate,
    deps: &ServerDeps,
) -> DirectoryResult<SearchPage<Pavilion>> {
    let query = request.validate(&deps.page_settings)?;
    let documents = deps.store.list_pavilions().await?;
    Ok(search(documents, &query, today))
}
