//! Regions domain - country/province/city projections of record locations

pub mod hierarchy;

pub use hierarchy::RegionHierarchy;

use crate::common::DirectoryResult;
use crate::kernel::ServerDeps;

/// Snapshot of every location currently in the store.
pub async fn load_hierarchy(deps: &ServerDeps) -> DirectoryResult<RegionHierarchy> {
    Ok(RegionHierarchy::from_locations(
        deps.store.locations().await?,
    ))
}

pub async fn get_countries(deps: &ServerDeps) -> DirectoryResult<Vec<String>> {
    Ok(load_hierarchy(deps).await?.countries())
}

pub async fn get_provinces(country: &str, deps: &ServerDeps) -> DirectoryResult<Vec<String>> {
    Ok(load_hierarchy(deps).await?.provinces(country))
}

pub async fn get_cities(
    country: &str,
    province: &str,
    deps: &ServerDeps,
) -> DirectoryResult<Vec<String>> {
    Ok(load_hierarchy(deps).await?.cities(country, province))
}
