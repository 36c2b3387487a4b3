//! Test fixtures for creating test data.
//!
//! Fixtures go through the store trait, so the same data set loads into the
//! memory store and into Postgres.

#![allow(dead_code)]

use anyhow::{bail, Result};
use chrono::NaiveDate;
use directory_core::common::{ExhibitionId, OrganizerId, PavilionId};
use directory_core::domains::catalog::{
    Exhibition, Exhibitor, ExpoEdition, IndustryCategory, Organizer, Pavilion, Record, Series,
};
use directory_core::kernel::BaseEntityStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub async fn create_exhibition(
    store: &dyn BaseEntityStore,
    exhibition: Exhibition,
) -> Result<Exhibition> {
    match store.insert(exhibition.into()).await? {
        Record::Exhibition(exhibition) => Ok(exhibition),
        other => bail!("expected an exhibition, got {}", other.kind()),
    }
}

pub async fn create_organizer(
    store: &dyn BaseEntityStore,
    organizer: Organizer,
) -> Result<Organizer> {
    match store.insert(organizer.into()).await? {
        Record::Organizer(organizer) => Ok(organizer),
        other => bail!("expected an organizer, got {}", other.kind()),
    }
}

pub async fn create_pavilion(store: &dyn BaseEntityStore, pavilion: Pavilion) -> Result<Pavilion> {
    match store.insert(pavilion.into()).await? {
        Record::Pavilion(pavilion) => Ok(pavilion),
        other => bail!("expected a pavilion, got {}", other.kind()),
    }
}

pub async fn create_exhibitor(
    store: &dyn BaseEntityStore,
    exhibitor: Exhibitor,
) -> Result<Exhibitor> {
    match store.insert(exhibitor.into()).await? {
        Record::Exhibitor(exhibitor) => Ok(exhibitor),
        other => bail!("expected an exhibitor, got {}", other.kind()),
    }
}

pub async fn create_series(store: &dyn BaseEntityStore, name: &str) -> Result<Series> {
    match store.insert(Series::builder().name(name).build().into()).await? {
        Record::Series(series) => Ok(series),
        other => bail!("expected a series, got {}", other.kind()),
    }
}

pub async fn create_industry(
    store: &dyn BaseEntityStore,
    category: IndustryCategory,
) -> Result<IndustryCategory> {
    match store.insert(category.into()).await? {
        Record::IndustryCategory(category) => Ok(category),
        other => bail!("expected an industry category, got {}", other.kind()),
    }
}

pub async fn create_fair(
    store: &dyn BaseEntityStore,
    name: &str,
    country: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Exhibition> {
    create_exhibition(
        store,
        Exhibition::builder()
            .fair_name(name)
            .country(country)
            .fair_start_date(start)
            .fair_end_date(end)
            .build(),
    )
    .await
}

/// Two Chinese fairs and one German fair, one with "Expo" in its name.
pub struct FairCatalog {
    pub shanghai: Exhibition,
    pub beijing: Exhibition,
    pub hannover: Exhibition,
}

pub async fn seed_fair_catalog(store: &dyn BaseEntityStore) -> Result<FairCatalog> {
    let shanghai = create_exhibition(
        store,
        Exhibition::builder()
            .fair_name("Shanghai Auto Expo")
            .country("China")
            .province("Shanghai")
            .city("Shanghai")
            .fair_start_date(date(2025, 10, 1))
            .fair_end_date(date(2025, 10, 5))
            .build(),
    )
    .await?;
    let beijing = create_exhibition(
        store,
        Exhibition::builder()
            .fair_name("Beijing Book Fair")
            .country("China")
            .province("Beijing")
            .city("Beijing")
            .fair_start_date(date(2025, 11, 1))
            .fair_end_date(date(2025, 11, 3))
            .build(),
    )
    .await?;
    let hannover = create_exhibition(
        store,
        Exhibition::builder()
            .fair_name("Hannover Messe")
            .country("Germany")
            .province("Lower Saxony")
            .city("Hannover")
            .fair_start_date(date(2025, 4, 7))
            .fair_end_date(date(2025, 4, 11))
            .build(),
    )
    .await?;

    Ok(FairCatalog {
        shanghai,
        beijing,
        hannover,
    })
}

/// Organizers 10/11 style pair: the duplicate carries the data the keep lacks.
pub async fn seed_duplicate_organizers(
    store: &dyn BaseEntityStore,
) -> Result<(Organizer, Organizer)> {
    let keep = create_organizer(
        store,
        Organizer::builder()
            .organizer_name("A Corp")
            .phone(vec!["111".to_string()])
            .build(),
    )
    .await?;
    let duplicate = create_organizer(
        store,
        Organizer::builder()
            .organizer_name("A Corp Ltd")
            .website("a.com")
            .phone(vec!["222".to_string()])
            .build(),
    )
    .await?;
    Ok((keep, duplicate))
}

pub async fn create_exhibition_for_organizer(
    store: &dyn BaseEntityStore,
    name: &str,
    organizer_id: OrganizerId,
) -> Result<Exhibition> {
    create_exhibition(
        store,
        Exhibition::builder()
            .fair_name(name)
            .organizer_id(organizer_id)
            .build(),
    )
    .await
}

pub async fn create_exhibition_at_pavilion(
    store: &dyn BaseEntityStore,
    name: &str,
    pavilion_id: PavilionId,
) -> Result<Exhibition> {
    create_exhibition(
        store,
        Exhibition::builder()
            .fair_name(name)
            .pavilion_id(pavilion_id)
            .build(),
    )
    .await
}

pub async fn create_booth(
    store: &dyn BaseEntityStore,
    fair_id: ExhibitionId,
    company: &str,
    editions: Vec<ExpoEdition>,
) -> Result<Exhibitor> {
    create_exhibitor(
        store,
        Exhibitor::builder()
            .fair_id(fair_id)
            .company_name(company)
            .expo_info(editions)
            .build(),
    )
    .await
}
