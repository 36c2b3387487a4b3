//! Catalog domain - the canonical records held by the entity store

pub mod models;

pub use models::{
    Exhibition, Exhibitor, ExpoEdition, IndustryCategory, Location, Organizer, Pavilion, Record,
    Series, WeakRef, MAX_INDUSTRY_DEPTH,
};
