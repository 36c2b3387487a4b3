// Exhibition Directory - API Core
//
// Backend for a directory of trade-show exhibitions, organizers, venues and
// exhibitors. Records arrive from crawl/import producers; administrators curate
// them through faceted search, duplicate merging and series classification.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
