//! Search domain - faceted, paginated search over directory records
//!
//! Facets are computed over the candidate set with their own filter removed,
//! so narrowing by date never shrinks the country facet and vice versa.

pub mod activities;
pub mod document;
pub mod engine;
pub mod query;

pub use activities::{search_exhibitions, search_exhibitors, search_organizers, search_pavilions};
pub use document::{ExhibitorHit, Searchable};
pub use engine::{search, SearchPage};
pub use query::{DateStatus, SearchQuery, SearchRequest, SortField, SortOrder, SortSpec};
