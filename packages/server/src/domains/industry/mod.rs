//! Industry domain - the category taxonomy behind exhibition industry tags
//!
//! Exhibitions tag themselves with category names, not ids, so the taxonomy
//! can change without touching exhibition rows.

pub mod activities;
pub mod tree;

pub use activities::{
    create_industry, delete_industry, industry_fields, industry_tree, update_industry,
    IndustryInput,
};
pub use tree::{build_tree, field_names, IndustryNode};
