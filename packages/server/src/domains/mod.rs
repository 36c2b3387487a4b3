// Business domains
pub mod auth;
pub mod catalog;
pub mod history;
pub mod industry;
pub mod merge;
pub mod regions;
pub mod search;
pub mod series;
