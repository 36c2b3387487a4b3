// Common types and utilities shared across the application

pub mod auth;
pub mod delimited;
pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod pagination;
pub mod types;

pub use auth::{Actor, AdminCapability, AuthError};
pub use entity_ids::*;
pub use errors::{DirectoryError, DirectoryResult};
pub use id::Id;
pub use pagination::{PageArgs, PageSettings, ValidatedPageArgs};
pub use types::*;
