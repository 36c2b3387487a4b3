/// Authorization module for the exhibition directory
///
/// Provides a fluent API for authorization checks in activity code:
///
/// ```rust
/// use directory_core::common::auth::{Actor, AdminCapability};
///
/// let actor = Actor::new("admin-1", true);
/// actor.can(AdminCapability::MergeRecords).check().unwrap();
/// ```
///
/// The authentication layer decides who the caller is and whether they are an
/// admin; this module only checks the capability at the point of use.
mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::AdminCapability;
pub use errors::AuthError;
