//! Typed id definitions for all directory entities.
//!
//! # Example
//!
//! ```rust
//! use directory_core::common::{ExhibitionId, OrganizerId};
//!
//! let fair_id = ExhibitionId::from_raw(1);
//! let organizer_id = OrganizerId::from_raw(10);
//!
//! // This would be a compile error:
//! // let wrong: OrganizerId = fair_id;
//! # let _ = (fair_id, organizer_id);
//! ```

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Exhibition entities (one edition of a trade show).
pub struct ExhibitionMarker;

/// Marker type for Organizer entities.
pub struct OrganizerMarker;

/// Marker type for Pavilion entities (venues).
pub struct PavilionMarker;

/// Marker type for Exhibitor entities.
pub struct ExhibitorMarker;

/// Marker type for Series entities (recurring exhibition groupings).
pub struct SeriesMarker;

/// Marker type for IndustryCategory entities.
pub struct IndustryMarker;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed id for Exhibition entities.
pub type ExhibitionId = Id<ExhibitionMarker>;

/// Typed id for Organizer entities.
pub type OrganizerId = Id<OrganizerMarker>;

/// Typed id for Pavilion entities.
pub type PavilionId = Id<PavilionMarker>;

/// Typed id for Exhibitor entities.
pub type ExhibitorId = Id<ExhibitorMarker>;

/// Typed id for Series entities.
pub type SeriesId = Id<SeriesMarker>;

/// Typed id for IndustryCategory entities.
pub type IndustryId = Id<IndustryMarker>;
