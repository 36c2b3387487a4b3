/// Capabilities in the exhibition directory
///
/// Every capability is admin-only; the enum exists so call sites say what
/// they are about to do and logs can record it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCapability {
    /// Merge duplicate records into a canonical record
    MergeRecords,

    /// Group exhibitions into a series
    ClassifySeries,

    /// Create, edit and delete industry categories
    ManageIndustries,

    /// Full admin access to all operations
    FullAdmin,
}

impl AdminCapability {
    /// Check if this capability requires admin access
    pub fn requires_admin(&self) -> bool {
        true
    }
}
