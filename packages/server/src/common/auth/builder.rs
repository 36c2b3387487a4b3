use super::{AdminCapability, AuthError};

/// Entry point for authorization checks
///
/// Usage:
/// ```
/// use directory_core::common::auth::{Actor, AdminCapability};
///
/// let result = Actor::anonymous().can(AdminCapability::ClassifySeries).check();
/// assert!(result.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Actor {
    subject: Option<String>,
    is_admin: bool,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `subject` - Identifier of the authenticated caller
    /// * `is_admin` - Admin flag supplied by the authentication layer
    pub fn new(subject: impl Into<String>, is_admin: bool) -> Self {
        Self {
            subject: Some(subject.into()),
            is_admin,
        }
    }

    /// A caller that presented no credentials
    pub fn anonymous() -> Self {
        Self {
            subject: None,
            is_admin: false,
        }
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Specify what capability the actor needs
    pub fn can(&self, capability: AdminCapability) -> CapabilityBuilder<'_> {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder<'a> {
    actor: &'a Actor,
    capability: AdminCapability,
}

impl CapabilityBuilder<'_> {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        if self.actor.subject.is_none() {
            return Err(AuthError::AuthenticationRequired);
        }

        if self.capability.requires_admin() && !self.actor.is_admin {
            tracing::warn!(
                subject = ?self.actor.subject,
                capability = ?self.capability,
                "Admin capability denied"
            );
            return Err(AuthError::AdminRequired);
        }

        Ok(())
    }
}
