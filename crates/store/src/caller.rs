//! Caller context derived from the authenticated request.
//!
//! The upstream auth layer supplies the caller's roles; the context resolves
//! them once into a typed administrator capability instead of re-deriving a
//! role-string comparison per call. The optional `includeSoftDeleted` request
//! flag rides along with the context so every layer sees the same view of the
//! caller.

use crate::error::{AccessError, StoreResult};

/// The role name that grants administrator privilege.
pub const ADMIN_ROLE: &str = "Administrator";

/// Privilege level and requested visibility flags for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallerContext {
    is_admin: bool,
    include_soft_deleted: bool,
}

impl CallerContext {
    /// Creates a context with the given privilege level and no extra flags.
    pub fn new(is_admin: bool) -> Self {
        Self {
            is_admin,
            include_soft_deleted: false,
        }
    }

    /// Resolves the privilege level from a role list (case-insensitive match
    /// on [`ADMIN_ROLE`]).
    pub fn from_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let is_admin = roles
            .into_iter()
            .any(|role| role.as_ref().eq_ignore_ascii_case(ADMIN_ROLE));
        Self::new(is_admin)
    }

    /// Sets the `includeSoftDeleted` request flag.
    pub fn with_soft_deleted(mut self, include: bool) -> Self {
        self.include_soft_deleted = include;
        self
    }

    /// Whether the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Whether the caller requested soft-deleted record visibility.
    pub fn include_soft_deleted(&self) -> bool {
        self.include_soft_deleted
    }

    /// Whether this caller may see the `isDeleted` flag and soft-deleted
    /// records: administrator privilege plus the explicit request flag.
    pub fn sees_soft_deleted(&self) -> bool {
        self.is_admin && self.include_soft_deleted
    }

    /// Rejects the request when a non-administrator asked for soft-deleted
    /// visibility. Must run before any store access.
    pub fn ensure_soft_delete_access(&self) -> StoreResult<()> {
        if self.include_soft_deleted && !self.is_admin {
            return Err(AccessError::SoftDeleteVisibility.into());
        }
        Ok(())
    }

    /// Rejects the request when the caller is not an administrator.
    pub fn ensure_admin(&self, operation: &str) -> StoreResult<()> {
        if !self.is_admin {
            return Err(AccessError::AdminRequired {
                operation: operation.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_from_roles_case_insensitive() {
        assert!(CallerContext::from_roles(["administrator"]).is_admin());
        assert!(CallerContext::from_roles(["Copilot", "ADMINISTRATOR"]).is_admin());
        assert!(!CallerContext::from_roles(["Copilot"]).is_admin());
        assert!(!CallerContext::from_roles(Vec::<String>::new()).is_admin());
    }

    #[test]
    fn test_sees_soft_deleted_requires_both() {
        assert!(!CallerContext::new(true).sees_soft_deleted());
        assert!(!CallerContext::new(false).with_soft_deleted(true).sees_soft_deleted());
        assert!(CallerContext::new(true).with_soft_deleted(true).sees_soft_deleted());
    }

    #[test]
    fn test_guard_rejects_non_admin_flag() {
        let caller = CallerContext::new(false).with_soft_deleted(true);
        let err = caller.ensure_soft_delete_access().unwrap_err();
        assert!(matches!(err, StoreError::Access(_)));
    }

    #[test]
    fn test_guard_allows_admin_flag() {
        let caller = CallerContext::new(true).with_soft_deleted(true);
        assert!(caller.ensure_soft_delete_access().is_ok());
    }

    #[test]
    fn test_ensure_admin() {
        assert!(CallerContext::new(true).ensure_admin("create").is_ok());
        assert!(CallerContext::new(false).ensure_admin("create").is_err());
    }
}
