//! RBAC guards for role-restricted handlers.

use arbor_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the Administrator role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        return Err(AppError::authorization("Administrator access required"));
    }
    Ok(())
}
