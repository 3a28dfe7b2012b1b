//! Scope and authorization errors.

use thiserror::Error;

/// Errors raised by scope resolution and permission checks.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// The principal may not perform this action. Deliberately carries no
    /// detail: out-of-scope rows must be indistinguishable from nonexistent
    /// ones.
    #[error("access denied")]
    AccessDenied,

    /// The principal's claims are malformed (e.g. a party id without a
    /// tenant id).
    #[error("invalid principal: {reason}")]
    InvalidPrincipal {
        /// What is wrong with the claims.
        reason: String,
    },
}

impl ScopeError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AccessDenied => 403,
            Self::InvalidPrincipal { .. } => 401,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccessDenied => "ACCESS_DENIED",
            Self::InvalidPrincipal { .. } => "INVALID_PRINCIPAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_carries_no_detail() {
        assert_eq!(ScopeError::AccessDenied.to_string(), "access denied");
        assert_eq!(ScopeError::AccessDenied.status_code(), 403);
        assert_eq!(ScopeError::AccessDenied.error_code(), "ACCESS_DENIED");
    }
}
