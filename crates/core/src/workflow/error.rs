//! Workflow errors.

use thiserror::Error;

use crate::workflow::types::JbpStatus;

/// Errors raised by workflow transitions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The plan is already approved (or further along); approving again
    /// must not write a duplicate history row or re-run the cascade.
    #[error("plan is already approved")]
    AlreadyApproved,

    /// The requested transition is not defined from the current status.
    #[error("cannot {action} a plan in status {from}")]
    InvalidTransition {
        /// Current status.
        from: JbpStatus,
        /// The attempted action, e.g. "submit".
        action: &'static str,
    },

    /// A referenced entity (item, asset, store) does not exist or belongs
    /// to another tenant.
    #[error("invalid reference: {what}")]
    InvalidReference {
        /// What the dangling reference points at.
        what: String,
    },
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AlreadyApproved | Self::InvalidTransition { .. } => 409,
            Self::InvalidReference { .. } => 422,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyApproved => "ALREADY_APPROVED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::InvalidReference { .. } => "INVALID_REFERENCE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message_names_status_and_action() {
        let err = WorkflowError::InvalidTransition {
            from: JbpStatus::Executing,
            action: "submit",
        };
        assert_eq!(err.to_string(), "cannot submit a plan in status executing");
        assert_eq!(err.status_code(), 409);
    }
}
