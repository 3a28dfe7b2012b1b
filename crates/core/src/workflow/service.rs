//! The JBP state machine.

use crate::workflow::error::WorkflowError;
use crate::workflow::types::JbpStatus;

/// Stateless transition rules. The repository persists the results.
pub struct WorkflowService;

impl WorkflowService {
    /// Draft → negotiation.
    pub fn submit(current: JbpStatus) -> Result<JbpStatus, WorkflowError> {
        match current {
            JbpStatus::Draft => Ok(JbpStatus::Negotiation),
            other => Err(WorkflowError::InvalidTransition {
                from: other,
                action: "submit",
            }),
        }
    }

    /// Draft or negotiation → approved. The cascade-triggering transition.
    ///
    /// Approving a plan that is already approved or executing is reported
    /// as `AlreadyApproved` so callers can distinguish a retry from a
    /// genuinely invalid request.
    pub fn approve(current: JbpStatus) -> Result<JbpStatus, WorkflowError> {
        match current {
            JbpStatus::Draft | JbpStatus::Negotiation => Ok(JbpStatus::Approved),
            JbpStatus::Approved | JbpStatus::Executing => Err(WorkflowError::AlreadyApproved),
        }
    }

    /// Approved → negotiation. Does not undo the materialized cascade.
    pub fn reopen(current: JbpStatus) -> Result<JbpStatus, WorkflowError> {
        match current {
            JbpStatus::Approved => Ok(JbpStatus::Negotiation),
            other => Err(WorkflowError::InvalidTransition {
                from: other,
                action: "reopen",
            }),
        }
    }

    /// Approved → executing.
    pub fn start_execution(current: JbpStatus) -> Result<JbpStatus, WorkflowError> {
        match current {
            JbpStatus::Approved => Ok(JbpStatus::Executing),
            other => Err(WorkflowError::InvalidTransition {
                from: other,
                action: "start",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(JbpStatus::Negotiation, "submit")]
    #[case(JbpStatus::Approved, "submit")]
    #[case(JbpStatus::Executing, "submit")]
    #[case(JbpStatus::Draft, "reopen")]
    #[case(JbpStatus::Negotiation, "reopen")]
    #[case(JbpStatus::Executing, "reopen")]
    #[case(JbpStatus::Draft, "start")]
    #[case(JbpStatus::Negotiation, "start")]
    #[case(JbpStatus::Executing, "start")]
    fn test_undefined_transitions_rejected(#[case] from: JbpStatus, #[case] action: &str) {
        let result = match action {
            "submit" => WorkflowService::submit(from),
            "reopen" => WorkflowService::reopen(from),
            _ => WorkflowService::start_execution(from),
        };
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { from: f, .. }) if f == from
        ));
    }

    #[test]
    fn test_happy_path_transitions() {
        let s = WorkflowService::submit(JbpStatus::Draft).unwrap();
        assert_eq!(s, JbpStatus::Negotiation);
        let s = WorkflowService::approve(s).unwrap();
        assert_eq!(s, JbpStatus::Approved);
        let s = WorkflowService::start_execution(s).unwrap();
        assert_eq!(s, JbpStatus::Executing);
    }

    #[test]
    fn test_approving_approved_plan_is_already_approved() {
        let err = WorkflowService::approve(JbpStatus::Approved).unwrap_err();
        assert!(matches!(err, WorkflowError::AlreadyApproved));
    }

    #[test]
    fn test_approving_executing_plan_is_already_approved() {
        let err = WorkflowService::approve(JbpStatus::Executing).unwrap_err();
        assert!(matches!(err, WorkflowError::AlreadyApproved));
    }

    #[test]
    fn test_draft_is_directly_approvable() {
        assert_eq!(
            WorkflowService::approve(JbpStatus::Draft).unwrap(),
            JbpStatus::Approved
        );
    }

    #[test]
    fn test_reopen_returns_to_negotiation() {
        assert_eq!(
            WorkflowService::reopen(JbpStatus::Approved).unwrap(),
            JbpStatus::Negotiation
        );
    }
}
