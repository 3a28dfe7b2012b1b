//! Workflow state and history types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a joint business plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JbpStatus {
    /// Being drafted by the supplier side.
    Draft,
    /// Under negotiation between the parties.
    Negotiation,
    /// Approved; budget committed and cascade materialized.
    Approved,
    /// Execution underway in stores.
    Executing,
}

impl JbpStatus {
    /// Parse a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "negotiation" => Some(Self::Negotiation),
            "approved" => Some(Self::Approved),
            "executing" => Some(Self::Executing),
            _ => None,
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Negotiation => "negotiation",
            Self::Approved => "approved",
            Self::Executing => "executing",
        }
    }
}

impl fmt::Display for JbpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a workflow history row records. History is append-only; rows are
/// never updated or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// Plan created.
    Created,
    /// Sent from draft into negotiation.
    Submitted,
    /// Approved by an authorized reviewer.
    Approved,
    /// Pulled back from approved into negotiation.
    Reopened,
    /// Execution started.
    Started,
}

impl HistoryAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Reopened => "reopened",
            Self::Started => "started",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            JbpStatus::Draft,
            JbpStatus::Negotiation,
            JbpStatus::Approved,
            JbpStatus::Executing,
        ] {
            assert_eq!(JbpStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(JbpStatus::parse("cancelled"), None);
    }
}
