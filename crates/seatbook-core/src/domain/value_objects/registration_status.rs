//! Registration status value object.

use crate::SeatbookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a registration.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Awaiting an admin decision.
    #[default]
    Pending,
    /// A seat has been granted.
    Approved,
    /// The request was declined.
    Rejected,
}

impl RegistrationStatus {
    /// Checks if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns the lowercase name stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// All possible statuses.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Pending, Self::Approved, Self::Rejected]
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = SeatbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(SeatbookError::Internal(format!(
                "Unknown registration status: {other}"
            ))),
        }
    }
}

/// An admin decision on a pending registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Grant a seat.
    Approve,
    /// Decline the request.
    Reject,
}

impl Decision {
    /// The status a registration ends in after this decision.
    #[must_use]
    pub const fn target_status(&self) -> RegistrationStatus {
        match self {
            Self::Approve => RegistrationStatus::Approved,
            Self::Reject => RegistrationStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = SeatbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(SeatbookError::validation(format!(
                "Unknown action '{other}', expected 'approve' or 'reject'"
            ))),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!RegistrationStatus::Pending.is_terminal());
        assert!(RegistrationStatus::Approved.is_terminal());
        assert!(RegistrationStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in RegistrationStatus::all() {
            assert_eq!(status.as_str().parse::<RegistrationStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RegistrationStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!("approve".parse::<Decision>().unwrap(), Decision::Approve);
        assert_eq!("reject".parse::<Decision>().unwrap(), Decision::Reject);
        match "cancel".parse::<Decision>().unwrap_err() {
            SeatbookError::Validation(_) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_decision_target_status() {
        assert_eq!(Decision::Approve.target_status(), RegistrationStatus::Approved);
        assert_eq!(Decision::Reject.target_status(), RegistrationStatus::Rejected);
    }
}
