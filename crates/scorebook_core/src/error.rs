//! Error taxonomy for the scoring engine.
//!
//! Every failure is a value. Input-validation errors are raised before a
//! ledger is touched and state errors leave the innings as it was.

/// Core result type
pub type ScoreResult<T> = Result<T, ScoreError>;

/// Scoring engine error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    /// The innings is no longer accepting deliveries
    #[error("Innings already completed")]
    InningsAlreadyCompleted,

    /// A legal delivery would push the innings past its ball allowance
    #[error("Over limit exceeded: innings allows {limit_balls} legal balls")]
    OverLimitExceeded {
        /// Legal balls allowed in the innings
        limit_balls: u32,
    },

    /// Extras, runs and wicket fields contradict each other
    #[error("Invalid delivery shape: {reason}")]
    InvalidDeliveryShape {
        /// What was inconsistent
        reason: String,
    },

    /// Undo was requested on an empty ledger
    #[error("Ledger is empty")]
    EmptyLedger,

    /// Manual end of innings before a legal ball was bowled
    #[error("Nothing bowled yet")]
    NothingBowledYet,

    /// Manual end of innings requested outside the first innings
    #[error("Only the first innings can be ended manually")]
    NotFirstInnings,

    /// The match is not live
    #[error("Match is not live: {status}")]
    MatchNotLive {
        /// Current match status
        status: String,
    },

    /// The match has already been started
    #[error("Match already started")]
    MatchAlreadyStarted,

    /// A delivery needs a player who has not been selected
    #[error("No {role} selected")]
    MissingPlayer {
        /// Which role is empty (striker, non-striker, bowler)
        role: String,
    },

    /// A player name is not in the relevant squad
    #[error("Unknown player: {name}")]
    UnknownPlayer {
        /// The rejected name
        name: String,
    },

    /// Match setup validation error
    #[error("Validation failed for {field}: {reason}")]
    Validation {
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },

    /// Canonical encoding or decoding failed
    #[error("Encoding error: {reason}")]
    Encoding {
        /// Underlying failure
        reason: String,
    },
}

impl ScoreError {
    /// Shorthand for an [`ScoreError::InvalidDeliveryShape`]
    pub fn shape(reason: impl Into<String>) -> Self {
        Self::InvalidDeliveryShape {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ScoreError::Validation`]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the state of the match rather than the input
    #[must_use]
    pub const fn is_state_error(&self) -> bool {
        matches!(
            self,
            Self::InningsAlreadyCompleted
                | Self::OverLimitExceeded { .. }
                | Self::EmptyLedger
                | Self::NothingBowledYet
                | Self::NotFirstInnings
                | Self::MatchNotLive { .. }
                | Self::MatchAlreadyStarted
        )
    }
}

impl From<serde_json::Error> for ScoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding {
            reason: err.to_string(),
        }
    }
}

impl From<postcard::Error> for ScoreError {
    fn from(err: postcard::Error) -> Self {
        Self::Encoding {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoreError::EmptyLedger;
        assert_eq!(format!("{}", err), "Ledger is empty");

        let err = ScoreError::Validation {
            field: "totalOvers".to_string(),
            reason: "must be between 1 and 50".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Validation failed for totalOvers: must be between 1 and 50"
        );
    }

    #[test]
    fn test_over_limit_error() {
        let err = ScoreError::OverLimitExceeded { limit_balls: 30 };
        assert!(err.to_string().contains("30"));
        assert!(err.is_state_error());
    }

    #[test]
    fn test_shape_is_input_error() {
        let err = ScoreError::shape("wide with bat runs");
        assert!(!err.is_state_error());
        assert!(err.to_string().contains("wide with bat runs"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(ScoreError::NothingBowledYet, ScoreError::NothingBowledYet);
        assert_ne!(ScoreError::NothingBowledYet, ScoreError::NotFirstInnings);
    }
}
