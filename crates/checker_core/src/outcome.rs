use crate::Candidate;

/// Account state reported by the remote service after a successful check.
///
/// `username`, `password` and `host` always echo what was sent, whatever the
/// remote calls them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub max_connections: Option<u32>,
    pub active_connections: Option<u32>,
    /// Seconds since the epoch as the remote sent it. Not interpreted here.
    pub expires_at: Option<String>,
    pub status: String,
    pub verified_at_millis: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Success(Profile),
    Failure { reason: String },
}

impl VerificationOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        VerificationOutcome::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerificationOutcome::Success(_))
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            VerificationOutcome::Success(profile) => Some(profile),
            VerificationOutcome::Failure { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub candidate: Candidate,
    pub outcome: VerificationOutcome,
}

/// Completed entries of a run, in candidate order. Only ever appended to.
pub type BatchResult = Vec<BatchEntry>;

/// How a run ended. Both carry a `BatchResult`; a cancelled one is a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
}
