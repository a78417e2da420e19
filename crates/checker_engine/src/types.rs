use std::fmt;

use checker_core::{BatchResult, Msg, RunStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RunStarted {
        total: usize,
    },
    ItemStarted {
        index: usize,
    },
    /// Every entry completed so far, in candidate order.
    ResultsUpdated(BatchResult),
    RunFinished {
        status: RunStatus,
        results: BatchResult,
    },
}

impl From<EngineEvent> for Msg {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::RunStarted { total } => Msg::RunStarted { total },
            EngineEvent::ItemStarted { index } => Msg::ItemStarted { index },
            EngineEvent::ResultsUpdated(results) => Msg::ResultsUpdated(results),
            EngineEvent::RunFinished { status, results } => Msg::RunFinished { status, results },
        }
    }
}

/// Why a single verification failed. `message` is what ends up in the
/// failure outcome and never contains the password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct VerifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl VerifyError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input() -> Self {
        Self::new(FailureKind::InvalidInput, "Missing required parameters")
    }

    pub(crate) fn remote_rejected(status: reqwest::StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or(status.as_str());
        Self::new(
            FailureKind::RemoteRejected {
                status: status.as_u16(),
            },
            format!("Failed to test account: {reason}"),
        )
    }

    pub(crate) fn transport() -> Self {
        Self::new(FailureKind::TransportFailure, "Failed to test account")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An empty username, password or host; no request was made.
    InvalidInput,
    /// The endpoint answered with a non-success status.
    RemoteRejected { status: u16 },
    /// DNS, connect, timeout, unreadable or oversized body.
    TransportFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidInput => write!(f, "invalid input"),
            FailureKind::RemoteRejected { status } => write!(f, "remote rejected ({status})"),
            FailureKind::TransportFailure => write!(f, "transport failure"),
        }
    }
}
