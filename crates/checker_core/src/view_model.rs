use chrono::DateTime;

use crate::{BatchEntry, RunStatus, VerificationOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunViewModel {
    pub is_running: bool,
    pub cancel_requested: bool,
    pub current_index: Option<usize>,
    pub loaded_candidates: usize,
    pub total: usize,
    pub completed: usize,
    pub success_count: usize,
    pub progress_label: String,
    pub rows: Vec<ResultRowView>,
    pub last_status: Option<RunStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub index: usize,
    pub username: String,
    pub host: String,
    pub succeeded: bool,
    /// Remote status on success, failure reason otherwise.
    pub detail: String,
    pub expiration: String,
    /// `active/max` when the remote reported a limit.
    pub connections: Option<String>,
}

impl ResultRowView {
    pub(crate) fn from_entry(index: usize, entry: &BatchEntry) -> Self {
        let (succeeded, detail, expiration, connections) = match &entry.outcome {
            VerificationOutcome::Success(profile) => (
                true,
                profile.status.clone(),
                format_expiration(profile.expires_at.as_deref()),
                profile.max_connections.map(|max| {
                    format!("{}/{}", profile.active_connections.unwrap_or(0), max)
                }),
            ),
            VerificationOutcome::Failure { reason } => {
                (false, reason.clone(), format_expiration(None), None)
            }
        };
        Self {
            index,
            username: entry.candidate.username.clone(),
            host: entry.candidate.host.clone(),
            succeeded,
            detail,
            expiration,
            connections,
        }
    }
}

/// Render an epoch-seconds expiration as `DD/MM/YYYY` (UTC).
///
/// Missing values read `N/A`; values that are not a timestamp read
/// `Invalid date`.
pub fn format_expiration(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "N/A".to_string();
    };
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "Invalid date".to_string())
}
