//! Sequential batch verification.
//!
//! One candidate is in flight at a time. Cancellation is polled between
//! candidates only; a check that already started runs to completion and its
//! entry is kept.
use std::sync::Arc;
use std::time::Duration;

use checker_core::{
    dedupe_candidates, BatchEntry, BatchResult, Candidate, RunStatus, VerificationOutcome,
};
use engine_logging::{engine_info, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, Verifier};

#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Pause after each completed candidate so observers can render it.
    /// Zero disables the pause.
    pub pacing: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(300),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Final state of a run. A cancelled run holds a prefix of the full result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRun {
    pub status: RunStatus,
    pub results: BatchResult,
}

#[derive(Clone)]
pub struct BatchRunner {
    verifier: Arc<dyn Verifier>,
    settings: BatchSettings,
}

impl BatchRunner {
    pub fn new(verifier: Arc<dyn Verifier>, settings: BatchSettings) -> Self {
        Self { verifier, settings }
    }

    /// Verify `candidates` in order, reporting through `sink`.
    ///
    /// Emits `RunStarted`, then `ItemStarted` and `ResultsUpdated` per
    /// candidate, then `RunFinished` carrying the same value that is returned.
    pub async fn run(
        &self,
        candidates: Vec<Candidate>,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> BatchRun {
        // Stored lists may come from another extraction run.
        let candidates = dedupe_candidates(candidates);
        let total = candidates.len();
        engine_info!("Batch started: {} candidates", total);
        sink.emit(EngineEvent::RunStarted { total });

        let mut results = BatchResult::with_capacity(total);
        let mut status = RunStatus::Completed;
        for (index, candidate) in candidates.into_iter().enumerate() {
            if cancel.is_cancelled() {
                status = RunStatus::Cancelled;
                break;
            }

            sink.emit(EngineEvent::ItemStarted { index });
            let outcome = match self
                .verifier
                .verify(&candidate.username, &candidate.password, &candidate.host)
                .await
            {
                Ok(profile) => VerificationOutcome::Success(profile),
                Err(err) => {
                    engine_warn!(
                        "Candidate {} ({} at {}) failed: {} [{}]",
                        index,
                        candidate.username,
                        candidate.host,
                        err,
                        err.kind
                    );
                    VerificationOutcome::failure(err.to_string())
                }
            };
            results.push(BatchEntry { candidate, outcome });
            sink.emit(EngineEvent::ResultsUpdated(results.clone()));

            if index + 1 < total && !self.settings.pacing.is_zero() {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(self.settings.pacing) => {}
                }
            }
        }

        let succeeded = results
            .iter()
            .filter(|entry| entry.outcome.is_success())
            .count();
        engine_info!(
            "Batch {:?}: {} of {} checked, {} working",
            status,
            results.len(),
            total,
            succeeded
        );
        sink.emit(EngineEvent::RunFinished {
            status,
            results: results.clone(),
        });
        BatchRun { status, results }
    }
}
