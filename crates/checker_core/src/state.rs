use crate::view_model::{ResultRowView, RunViewModel};
use crate::{BatchResult, RunStatus};

/// Idle -> Running -> Idle. `current_index` is only set while running.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunState {
    loaded_candidates: usize,
    is_running: bool,
    cancel_requested: bool,
    current_index: Option<usize>,
    total: usize,
    results: BatchResult,
    last_status: Option<RunStatus>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn results(&self) -> &BatchResult {
        &self.results
    }

    pub fn loaded_candidates(&self) -> usize {
        self.loaded_candidates
    }

    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    pub fn view(&self) -> RunViewModel {
        let completed = self.results.len();
        let success_count = self
            .results
            .iter()
            .filter(|entry| entry.outcome.is_success())
            .count();
        let progress_label = if self.is_running {
            let position = match self.current_index {
                Some(index) => index + 1,
                None if self.total > 0 => 1,
                None => 0,
            };
            format!("Testing account {position} of {}", self.total)
        } else {
            format!("{success_count} of {completed} accounts working")
        };

        RunViewModel {
            is_running: self.is_running,
            cancel_requested: self.cancel_requested,
            current_index: self.current_index,
            loaded_candidates: self.loaded_candidates,
            total: self.total,
            completed,
            success_count,
            progress_label,
            rows: self
                .results
                .iter()
                .enumerate()
                .map(|(index, entry)| ResultRowView::from_entry(index, entry))
                .collect(),
            last_status: self.last_status,
        }
    }

    pub(crate) fn set_loaded_candidates(&mut self, count: usize) {
        self.loaded_candidates = count;
    }

    pub(crate) fn begin_run(&mut self) {
        self.is_running = true;
        self.cancel_requested = false;
        self.current_index = None;
        self.total = self.loaded_candidates;
        self.results.clear();
        self.last_status = None;
    }

    pub(crate) fn request_cancel(&mut self) {
        self.cancel_requested = true;
    }

    pub(crate) fn set_total(&mut self, total: usize) {
        self.is_running = true;
        self.total = total;
    }

    pub(crate) fn set_current_index(&mut self, index: usize) {
        self.current_index = Some(index);
    }

    /// Accept a snapshot only if it extends what is already shown.
    pub(crate) fn apply_results(&mut self, results: BatchResult) {
        let extends = results.len() >= self.results.len()
            && results.len() <= self.total
            && results[..self.results.len()] == self.results[..];
        if extends {
            self.results = results;
        }
    }

    pub(crate) fn finish_run(&mut self, status: RunStatus, results: BatchResult) {
        self.is_running = false;
        self.cancel_requested = false;
        self.current_index = None;
        self.results = results;
        self.last_status = Some(status);
    }

    pub(crate) fn clear_results(&mut self) {
        self.results.clear();
        self.last_status = None;
        self.total = 0;
    }
}
