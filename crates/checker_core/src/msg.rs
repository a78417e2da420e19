use crate::{BatchResult, RunStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A fresh candidate list of this length was stored.
    CandidatesLoaded(usize),
    /// User asked to verify the stored candidates.
    StartClicked,
    /// User asked to stop the running batch.
    CancelClicked,
    /// User dismissed the results of the last run.
    ResultsCleared,
    /// Engine began a run over `total` deduplicated candidates.
    RunStarted { total: usize },
    /// Engine is verifying the candidate at `index`.
    ItemStarted { index: usize },
    /// Engine snapshot of all entries completed so far.
    ResultsUpdated(BatchResult),
    /// Engine finished, either through the whole list or by cancellation.
    RunFinished {
        status: RunStatus,
        results: BatchResult,
    },
}
