#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the stored candidates and verify them one by one.
    StartRun,
    /// Stop before the next candidate; the in-flight check finishes.
    CancelRun,
}
