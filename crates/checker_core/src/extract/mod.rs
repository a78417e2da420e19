//! Candidate extraction from free-form text dumps.
//!
//! Two strategies are available and the caller picks one explicitly:
//! - [`ExtractionStrategy::LabeledBlock`] splits the dump into blocks and reads
//!   `User`/`Pass`/`Host` style labels, backfilling from an embedded playback
//!   URL when labels are missing.
//! - [`ExtractionStrategy::SingleLinePlaybackUrl`] reads one playback URL per
//!   line and ignores labels entirely.
//!
//! Extraction never fails. Text that yields nothing produces an empty list.
mod labeled;
mod playback;

use crate::{dedupe_candidates, Candidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionStrategy {
    #[default]
    LabeledBlock,
    SingleLinePlaybackUrl,
}

impl ExtractionStrategy {
    /// Extract candidates in document order with duplicates removed.
    pub fn extract(self, text: &str) -> Vec<Candidate> {
        dedupe_candidates(self.extract_all(text))
    }

    /// Extract candidates in document order, duplicates included.
    pub fn extract_all(self, text: &str) -> Vec<Candidate> {
        let text = text.replace("\r\n", "\n");
        match self {
            ExtractionStrategy::LabeledBlock => labeled::extract(&text),
            ExtractionStrategy::SingleLinePlaybackUrl => playback::extract_lines(&text),
        }
    }
}
