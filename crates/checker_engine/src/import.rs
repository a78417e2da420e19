use checker_core::{dedupe_candidates, ExtractionStrategy};
use engine_logging::{engine_info, engine_warn};

use crate::CredentialStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub stored: usize,
    pub duplicates_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("no accounts found in the text")]
    NoCandidates,
}

/// Extract candidates from a raw dump and replace the stored list with them.
///
/// The store is left untouched when nothing was found.
pub fn import_text(
    text: &str,
    strategy: ExtractionStrategy,
    store: &dyn CredentialStore,
) -> Result<ImportSummary, ImportError> {
    let found = strategy.extract_all(text);
    let found_count = found.len();
    let unique = dedupe_candidates(found);

    if unique.is_empty() {
        engine_warn!("Import with {:?} found no candidates", strategy);
        return Err(ImportError::NoCandidates);
    }

    store.set(&unique);
    let summary = ImportSummary {
        stored: unique.len(),
        duplicates_skipped: found_count - unique.len(),
    };
    engine_info!(
        "Imported {} candidates with {:?} ({} duplicates skipped)",
        summary.stored,
        strategy,
        summary.duplicates_skipped
    );
    Ok(summary)
}
