//! Storage for the extracted candidate list between import and verification.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use checker_core::Candidate;
use engine_logging::{engine_error, engine_info, engine_warn};
use serde::{Deserialize, Serialize};

use crate::AtomicFileWriter;

const STORE_FILENAME: &str = ".credentials.ron";

/// Last-write-wins slot holding one candidate list.
///
/// Failures are logged, not returned: an unreadable store reads as empty.
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<Vec<Candidate>>;
    fn set(&self, candidates: &[Candidate]);
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Vec<Candidate>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            slot: Mutex::new(Some(candidates)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Vec<Candidate>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, candidates: &[Candidate]) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(candidates.to_vec());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedCandidate {
    username: String,
    password: String,
    host: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedCandidates {
    candidates: Vec<PersistedCandidate>,
}

/// Keeps the list as RON in `{dir}/.credentials.ron`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORE_FILENAME)
    }

    fn read(path: &Path) -> Option<PersistedCandidates> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                engine_warn!("Failed to read stored candidates from {:?}: {}", path, err);
                return None;
            }
        };
        match ron::from_str(&content) {
            Ok(stored) => Some(stored),
            Err(err) => {
                engine_warn!("Failed to parse stored candidates from {:?}: {}", path, err);
                None
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Vec<Candidate>> {
        let path = self.path();
        let stored = Self::read(&path)?;
        let candidates: Vec<Candidate> = stored
            .candidates
            .into_iter()
            .map(|c| Candidate::new(c.username, c.password, c.host))
            .collect();
        engine_info!("Loaded {} stored candidates from {:?}", candidates.len(), path);
        Some(candidates)
    }

    fn set(&self, candidates: &[Candidate]) {
        let stored = PersistedCandidates {
            candidates: candidates
                .iter()
                .map(|c| PersistedCandidate {
                    username: c.username.clone(),
                    password: c.password.clone(),
                    host: c.host.clone(),
                })
                .collect(),
        };

        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&stored, pretty) {
            Ok(text) => text,
            Err(err) => {
                engine_error!("Failed to serialize candidates: {}", err);
                return;
            }
        };

        let writer = AtomicFileWriter::new(self.dir.clone());
        if let Err(err) = writer.write(STORE_FILENAME, &content) {
            engine_error!("Failed to store candidates in {:?}: {}", self.dir, err);
        }
    }
}
