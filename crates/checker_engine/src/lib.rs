//! Checker engine: verification I/O, batch orchestration and persistence.
mod batch;
mod engine;
mod export;
mod import;
mod persist;
mod store;
mod types;
mod verify;

pub use batch::{BatchRun, BatchRunner, BatchSettings, ChannelProgressSink, ProgressSink};
pub use engine::{EngineConfig, EngineHandle};
pub use export::{export_filename, render_export, write_export, ExportError};
pub use import::{import_text, ImportError, ImportSummary};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use types::{EngineEvent, FailureKind, VerifyError};
pub use verify::{normalize_profile, ReqwestVerifier, Verifier, VerifySettings};
