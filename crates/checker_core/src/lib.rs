//! Checker core: credential extraction and the pure run state machine.
mod candidate;
mod effect;
mod extract;
mod glyph;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use candidate::{dedupe_candidates, normalize_origin, Candidate};
pub use effect::Effect;
pub use extract::ExtractionStrategy;
pub use msg::Msg;
pub use outcome::{BatchEntry, BatchResult, Profile, RunStatus, VerificationOutcome};
pub use state::RunState;
pub use update::update;
pub use view_model::{format_expiration, ResultRowView, RunViewModel};
