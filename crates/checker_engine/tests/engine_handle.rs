use std::sync::Arc;
use std::time::Duration;

use checker_core::{update, Candidate, Msg, Profile, RunState, RunStatus};
use checker_engine::{
    normalize_profile, BatchSettings, CredentialStore, EngineEvent, EngineHandle,
    MemoryCredentialStore, Verifier, VerifyError,
};

struct InstantVerifier;

#[async_trait::async_trait]
impl Verifier for InstantVerifier {
    async fn verify(
        &self,
        username: &str,
        password: &str,
        host: &str,
    ) -> Result<Profile, VerifyError> {
        let candidate = Candidate::new(username, password, host);
        Ok(normalize_profile(&serde_json::json!({}), &candidate, 0))
    }
}

fn store_with(count: usize) -> Arc<MemoryCredentialStore> {
    let candidates = (0..count)
        .map(|i| Candidate::new(format!("user{i}"), "pw", "http://x.com"))
        .collect();
    Arc::new(MemoryCredentialStore::with_candidates(candidates))
}

fn collect_until_finished(engine: &EngineHandle) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Some(event) = engine.recv_timeout(Duration::from_secs(5)) {
        let finished = matches!(event, EngineEvent::RunFinished { .. });
        events.push(event);
        if finished {
            break;
        }
    }
    events
}

#[test]
fn start_runs_stored_candidates_and_drives_state() {
    engine_logging::initialize_for_tests();
    let store = store_with(3);
    let engine = EngineHandle::with_verifier(
        BatchSettings {
            pacing: Duration::ZERO,
        },
        store.clone(),
        Arc::new(InstantVerifier),
    );

    let (state, _) = update(RunState::new(), Msg::CandidatesLoaded(3));
    let (mut state, effects) = update(state, Msg::StartClicked);
    engine.apply(effects);

    for event in collect_until_finished(&engine) {
        (state, _) = update(state, Msg::from(event));
    }

    let view = state.view();
    assert!(!view.is_running);
    assert_eq!(view.last_status, Some(RunStatus::Completed));
    assert_eq!(view.completed, 3);
    assert_eq!(view.success_count, 3);
    assert_eq!(view.rows[2].username, "user2");
}

#[test]
fn cancel_stops_between_candidates() {
    engine_logging::initialize_for_tests();
    let engine = EngineHandle::with_verifier(
        BatchSettings {
            pacing: Duration::from_millis(500),
        },
        store_with(4),
        Arc::new(InstantVerifier),
    );

    engine.start();
    loop {
        match engine.recv_timeout(Duration::from_secs(5)) {
            Some(EngineEvent::ResultsUpdated(results)) if results.len() == 1 => break,
            Some(_) => continue,
            None => panic!("no progress from engine"),
        }
    }
    engine.cancel();

    let finished = collect_until_finished(&engine).pop();
    match finished {
        Some(EngineEvent::RunFinished { status, results }) => {
            assert_eq!(status, RunStatus::Cancelled);
            assert_eq!(results.len(), 1);
        }
        other => panic!("unexpected final event {other:?}"),
    }
}

#[test]
fn empty_store_finishes_immediately() {
    engine_logging::initialize_for_tests();
    let store = Arc::new(MemoryCredentialStore::new());
    let engine = EngineHandle::with_verifier(
        BatchSettings::default(),
        store.clone(),
        Arc::new(InstantVerifier),
    );

    engine.start();
    let events = collect_until_finished(&engine);
    assert_eq!(
        events,
        vec![
            EngineEvent::RunStarted { total: 0 },
            EngineEvent::RunFinished {
                status: RunStatus::Completed,
                results: Vec::new(),
            },
        ]
    );
    assert_eq!(store.get(), None);
}
