use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use checker_core::{Candidate, Profile, RunStatus, VerificationOutcome};
use checker_engine::{
    normalize_profile, BatchRunner, BatchSettings, EngineEvent, FailureKind, ProgressSink,
    ReqwestVerifier, Verifier, VerifyError, VerifySettings,
};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl TestSink {
    fn new() -> Self {
        Self::default()
    }

    fn cancelling_after(completed: usize, token: CancellationToken) -> Self {
        Self {
            cancel_after: Some((completed, token)),
            ..Self::default()
        }
    }

    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        if let (EngineEvent::ResultsUpdated(results), Some((completed, token))) =
            (&event, &self.cancel_after)
        {
            if results.len() == *completed {
                token.cancel();
            }
        }
        self.events.lock().unwrap().push(event);
    }
}

/// Succeeds for usernames starting with "ok", fails otherwise.
#[derive(Default)]
struct ScriptedVerifier {
    calls: Mutex<Vec<String>>,
    cancel_during: Option<(String, CancellationToken)>,
}

#[async_trait::async_trait]
impl Verifier for ScriptedVerifier {
    async fn verify(
        &self,
        username: &str,
        password: &str,
        host: &str,
    ) -> Result<Profile, VerifyError> {
        self.calls.lock().unwrap().push(username.to_string());
        if let Some((name, token)) = &self.cancel_during {
            if name == username {
                token.cancel();
            }
        }
        if username.starts_with("ok") {
            let candidate = Candidate::new(username, password, host);
            Ok(normalize_profile(&serde_json::json!({}), &candidate, 0))
        } else {
            Err(VerifyError::new(
                FailureKind::RemoteRejected { status: 403 },
                "Failed to test account: Forbidden",
            ))
        }
    }
}

fn no_pacing() -> BatchSettings {
    BatchSettings {
        pacing: Duration::ZERO,
    }
}

fn candidates(names: &[&str]) -> Vec<Candidate> {
    names
        .iter()
        .map(|name| Candidate::new(*name, "pw", "http://x.com"))
        .collect()
}

fn result_lengths(events: &[EngineEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::ResultsUpdated(results) => Some(results.len()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn runs_every_candidate_in_order_and_reports_each() {
    let verifier = Arc::new(ScriptedVerifier::default());
    let runner = BatchRunner::new(verifier.clone(), no_pacing());
    let sink = TestSink::new();

    let run = runner
        .run(
            candidates(&["ok-a", "bad-b", "ok-c"]),
            &sink,
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(run.status, RunStatus::Completed);
    let names: Vec<_> = run
        .results
        .iter()
        .map(|entry| entry.candidate.username.as_str())
        .collect();
    assert_eq!(names, vec!["ok-a", "bad-b", "ok-c"]);
    assert!(run.results[0].outcome.is_success());
    assert_eq!(
        run.results[1].outcome,
        VerificationOutcome::failure("Failed to test account: Forbidden")
    );
    assert!(run.results[2].outcome.is_success());

    let events = sink.take();
    assert_eq!(events.first(), Some(&EngineEvent::RunStarted { total: 3 }));
    assert_eq!(result_lengths(&events), vec![1, 2, 3]);
    assert_eq!(
        events.last(),
        Some(&EngineEvent::RunFinished {
            status: RunStatus::Completed,
            results: run.results.clone(),
        })
    );
    let started: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::ItemStarted { index } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec![0, 1, 2]);
}

#[tokio::test]
async fn duplicates_are_verified_once() {
    let verifier = Arc::new(ScriptedVerifier::default());
    let runner = BatchRunner::new(verifier.clone(), no_pacing());

    let run = runner
        .run(
            candidates(&["ok-a", "ok-b", "ok-a", "ok-b"]),
            &TestSink::new(),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(run.results.len(), 2);
    assert_eq!(*verifier.calls.lock().unwrap(), vec!["ok-a", "ok-b"]);
}

#[tokio::test]
async fn cancel_after_first_returns_one_entry() {
    let token = CancellationToken::new();
    let verifier = Arc::new(ScriptedVerifier::default());
    let runner = BatchRunner::new(verifier.clone(), no_pacing());
    let sink = TestSink::cancelling_after(1, token.clone());

    let run = runner
        .run(candidates(&["ok-a", "ok-b", "ok-c"]), &sink, &token)
        .await;

    assert_eq!(run.status, RunStatus::Cancelled);
    assert_eq!(run.results.len(), 1);
    assert_eq!(run.results[0].candidate.username, "ok-a");
    assert_eq!(verifier.calls.lock().unwrap().len(), 1);
    assert_eq!(result_lengths(&sink.take()), vec![1]);
}

#[tokio::test]
async fn cancelled_before_start_returns_nothing() {
    let token = CancellationToken::new();
    token.cancel();
    let verifier = Arc::new(ScriptedVerifier::default());
    let runner = BatchRunner::new(verifier.clone(), no_pacing());

    let run = runner
        .run(candidates(&["ok-a", "ok-b"]), &TestSink::new(), &token)
        .await;

    assert_eq!(run.status, RunStatus::Cancelled);
    assert!(run.results.is_empty());
    assert!(verifier.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn in_flight_check_finishes_after_cancel() {
    let token = CancellationToken::new();
    let verifier = Arc::new(ScriptedVerifier {
        cancel_during: Some(("ok-b".to_string(), token.clone())),
        ..ScriptedVerifier::default()
    });
    let runner = BatchRunner::new(verifier.clone(), no_pacing());

    let run = runner
        .run(candidates(&["ok-a", "ok-b", "ok-c"]), &TestSink::new(), &token)
        .await;

    assert_eq!(run.status, RunStatus::Cancelled);
    assert_eq!(run.results.len(), 2);
    assert!(run.results[1].outcome.is_success());
}

#[tokio::test]
async fn pacing_separates_items_but_not_after_the_last() {
    let verifier = Arc::new(ScriptedVerifier::default());
    let settings = BatchSettings {
        pacing: Duration::from_millis(40),
    };
    let runner = BatchRunner::new(verifier, settings);

    let started = Instant::now();
    let run = runner
        .run(
            candidates(&["ok-a", "ok-b", "ok-c"]),
            &TestSink::new(),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(run.results.len(), 3);
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn cancel_cuts_the_pacing_pause_short() {
    let token = CancellationToken::new();
    let verifier = Arc::new(ScriptedVerifier::default());
    let settings = BatchSettings {
        pacing: Duration::from_secs(10),
    };
    let runner = BatchRunner::new(verifier.clone(), settings);
    let sink = TestSink::cancelling_after(1, token.clone());

    let started = Instant::now();
    let run = runner
        .run(candidates(&["ok-a", "ok-b", "ok-c"]), &sink, &token)
        .await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(run.status, RunStatus::Cancelled);
    assert_eq!(run.results.len(), 1);
    assert_eq!(verifier.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn remote_rejection_does_not_stop_the_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/player_api.php"))
        .and(query_param("username", "locked"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/player_api.php"))
        .and(query_param("username", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_info": {"auth": 1, "status": "Active"}
        })))
        .mount(&server)
        .await;

    let verifier = Arc::new(ReqwestVerifier::new(VerifySettings::default()));
    let runner = BatchRunner::new(verifier, no_pacing());
    let list = vec![
        Candidate::new("locked", "pw", server.uri()),
        Candidate::new("open", "pw", server.uri()),
    ];

    let run = runner
        .run(list, &TestSink::new(), &CancellationToken::new())
        .await;

    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(
        run.results[0].outcome,
        VerificationOutcome::failure("Failed to test account: Unauthorized")
    );
    let profile = run.results[1].outcome.profile().expect("second succeeds");
    assert_eq!(profile.status, "Active");
}
