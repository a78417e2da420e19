use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use checker_core::Effect;
use engine_logging::{engine_info, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::batch::{BatchRunner, BatchSettings, ChannelProgressSink};
use crate::{CredentialStore, EngineEvent, ReqwestVerifier, Verifier, VerifySettings};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub verify: VerifySettings,
    pub batch: BatchSettings,
}

enum EngineCommand {
    Start { cancel: CancellationToken },
}

/// Runs batches on a background thread and reports [`EngineEvent`]s.
///
/// Runs never overlap: a start issued while a run is active is queued.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    cancel: Mutex<CancellationToken>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, store: Arc<dyn CredentialStore>) -> Self {
        let verifier = Arc::new(ReqwestVerifier::new(config.verify));
        Self::with_verifier(config.batch, store, verifier)
    }

    pub fn with_verifier(
        settings: BatchSettings,
        store: Arc<dyn CredentialStore>,
        verifier: Arc<dyn Verifier>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runner = BatchRunner::new(verifier, settings);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let sink = ChannelProgressSink::new(event_tx);
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(&runner, store.as_ref(), &sink, command));
            }
        });

        Self {
            cmd_tx,
            event_rx,
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Verify whatever the store holds at the moment the run begins.
    pub fn start(&self) {
        let cancel = self.current_token().clone();
        if self.cmd_tx.send(EngineCommand::Start { cancel }).is_err() {
            engine_warn!("Engine thread is gone; start ignored");
        }
    }

    /// Stop the active run and any queued ones before their next candidate.
    pub fn cancel(&self) {
        let mut token = self.current_token();
        token.cancel();
        *token = CancellationToken::new();
        engine_info!("Cancellation requested");
    }

    /// Carry out effects produced by `checker_core::update`.
    pub fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartRun => self.start(),
                Effect::CancelRun => self.cancel(),
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn current_token(&self) -> MutexGuard<'_, CancellationToken> {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn handle_command(
    runner: &BatchRunner,
    store: &dyn CredentialStore,
    sink: &ChannelProgressSink,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Start { cancel } => {
            // Read once; later writes only affect the next run.
            let candidates = store.get().unwrap_or_default();
            if candidates.is_empty() {
                engine_warn!("No stored candidates to verify");
            }
            runner.run(candidates, sink, &cancel).await;
        }
    }
}
