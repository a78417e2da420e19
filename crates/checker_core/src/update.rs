use crate::{Effect, Msg, RunState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: RunState, msg: Msg) -> (RunState, Vec<Effect>) {
    let effects = match msg {
        Msg::CandidatesLoaded(count) => {
            // A new upload while running only affects the next run.
            state.set_loaded_candidates(count);
            Vec::new()
        }
        Msg::StartClicked => {
            if !state.is_running() && state.loaded_candidates() > 0 {
                state.begin_run();
                vec![Effect::StartRun]
            } else {
                Vec::new()
            }
        }
        Msg::CancelClicked => {
            if state.is_running() && !state.cancel_requested() {
                state.request_cancel();
                vec![Effect::CancelRun]
            } else {
                Vec::new()
            }
        }
        Msg::ResultsCleared => {
            if !state.is_running() {
                state.clear_results();
            }
            Vec::new()
        }
        Msg::RunStarted { total } => {
            state.set_total(total);
            Vec::new()
        }
        Msg::ItemStarted { index } => {
            if state.is_running() {
                state.set_current_index(index);
            }
            Vec::new()
        }
        Msg::ResultsUpdated(results) => {
            if state.is_running() {
                state.apply_results(results);
            }
            Vec::new()
        }
        Msg::RunFinished { status, results } => {
            state.finish_run(status, results);
            Vec::new()
        }
    };

    (state, effects)
}
