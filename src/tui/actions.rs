use super::state::AppState;

/// Process the current state: start requested refreshes and apply the ones
/// that finished.
pub fn process_state(state: &mut AppState) {
    if state.refresh_requested {
        state.refresh_requested = false;
        state.clear_messages();
        state.loader.spawn();
    }

    while let Some(outcome) = state.loader.poll() {
        state.apply_refresh(outcome);
    }
}
