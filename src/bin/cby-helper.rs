//! CBY Helper TUI
//!
//! Terminal front-end for shipment scanning: scan (or paste) a label payload
//! and see which hub, sack and OSA lane it goes to.

use crossterm::event;
use std::time::Duration;
use tracing::info;

use cby_helper::logging::{default_log_path, init_logging};
use cby_helper::tui::{
    handle_event, process_state, render, restore_terminal, setup_terminal, AppState,
};
use cby_helper::{DirectoryClient, DEFAULT_ENDPOINT};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&default_log_path())?;

    let client = DirectoryClient::new(DEFAULT_ENDPOINT)?;
    let mut state = AppState::new(client);
    info!("starting cby-helper");

    let mut terminal = setup_terminal()?;

    loop {
        terminal.draw(|f| render(f, &state))?;

        // Start requested refreshes and apply finished ones.
        process_state(&mut state);

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            handle_event(event, &mut state);
        }
    }

    restore_terminal(&mut terminal)?;
    info!("cby-helper stopped");

    Ok(())
}
