use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppScreen, AppState, ScanView, MENU_ITEMS};

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    handle_event_at(event, state, Instant::now());
}

pub(crate) fn handle_event_at(event: Event, state: &mut AppState, now: Instant) {
    if let Event::Key(key_event) = event {
        if key_event.kind == KeyEventKind::Release {
            return;
        }

        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            state.should_quit = true;
            return;
        }

        if state.show_exit_dialog {
            handle_exit_dialog(key_event, state);
            return;
        }

        match state.screen {
            AppScreen::Home => handle_home(key_event, state),
            AppScreen::Scanner => handle_scanner(key_event, state, now),
        }
    }
}

fn handle_exit_dialog(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            state.should_quit = true;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            state.show_exit_dialog = false;
        }
        _ => {}
    }
}

fn handle_home(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => {
            if state.menu_index > 0 {
                state.menu_index -= 1;
            }
        }
        KeyCode::Down => {
            if state.menu_index < MENU_ITEMS.len() - 1 {
                state.menu_index += 1;
            }
        }
        KeyCode::Enter => {
            if state.menu_index == 0 {
                state.clear_messages();
                state.screen = AppScreen::Scanner;
            } else {
                state.set_success("Coming soon".to_string());
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            state.show_exit_dialog = true;
        }
        _ => {}
    }
}

fn handle_scanner(event: KeyEvent, state: &mut AppState, now: Instant) {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    match event.code {
        KeyCode::F(5) => {
            state.refresh_requested = true;
        }
        KeyCode::Char('r') if ctrl => {
            state.refresh_requested = true;
        }
        KeyCode::Esc => {
            if state.view == ScanView::Invalid {
                state.dismiss_invalid();
            } else {
                state.screen = AppScreen::Home;
            }
        }
        _ if !state.accepts_input(now) => {}
        KeyCode::Char(c) if !ctrl => {
            state.dismiss_invalid();
            state.input.insert(state.cursor_position, c);
            state.cursor_position += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(c) = state.input[..state.cursor_position].chars().next_back() {
                state.cursor_position -= c.len_utf8();
                state.input.remove(state.cursor_position);
            }
        }
        KeyCode::Delete => {
            if state.cursor_position < state.input.len() {
                state.input.remove(state.cursor_position);
            }
        }
        KeyCode::Left => {
            if let Some(c) = state.input[..state.cursor_position].chars().next_back() {
                state.cursor_position -= c.len_utf8();
            }
        }
        KeyCode::Right => {
            if let Some(c) = state.input[state.cursor_position..].chars().next() {
                state.cursor_position += c.len_utf8();
            }
        }
        KeyCode::Home => {
            state.cursor_position = 0;
        }
        KeyCode::End => {
            state.cursor_position = state.input.len();
        }
        KeyCode::Enter => {
            state.commit_scan(now);
        }
        _ => {}
    }
}
