use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::{resolve, DirectoryClient, DirectoryLoader, HubDirectory, HubRecord, RefreshOutcome};

/// How long input is ignored after a scan is committed.
///
/// Hardware scanners type the whole payload in one burst; this keeps the tail
/// of one burst from leaking into the next scan while the field resets.
pub const REFOCUS_DELAY: Duration = Duration::from_millis(200);

/// Home menu entries. Only the first one leads anywhere for now.
pub(crate) const MENU_ITEMS: [&str; 6] = [
    "Shipment Scanning",
    "Coming soon",
    "Coming soon",
    "Coming soon",
    "Coming soon",
    "Coming soon",
];

/// Represents the current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppScreen {
    /// Home menu.
    Home,
    /// Shipment scanning screen.
    Scanner,
}

/// What the scanner screen currently shows.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanView {
    /// Nothing scanned since the last reset.
    Idle,
    /// Last scan matched a hub.
    Resolved(HubRecord),
    /// Last scan was unreadable or named an unknown hub.
    Invalid,
}

/// Main application state.
pub struct AppState {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// Highlighted entry in the home menu.
    pub(crate) menu_index: usize,
    /// Is the exit confirmation dialog open?
    pub(crate) show_exit_dialog: bool,
    /// Should the application quit?
    pub should_quit: bool,

    // Scanner state
    /// Text typed (or injected by the scanner) so far.
    pub(crate) input: String,
    /// Cursor position in the scan input.
    pub(crate) cursor_position: usize,
    /// Keystrokes before this instant are dropped.
    pub(crate) input_blocked_until: Option<Instant>,
    /// Result of the last committed scan.
    pub(crate) view: ScanView,
    /// Hubs currently used for lookups.
    pub(crate) directory: HubDirectory,

    // Refresh state
    /// Background fetcher.
    pub(crate) loader: DirectoryLoader,
    /// Set by the UI, consumed by `process_state`.
    pub(crate) refresh_requested: bool,

    /// Error message to display.
    pub(crate) error_message: Option<String>,
    /// Success message to display.
    pub(crate) success_message: Option<String>,
}

impl AppState {
    /// Create a new application state fetching from `client`'s endpoint.
    pub fn new(client: DirectoryClient) -> Self {
        Self {
            screen: AppScreen::Home,
            menu_index: 0,
            show_exit_dialog: false,
            should_quit: false,
            input: String::new(),
            cursor_position: 0,
            input_blocked_until: None,
            view: ScanView::Idle,
            directory: HubDirectory::default(),
            loader: DirectoryLoader::new(client),
            refresh_requested: false,
            error_message: None,
            success_message: None,
        }
    }

    /// Is a refresh pending or running?
    pub(crate) fn is_loading(&self) -> bool {
        self.refresh_requested || self.loader.in_flight() > 0
    }

    /// Can the scan input take keystrokes at `now`?
    pub(crate) fn accepts_input(&self, now: Instant) -> bool {
        !self.is_loading() && self.input_blocked_until.map_or(true, |until| now >= until)
    }

    /// Resolve the typed payload and reset the input field.
    pub(crate) fn commit_scan(&mut self, now: Instant) {
        let raw = std::mem::take(&mut self.input);
        self.cursor_position = 0;

        self.view = match resolve(&raw, &self.directory) {
            Ok(record) => {
                info!(hub_id = record.hub_id, hub = %record.hub_name, "scan resolved");
                ScanView::Resolved(record)
            }
            Err(e) => {
                warn!("{e}");
                ScanView::Invalid
            }
        };

        self.input_blocked_until = Some(now + REFOCUS_DELAY);
    }

    /// Close the "Invalid Barcode" overlay.
    pub(crate) fn dismiss_invalid(&mut self) {
        if self.view == ScanView::Invalid {
            self.view = ScanView::Idle;
        }
    }

    /// Swap in the outcome of a finished refresh.
    ///
    /// A failed refresh keeps the previous directory.
    pub(crate) fn apply_refresh(&mut self, outcome: RefreshOutcome) {
        match outcome {
            Ok(directory) => {
                info!(hubs = directory.len(), "hub directory replaced");
                self.set_success(format!("Data refreshed ({} hubs)", directory.len()));
                self.directory = directory;
                self.view = ScanView::Idle;
            }
            Err(e) => {
                error!("hub directory refresh failed: {e}");
                self.set_error(format!("Refresh failed: {e}"));
            }
        }
    }

    /// Clear any status message.
    pub(crate) fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    /// Set an error message.
    pub(crate) fn set_error(&mut self, message: String) {
        self.success_message = None;
        self.error_message = Some(message);
    }

    /// Set a success message.
    pub(crate) fn set_success(&mut self, message: String) {
        self.error_message = None;
        self.success_message = Some(message);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::HubError;

    pub(crate) fn offline_state() -> AppState {
        AppState::new(DirectoryClient::new("http://127.0.0.1:9/exec").unwrap())
    }

    pub(crate) fn north_hub() -> HubRecord {
        HubRecord {
            hub_id: 42,
            hub_name: "North Hub".into(),
            sack_code: "A".into(),
            osa_lane: "1".into(),
        }
    }

    #[test]
    fn test_commit_scan_resolves_and_clears_input() {
        let mut state = offline_state();
        state.directory = HubDirectory::from_records(vec![north_hub()]);
        state.input = r#"{"destination_hub_id":42}"#.into();
        state.cursor_position = state.input.len();

        let now = Instant::now();
        state.commit_scan(now);

        assert_eq!(state.view, ScanView::Resolved(north_hub()));
        assert!(state.input.is_empty());
        assert_eq!(state.cursor_position, 0);
        assert!(!state.accepts_input(now));
        assert!(state.accepts_input(now + REFOCUS_DELAY));
    }

    #[test]
    fn test_commit_scan_unknown_hub_is_invalid() {
        let mut state = offline_state();
        state.directory = HubDirectory::from_records(vec![north_hub()]);
        state.input = r#"{"destination_hub_id":7}"#.into();
        state.commit_scan(Instant::now());
        assert_eq!(state.view, ScanView::Invalid);

        state.dismiss_invalid();
        assert_eq!(state.view, ScanView::Idle);
    }

    #[test]
    fn test_successful_refresh_replaces_directory_and_clears_result() {
        let mut state = offline_state();
        state.view = ScanView::Resolved(north_hub());

        let mut south = north_hub();
        south.hub_id = 7;
        south.hub_name = "South Hub".into();
        state.apply_refresh(Ok(HubDirectory::from_records(vec![south])));

        assert_eq!(state.directory.len(), 1);
        assert!(state.directory.get(7).is_some());
        assert!(state.directory.get(42).is_none());
        assert_eq!(state.view, ScanView::Idle);
        assert_eq!(state.success_message.as_deref(), Some("Data refreshed (1 hubs)"));
    }

    #[test]
    fn test_failed_refresh_keeps_directory() {
        let mut state = offline_state();
        state.directory = HubDirectory::from_records(vec![north_hub()]);
        state.view = ScanView::Resolved(north_hub());

        state.apply_refresh(Err(HubError::Api {
            status: 500,
            message: "boom".into(),
        }));

        assert_eq!(state.directory.len(), 1);
        assert_eq!(state.view, ScanView::Resolved(north_hub()));
        assert!(state.error_message.as_deref().unwrap().contains("boom"));
    }

    #[test]
    fn test_refreshes_apply_in_completion_order() {
        let mut state = offline_state();

        let mut south = north_hub();
        south.hub_id = 7;
        south.hub_name = "South Hub".into();

        state.apply_refresh(Ok(HubDirectory::from_records(vec![north_hub()])));
        state.apply_refresh(Ok(HubDirectory::from_records(vec![south.clone()])));
        assert_eq!(state.directory, HubDirectory::from_records(vec![south.clone()]));

        // A failure finishing after a success leaves the later directory alone.
        state.apply_refresh(Err(HubError::Api {
            status: 502,
            message: "bad gateway".into(),
        }));
        assert_eq!(state.directory, HubDirectory::from_records(vec![south]));
        assert!(state.directory.get(42).is_none());
    }

    #[test]
    fn test_input_disabled_while_refresh_requested() {
        let mut state = offline_state();
        state.refresh_requested = true;
        assert!(state.is_loading());
        assert!(!state.accepts_input(Instant::now()));
    }
}
