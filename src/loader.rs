use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::warn;

use crate::client::DirectoryClient;
use crate::directory::HubDirectory;
use crate::error::Result;

/// Result of one background refresh.
pub type RefreshOutcome = Result<HubDirectory>;

/// Runs directory fetches off the UI thread.
///
/// Every [`DirectoryLoader::spawn`] starts its own worker; overlapping
/// refreshes are allowed and are not cancelled. Outcomes arrive in completion
/// order, so whoever polls and applies them ends up with the last one to
/// finish.
pub struct DirectoryLoader {
    client: Arc<DirectoryClient>,
    tx: Sender<RefreshOutcome>,
    rx: Receiver<RefreshOutcome>,
    in_flight: usize,
}

impl DirectoryLoader {
    pub fn new(client: DirectoryClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client: Arc::new(client),
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn client(&self) -> &DirectoryClient {
        &self.client
    }

    /// Start a background fetch.
    pub fn spawn(&mut self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.in_flight += 1;
        thread::spawn(move || {
            let outcome = client.try_fetch();
            // The receiver only goes away on shutdown.
            let _ = tx.send(outcome);
        });
    }

    /// Number of fetches started but not yet polled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Take the next finished fetch, if any, without blocking.
    pub fn poll(&mut self) -> Option<RefreshOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("refresh channel disconnected");
                self.in_flight = 0;
                None
            }
        }
    }
}
