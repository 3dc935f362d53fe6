//! Shipment scanning helper.
//!
//! Loads the destination-hub sheet from its HTTP endpoint into a
//! [`HubDirectory`] and resolves scanned shipment payloads
//! (`{"destination_hub_id": ...}`) to the hub name, sack segregation code and
//! OSA lane the shipment belongs to.
//!
//! # Quick Start
//!
//! ```no_run
//! use cby_helper::{resolve, DirectoryClient, DEFAULT_ENDPOINT};
//!
//! let client = DirectoryClient::new(DEFAULT_ENDPOINT).unwrap();
//! let directory = client.fetch();
//!
//! match resolve(r#"{"destination_hub_id": 42}"#, &directory) {
//!     Ok(hub) => println!("{}: sack {} / OSA {}", hub.hub_name, hub.sack_code, hub.osa_lane),
//!     Err(e) => println!("{e}"),
//! }
//! ```

pub mod client;
pub mod directory;
pub mod error;
pub mod loader;
pub mod logging;
pub mod models;
pub mod scan;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use client::{DirectoryClient, DEFAULT_ENDPOINT};
pub use directory::HubDirectory;
pub use error::{HubError, InvalidInput, InvalidReason};
pub use loader::{DirectoryLoader, RefreshOutcome};
pub use models::{sack_lane, HubId, HubRecord, SackLane, ScanPayload};
pub use scan::{parse_payload, resolve};
