use thiserror::Error;

/// Error type for hub directory fetches.
///
/// - `RequestFailed` — network/transport errors (wraps `reqwest::Error`)
/// - `Api` — any non-2xx status code returned by the endpoint
/// - `Decode` — the body was not a JSON array of hub records
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HubError>;

/// Why a scanned payload was rejected.
///
/// Only used for log lines; every variant is shown to the operator as the
/// same "Invalid Barcode" overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The payload is not a JSON object.
    Malformed(String),
    /// `destination_hub_id` is absent or not integer-coercible.
    BadHubId(String),
    /// The id parsed but is not in the current directory.
    UnknownHub(i64),
}

/// A scanned payload that could not be resolved to a hub.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid barcode: {reason}")]
pub struct InvalidInput {
    pub reason: InvalidReason,
}

impl InvalidInput {
    pub(crate) fn new(reason: InvalidReason) -> Self {
        Self { reason }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::Malformed(msg) => write!(f, "malformed payload ({msg})"),
            InvalidReason::BadHubId(msg) => write!(f, "bad destination_hub_id ({msg})"),
            InvalidReason::UnknownHub(id) => write!(f, "unknown hub {id}"),
        }
    }
}
