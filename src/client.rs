use reqwest::blocking::{Client, Response};
use tracing::{debug, error};

use crate::directory::HubDirectory;
use crate::error::{HubError, Result};
use crate::models::HubRecord;

/// Apps Script deployment that serves the hub sheet as a JSON array.
pub const DEFAULT_ENDPOINT: &str =
    "https://script.google.com/macros/s/AKfycbza1E7FT2x62m-THXFzRNddvQHIwlFzp3UTcC1OaQ2vhzAi0EjJYqMnHjDT8B__Uhum/exec";

/// Fetches the hub directory from the sheet endpoint.
///
/// ```no_run
/// use cby_helper::{DirectoryClient, DEFAULT_ENDPOINT};
///
/// let client = DirectoryClient::new(DEFAULT_ENDPOINT).unwrap();
/// let directory = client.fetch();
/// println!("{} hubs loaded", directory.len());
/// ```
#[derive(Debug)]
pub struct DirectoryClient {
    endpoint: String,
    http: Client,
}

impl DirectoryClient {
    /// Create a new client for `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the directory, failing on the first problem.
    ///
    /// The whole response is decoded before anything is returned, so a single
    /// bad row fails the fetch.
    pub fn try_fetch(&self) -> Result<HubDirectory> {
        debug!(endpoint = %self.endpoint, "fetching hub directory");
        let resp = self.http.get(&self.endpoint).send()?;
        let body = self.handle_response(resp)?;
        let records: Vec<HubRecord> = serde_json::from_str(&body)?;
        let directory = HubDirectory::from_records(records);
        debug!(hubs = directory.len(), "hub directory fetched");
        Ok(directory)
    }

    /// Fetch the directory, returning an empty one on any failure.
    ///
    /// Failures are only logged; callers cannot tell an empty sheet from a
    /// failed fetch. Use [`DirectoryClient::try_fetch`] to see the error.
    pub fn fetch(&self) -> HubDirectory {
        match self.try_fetch() {
            Ok(directory) => directory,
            Err(e) => {
                error!(endpoint = %self.endpoint, "hub directory fetch failed: {e}");
                HubDirectory::default()
            }
        }
    }

    /// Map non-2xx statuses to [`HubError::Api`] and return the body text.
    fn handle_response(&self, response: Response) -> Result<String> {
        let status = response.status().as_u16();
        let body = response.text()?;

        if (200..300).contains(&status) {
            return Ok(body);
        }

        let message = body.trim();
        Err(HubError::Api {
            status,
            message: if message.is_empty() {
                format!("HTTP {status}")
            } else {
                message.chars().take(200).collect()
            },
        })
    }
}
