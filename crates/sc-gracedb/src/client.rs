//! Blocking HTTP client for the GraceDB REST API.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};

use crate::error::{GraceDbError, Result};
use crate::types::Superevent;

/// The public GraceDB service.
pub const DEFAULT_BASE_URL: &str = "https://gracedb.ligo.org/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("skycut/", env!("CARGO_PKG_VERSION"));

/// Client for the superevent endpoints of a GraceDB service.
pub struct GraceDbClient {
    client: Client,
    base_url: String,
}

impl GraceDbClient {
    /// Client against the public service at [`DEFAULT_BASE_URL`].
    pub fn public() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Client against `base_url` (a mirror, or a local stub in tests).
    pub fn new(base_url: &str) -> Result<Self> {
        reqwest::Url::parse(base_url).map_err(|e| GraceDbError::Url {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// The service base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the catalog record for one superevent.
    pub fn superevent(&self, event_id: &str) -> Result<Superevent> {
        let url = format!("{}/superevents/{}/", self.base_url, event_id);
        let response = self.get(&url, event_id, "record")?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Download a file attached to a superevent, e.g. `bayestar.fits.gz`.
    pub fn download(&self, event_id: &str, filename: &str) -> Result<Vec<u8>> {
        let url = format!("{}/superevents/{}/files/{}", self.base_url, event_id, filename);
        let response = self.get(&url, event_id, filename)?;
        Ok(response.bytes()?.to_vec())
    }

    fn get(&self, url: &str, event_id: &str, what: &str) -> Result<Response> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::NOT_FOUND {
            Err(GraceDbError::NotFound {
                event_id: event_id.to_string(),
                what: what.to_string(),
            })
        } else {
            Err(GraceDbError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}
