//! HTTP transport built on `reqwest`.
//!
//! Requires the `http` feature.

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::traits::{Refresh, SearchTransport};

/// Blocking HTTP transport for an Elasticsearch-compatible backend.
///
/// | Operation | Request |
/// |-----------|---------|
/// | `info` | `GET {url}/` |
/// | `search` | `POST {url}/{index}/_search?track_total_hits=..` |
/// | `index` | `POST {url}/{index}/_doc?refresh=..` |
pub struct HttpTransport {
    client: Client,
    url: String,
    track_total_hits: bool,
    pretty: bool,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .field("track_total_hits", &self.track_total_hits)
            .field("pretty", &self.pretty)
            .finish()
    }
}

impl HttpTransport {
    /// Creates a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            client,
            url: config.url.trim_end_matches('/').to_string(),
            track_total_hits: config.track_total_hits,
            pretty: config.pretty,
        })
    }

    /// Base URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn search_url(&self, index: &str) -> String {
        let mut url = format!(
            "{}/{}/_search?track_total_hits={}",
            self.url, index, self.track_total_hits
        );
        if self.pretty {
            url.push_str("&pretty");
        }
        url
    }

    fn index_url(&self, index: &str, refresh: Refresh) -> String {
        format!("{}/{}/_doc?refresh={}", self.url, index, refresh)
    }
}

impl SearchTransport for HttpTransport {
    fn info(&self) -> ClientResult<()> {
        let response = self
            .client
            .get(format!("{}/", self.url))
            .send()
            .map_err(transport_error)?;
        check_status(response).map(|_| ())
    }

    fn search(&self, index: &str, body: &str) -> ClientResult<String> {
        let response = self
            .client
            .post(self.search_url(index))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(transport_error)?;
        check_status(response)
    }

    fn index(&self, index: &str, body: &str, refresh: Refresh) -> ClientResult<()> {
        let response = self
            .client
            .post(self.index_url(index, refresh))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(transport_error)?;
        check_status(response).map(|_| ())
    }
}

/// Reads the response body, turning non-success statuses into errors.
fn check_status(response: Response) -> ClientResult<String> {
    let status = response.status();
    let body = response.text().map_err(transport_error)?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}
