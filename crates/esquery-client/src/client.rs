//! Search client implementation.

use std::time::Instant;

use esquery::{Query, Renderer};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, ResponseCache};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::response::{RequestStats, SearchResponse};
use crate::traits::{Refresh, SearchTransport};

/// Client that sends rendered queries to a search backend.
///
/// The client is an ordinary value owned by the caller. It has an explicit
/// lifecycle: create it, [`connect`](Self::connect), use it, then
/// [`close`](Self::close) it to get the transport back.
///
/// # Example
///
/// ```ignore
/// use esquery::Query;
/// use esquery_client::{ClientConfig, HttpTransport, Refresh, SearchClient};
///
/// let config = ClientConfig::builder()
///     .with_url("http://localhost:9200")
///     .with_index("person")
///     .build();
/// let transport = HttpTransport::new(&config)?;
/// let mut client = SearchClient::with_config(transport, config);
/// client.connect()?;
///
/// client.index_document(r#"{"Name":"test","Age":"20","Gender":"male"}"#, Refresh::True)?;
///
/// let mut query = Query::new();
/// query.add_part(query.term("Name", "test"));
/// let response = client.search(&query)?;
/// println!("found {} people", response.total());
///
/// client.close();
/// ```
pub struct SearchClient<T: SearchTransport> {
    transport: T,
    config: ClientConfig,
    cache: Option<ResponseCache>,
    connected: bool,
}

impl<T: SearchTransport> SearchClient<T> {
    /// Creates a client with default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        let cache = config.cache.clone().map(ResponseCache::new);
        Self {
            transport,
            config,
            cache,
            connected: false,
        }
    }

    /// Creates a client and connects it in one step.
    pub fn open(transport: T, config: ClientConfig) -> ClientResult<Self> {
        let mut client = Self::with_config(transport, config);
        client.connect()?;
        Ok(client)
    }

    /// Checks that the backend is reachable and marks the client connected.
    pub fn connect(&mut self) -> ClientResult<()> {
        match self.transport.info() {
            Ok(()) => {
                info!(url = %self.config.url, "connected to search backend");
                self.connected = true;
                Ok(())
            }
            Err(e) => {
                warn!(url = %self.config.url, error = %e, "search backend unreachable");
                Err(e)
            }
        }
    }

    /// Whether [`connect`](Self::connect) has succeeded.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Releases the client and returns its transport.
    pub fn close(mut self) -> T {
        if let Some(cache) = self.cache.take() {
            cache.clear();
        }
        debug!(url = %self.config.url, "search client closed");
        self.transport
    }

    /// Returns a reference to the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a reference to the response cache if enabled.
    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Returns a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Renders the request body the client would send for `query`.
    pub fn get_query(&self, query: &Query) -> String {
        query.render()
    }

    /// Runs `query` against the configured index.
    ///
    /// In strict mode the query is validated before rendering.
    pub fn search(&self, query: &Query) -> ClientResult<SearchResponse> {
        let body = if self.config.strict {
            Renderer::render_strict(query)?
        } else {
            query.render()
        };
        self.send_search(&body)
    }

    /// Runs a pre-rendered request body against the configured index.
    ///
    /// In strict mode the body must parse as a query and pass validation.
    pub fn search_body(&self, body: &str) -> ClientResult<SearchResponse> {
        if self.config.strict {
            esquery::parse(body)?.validate()?;
        }
        self.send_search(body)
    }

    /// Stores a raw JSON document in the configured index.
    ///
    /// Cached responses are discarded after a successful write, since the new
    /// document may change any result.
    pub fn index_document(&self, body: &str, refresh: Refresh) -> ClientResult<()> {
        self.ensure_connected()?;
        let index = self.index_name()?;

        if let Err(e) = self.transport.index(index, body, refresh) {
            warn!(index, error = %e, "index request failed");
            return Err(e);
        }

        if let Some(ref cache) = self.cache {
            cache.clear();
        }
        info!(index, refresh = %refresh, "document indexed");
        Ok(())
    }

    /// Serializes `document` to JSON and stores it in the configured index.
    pub fn index_json<D: Serialize>(&self, document: &D, refresh: Refresh) -> ClientResult<()> {
        let body = serde_json::to_string(document)?;
        self.index_document(&body, refresh)
    }

    fn send_search(&self, body: &str) -> ClientResult<SearchResponse> {
        self.ensure_connected()?;
        let index = self.index_name()?;
        let start = Instant::now();
        let key = cache_key(index, body);

        if let Some(ref cache) = self.cache {
            if let Some(mut cached) = cache.get(&key) {
                cached.stats = RequestStats::new(start.elapsed(), true);
                debug!(index, "search served from cache");
                return Ok(cached);
            }
        }

        debug!(index, body, "sending search request");
        let raw = match self.transport.search(index, body) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(index, error = %e, "search request failed");
                return Err(e);
            }
        };

        let mut response: SearchResponse = serde_json::from_str(&raw)?;
        response.stats = RequestStats::new(start.elapsed(), false);

        if let Some(ref cache) = self.cache {
            cache.set(key, response.clone());
        }

        debug!(
            index,
            total = response.total(),
            took_ms = response.took,
            "search completed"
        );
        Ok(response)
    }

    fn ensure_connected(&self) -> ClientResult<()> {
        if self.connected {
            Ok(())
        } else {
            Err(ClientError::NotConnected)
        }
    }

    fn index_name(&self) -> ClientResult<&str> {
        self.config
            .index_name
            .as_deref()
            .ok_or(ClientError::MissingIndex)
    }
}

impl<T: SearchTransport> std::fmt::Debug for SearchClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("config", &self.config)
            .field("connected", &self.connected)
            .field("cache", &self.cache)
            .finish()
    }
}
