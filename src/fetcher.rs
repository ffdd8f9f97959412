use std::time::Duration;
use reqwest::blocking::{Client, ClientBuilder};
use serde_json::Value;
use tracing::{debug, info};
use crate::error::TrackerError;

/// Query string pairs appended to a request.
pub(crate) type Query<'a> = [(&'a str, String)];

/// Blocking JSON client shared by every request of a run.
pub(crate) struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub(crate) const TIMEOUT: Duration = Duration::from_secs(10);

    pub(crate) fn new() -> Result<Fetcher, TrackerError> {
        Self::build(Client::builder())
    }

    fn build(builder: ClientBuilder) -> Result<Fetcher, TrackerError> {
        let client = builder
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(TrackerError::ClientSetup)?;
        Ok(Fetcher { client })
    }

    ///
    /// GET `url`, optionally with a query string, and decode the body as JSON.
    ///
    /// Any transport failure, non-success status or undecodable body is an
    /// error naming the URL. Nothing is retried.
    ///
    pub(crate) fn fetch(&self, url: &str, query: Option<&Query>) -> Result<Value, TrackerError> {
        let mut request = self.client.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }

        debug!(url, ?query, "GET");
        let response = request.send()
            .map_err(|source| TrackerError::Network { url: url.to_string(), source })?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(TrackerError::HttpStatus { url: final_url, status });
        }

        let body = response.text()
            .map_err(|source| TrackerError::Network { url: final_url.clone(), source })?;
        let value = serde_json::from_str(&body)
            .map_err(|source| TrackerError::JsonDecode { url: final_url.clone(), source })?;

        info!(url = %final_url, %status, bytes = body.len(), "fetched");
        Ok(value)
    }

    /// Like [`Fetcher::fetch`], but the first failure ends the process.
    pub(crate) fn fetch_or_exit(&self, url: &str, query: Option<&Query>) -> Value {
        self.fetch(url, query).unwrap_or_else(|err| err.exit())
    }

    /// Client for the loopback test server; ignores proxy settings of the environment.
    #[cfg(test)]
    pub(crate) fn local() -> Fetcher {
        Self::build(Client::builder().no_proxy()).expect("building the test client")
    }
}
