//! Request orchestration — the two read operations of the V1 API.
//!
//! Each operation is one logical step chain: translate options, issue a
//! single GET through the transport port, classify the status, decode and
//! reshape the body. No retries, no batching, no shared mutable state
//! across invocations.

use crate::classify::classify;
use crate::config::{API_KEY_HEADER, Config};
use crate::error::Error;
use crate::options::{QueryOptions, QueryParams};
use crate::response::{
    DecodeError, SensorPage, SensorResponse, SensorsPage, SensorsResponse,
};
use crate::transport::{HttpTransport, RawResponse, ReqwestTransport};

/// Client for the PurpleAir V1 sensor endpoints.
///
/// Generic over the transport port so tests can substitute an in-memory
/// fake; production code uses the default [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    transport: T,
    config: Config,
}

impl Client<ReqwestTransport> {
    /// Create a client with the bundled `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Options`] when the configured read token is empty.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> Client<T> {
    /// Create a client over a caller-provided transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Options`] when the configured read token is empty.
    pub fn with_transport(config: Config, transport: T) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Query the bulk sensors endpoint.
    ///
    /// Translates `options` into wire query parameters, issues exactly one
    /// GET to `{base_url}/sensors`, and reshapes the columnar body into a
    /// mapping keyed by sensor index. The reshaped view is computed once
    /// and stored immutably on the returned [`SensorsResponse`].
    ///
    /// # Errors
    ///
    /// - [`Error::Options`] when `options` are malformed (no request is
    ///   issued),
    /// - [`Error::Transport`] when the HTTP call itself fails,
    /// - [`Error::Api`] for a classified non-2xx response,
    /// - [`Error::Decode`] when a 2xx body does not match the wire shape.
    pub async fn request_sensors(
        &self,
        options: &QueryOptions,
    ) -> Result<SensorsResponse, Error> {
        let query = options.to_query_params()?;
        let url = format!("{}/sensors", self.config.base_url);
        let raw = self.send(&url, &query).await?;
        let page: SensorsPage =
            serde_json::from_slice(&raw.body).map_err(DecodeError::Json)?;
        let parsed = page.reshape()?;
        Ok(SensorsResponse::new(raw, parsed))
    }

    /// Query the single-sensor endpoint for `sensor_index`.
    ///
    /// `read_key` is the sole optional query parameter, required for
    /// private sensors. The body is already field-keyed, so no reshape is
    /// performed.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`request_sensors`](Self::request_sensors), minus
    /// the options failures (the signature enforces the types).
    pub async fn request_sensor(
        &self,
        sensor_index: i64,
        read_key: Option<&str>,
    ) -> Result<SensorResponse, Error> {
        let mut query = QueryParams::new();
        if let Some(key) = read_key {
            query.insert("read_key", key.to_string());
        }
        let url = format!("{}/sensors/{sensor_index}", self.config.base_url);
        let raw = self.send(&url, &query).await?;
        let parsed: SensorPage =
            serde_json::from_slice(&raw.body).map_err(DecodeError::Json)?;
        Ok(SensorResponse::new(raw, parsed))
    }

    /// Issue one GET with the read credential attached and classify the
    /// response.
    async fn send(&self, url: &str, query: &QueryParams) -> Result<RawResponse, Error> {
        tracing::debug!(%url, params = query.len(), "issuing GET request");
        let headers = [(API_KEY_HEADER.to_string(), self.config.read_token.clone())];
        let response = self.transport.get(url, query, &headers).await?;
        tracing::trace!(
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );
        Ok(classify(response)?)
    }
}
