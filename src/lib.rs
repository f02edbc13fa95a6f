//! # purpleair-client
//!
//! Async client for the [PurpleAir V1 API](https://api.purpleair.com/)
//! sensor endpoints: bulk sensor queries with typed options, single-sensor
//! lookup, and a classified error taxonomy.
//!
//! The bulk endpoint answers in columnar form (a `fields` array plus rows
//! of values); this crate reshapes it into a mapping keyed by sensor
//! index so records can be looked up directly.
//!
//! ## Quick start
//!
//! ```ignore
//! use purpleair_client::{Client, Config, LocationType, QueryOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), purpleair_client::Error> {
//!     let client = Client::new(Config::new("your-read-token"))?;
//!
//!     let options = QueryOptions::new()
//!         .fields(["name", "pm2.5"])
//!         .location_type([LocationType::Outside])
//!         .max_age(3600);
//!     let response = client.request_sensors(&options).await?;
//!     if let Some(record) = response.sensor(47) {
//!         println!("sensor 47: {record:?}");
//!     }
//!
//!     let single = client.request_sensor(20, None).await?;
//!     println!("sensor 20: {:?}", single.sensor());
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! All failures are typed and branchable without string matching:
//! [`OptionsError`] for malformed input (raised before any network call),
//! [`ApiError`] for classified non-2xx responses (with the error-type tag
//! the API embeds in the body), [`TransportError`] for connection-level
//! failures. See [`error`] for the full taxonomy.
//!
//! ## Transport
//!
//! The HTTP transport is a port ([`transport::HttpTransport`]) with a
//! bundled `reqwest` implementation. Timeouts, proxies, and TLS settings
//! belong to the transport; substitute your own implementation (or a
//! pre-configured [`reqwest::Client`]) where needed.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod options;
pub mod response;
pub mod transport;

pub use client::Client;
pub use config::Config;
pub use error::{ApiError, ApiErrorKind, Error, OptionsError, TransportError};
pub use options::{BoundingBox, Coordinates, LocationType, QueryOptions, QueryParams};
pub use response::{SensorRecord, SensorResponse, SensorsData, SensorsResponse};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport};
