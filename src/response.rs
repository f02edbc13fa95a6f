//! Wire response types and the columnar-to-keyed reshape.
//!
//! The bulk endpoint answers in columnar form — a `fields` array naming
//! the columns and `data` rows carrying one sensor each, positionally
//! aligned. [`SensorsPage::reshape`] zips the two into a mapping keyed by
//! sensor index, which is by convention the first value of every row. The
//! single-sensor endpoint is already field-keyed and passes through.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::transport::RawResponse;

/// One sensor's data, keyed by field name.
pub type SensorRecord = serde_json::Map<String, Value>;

/// Failures decoding a 2xx body into the expected wire shape.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body is not valid JSON of the expected shape.
    #[error("response body is not valid JSON of the expected shape")]
    Json(#[from] serde_json::Error),

    /// A data row's first value (the sensor index) is not an integer.
    #[error("row {row} does not start with an integer sensor index")]
    NonIntegerSensorIndex {
        /// Zero-based position of the offending row.
        row: usize,
    },
}

/// Columnar wire body of the bulk sensors endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorsPage {
    /// Column names, in row order. The first is the sensor index.
    pub fields: Vec<String>,
    /// One row per sensor, positionally aligned with `fields`.
    pub data: Vec<Vec<Value>>,
    /// API version string reported by the server.
    pub api_version: String,
    /// Server timestamp of the response.
    pub time_stamp: i64,
    /// Timestamp of the underlying data snapshot, when reported.
    #[serde(default)]
    pub data_time_stamp: Option<i64>,
    /// The `max_age` the server applied, in seconds.
    pub max_age: i64,
}

impl SensorsPage {
    /// Reshape the columnar rows into a mapping from sensor index to a
    /// field-keyed record.
    ///
    /// Every row produces exactly one entry; when the same sensor index
    /// appears twice the later row wins. Rows are expected to match
    /// `fields` in length — a mismatch is an upstream bug and zips to the
    /// shorter of the two.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NonIntegerSensorIndex`] when a row does not
    /// start with an integer.
    pub fn reshape(self) -> Result<SensorsData, DecodeError> {
        let Self {
            fields,
            data,
            api_version,
            time_stamp,
            data_time_stamp,
            max_age,
        } = self;
        let mut shaped = BTreeMap::new();
        for (row_number, row) in data.into_iter().enumerate() {
            let index = row
                .first()
                .and_then(Value::as_i64)
                .ok_or(DecodeError::NonIntegerSensorIndex { row: row_number })?;
            let record: SensorRecord = fields.iter().cloned().zip(row).collect();
            shaped.insert(index, record);
        }
        tracing::trace!(sensors = shaped.len(), "reshaped columnar sensor data");
        Ok(SensorsData {
            fields,
            api_version,
            time_stamp,
            data_time_stamp,
            max_age,
            data: shaped,
        })
    }
}

/// Reshaped bulk sensor data, keyed by sensor index.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorsData {
    /// Column names as returned by the server; each record's key set.
    pub fields: Vec<String>,
    /// API version string reported by the server.
    pub api_version: String,
    /// Server timestamp of the response.
    pub time_stamp: i64,
    /// Timestamp of the underlying data snapshot, when reported.
    pub data_time_stamp: Option<i64>,
    /// The `max_age` the server applied, in seconds.
    pub max_age: i64,
    /// One record per sensor, keyed by sensor index.
    pub data: BTreeMap<i64, SensorRecord>,
}

/// Wire body of the single-sensor endpoint — already field-keyed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SensorPage {
    /// API version string reported by the server.
    pub api_version: String,
    /// Server timestamp of the response.
    pub time_stamp: i64,
    /// The sensor's data, keyed by field name.
    pub sensor: SensorRecord,
}

/// Result of a bulk sensors request: the raw exchange plus the reshaped
/// view, computed once at request time.
#[derive(Debug, Clone)]
pub struct SensorsResponse {
    raw: RawResponse,
    parsed: SensorsData,
}

impl SensorsResponse {
    pub(crate) fn new(raw: RawResponse, parsed: SensorsData) -> Self {
        Self { raw, parsed }
    }

    /// The raw HTTP response as received.
    #[must_use]
    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    /// The reshaped response, keyed by sensor index.
    #[must_use]
    pub fn parsed(&self) -> &SensorsData {
        &self.parsed
    }

    /// Convenience lookup of a single sensor's record.
    #[must_use]
    pub fn sensor(&self, index: i64) -> Option<&SensorRecord> {
        self.parsed.data.get(&index)
    }
}

/// Result of a single-sensor request. No reshape is needed — the wire
/// body is already field-keyed — but the shape mirrors
/// [`SensorsResponse`] for API symmetry.
#[derive(Debug, Clone)]
pub struct SensorResponse {
    raw: RawResponse,
    parsed: SensorPage,
}

impl SensorResponse {
    pub(crate) fn new(raw: RawResponse, parsed: SensorPage) -> Self {
        Self { raw, parsed }
    }

    /// The raw HTTP response as received.
    #[must_use]
    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    /// The decoded response body.
    #[must_use]
    pub fn parsed(&self) -> &SensorPage {
        &self.parsed
    }

    /// The sensor's record, keyed by field name.
    #[must_use]
    pub fn sensor(&self) -> &SensorRecord {
        &self.parsed.sensor
    }
}
