//! Query options — typed request options and their wire translation.
//!
//! [`QueryOptions`] replaces the loose parameter hash of the upstream API
//! docs with a compile-time-checked structure. Translation to wire query
//! parameters is a pure function: no IO, deterministic, and every failure
//! is an [`OptionsError`] raised before any request is issued.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::OptionsError;

/// Flat mapping from wire parameter name to serialized scalar value.
///
/// Absent or neutral options produce no key at all — the map never holds
/// null-ish placeholders.
pub type QueryParams = BTreeMap<&'static str, String>;

/// Fields requested when the caller does not specify any.
pub const DEFAULT_FIELDS: [&str; 6] = ["icon", "name", "latitude", "longitude", "altitude", "pm2.5"];

/// Where a sensor is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationType {
    /// Indoor sensor (wire code `1`).
    Inside,
    /// Outdoor sensor (wire code `0`).
    Outside,
}

/// Deserializes through [`FromStr`], so `"OUTSIDE"` and `"Inside"` are
/// accepted anywhere a [`QueryOptions`] is deserialized from.
impl<'de> serde::Deserialize<'de> for LocationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for LocationType {
    type Err = OptionsError;

    /// Case-insensitive parse; normalization happens here, before any set
    /// logic on the parsed values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inside" => Ok(Self::Inside),
            "outside" => Ok(Self::Outside),
            _ => Err(OptionsError::UnknownLocationType(s.to_string())),
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Geographic bounding box selecting sensors by area.
///
/// Expands to the four wire parameters `nwlat`, `nwlng`, `selat`, `selng`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    /// North-west corner.
    pub northwest: Coordinates,
    /// South-east corner.
    pub southeast: Coordinates,
}

impl BoundingBox {
    /// Build a bounding box from its two corners.
    pub fn new(northwest: impl Into<Coordinates>, southeast: impl Into<Coordinates>) -> Self {
        Self {
            northwest: northwest.into(),
            southeast: southeast.into(),
        }
    }
}

/// Options for the bulk sensors query.
///
/// Every field is optional; absent fields contribute no wire parameter
/// (except `fields`, which falls back to [`DEFAULT_FIELDS`]).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Sensor data fields to return; defaults to [`DEFAULT_FIELDS`].
    pub fields: Option<Vec<String>>,
    /// Restrict results to indoor and/or outdoor sensors. Requesting both
    /// is the server default and produces no wire parameter.
    pub location_type: Option<Vec<LocationType>>,
    /// Only return these sensor indices.
    pub show_only: Option<Vec<i64>>,
    /// Only return sensors modified after this unix timestamp.
    pub modified_since: Option<i64>,
    /// Only return sensors updated within the last `max_age` seconds.
    pub max_age: Option<i64>,
    /// Only return sensors inside this geographic area.
    pub bounding_box: Option<BoundingBox>,
    /// Read keys required to access private sensors.
    pub read_keys: Option<Vec<String>>,
}

impl QueryOptions {
    /// Options with every field absent (server defaults plus
    /// [`DEFAULT_FIELDS`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request specific data fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to the given location types.
    #[must_use]
    pub fn location_type(mut self, types: impl IntoIterator<Item = LocationType>) -> Self {
        self.location_type = Some(types.into_iter().collect());
        self
    }

    /// Only return the given sensor indices.
    #[must_use]
    pub fn show_only(mut self, indices: impl IntoIterator<Item = i64>) -> Self {
        self.show_only = Some(indices.into_iter().collect());
        self
    }

    /// Only return sensors modified after this unix timestamp.
    #[must_use]
    pub fn modified_since(mut self, timestamp: i64) -> Self {
        self.modified_since = Some(timestamp);
        self
    }

    /// Only return sensors updated within the last `seconds`.
    #[must_use]
    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Only return sensors inside the given bounding box.
    #[must_use]
    pub fn bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    /// Attach read keys for private sensors.
    #[must_use]
    pub fn read_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Translate these options into wire query parameters.
    ///
    /// Pure and deterministic: identical options always yield an identical
    /// mapping.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError`] when a supplied option is malformed (an
    /// empty vector where at least one element is required).
    pub fn to_query_params(&self) -> Result<QueryParams, OptionsError> {
        let mut params = QueryParams::new();
        params.insert("fields", self.joined_fields()?);
        if let Some(indices) = &self.show_only {
            if indices.is_empty() {
                return Err(OptionsError::EmptyShowOnly);
            }
            let joined = indices
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            params.insert("show_only", joined);
        }
        if let Some(code) = self.location_type_code()? {
            params.insert("location_type", code.to_string());
        }
        if let Some(timestamp) = self.modified_since {
            params.insert("modified_since", timestamp.to_string());
        }
        if let Some(seconds) = self.max_age {
            params.insert("max_age", seconds.to_string());
        }
        if let Some(bounding_box) = &self.bounding_box {
            params.insert("nwlat", bounding_box.northwest.latitude.to_string());
            params.insert("nwlng", bounding_box.northwest.longitude.to_string());
            params.insert("selat", bounding_box.southeast.latitude.to_string());
            params.insert("selng", bounding_box.southeast.longitude.to_string());
        }
        if let Some(keys) = &self.read_keys {
            if keys.is_empty() {
                return Err(OptionsError::EmptyReadKeys);
            }
            params.insert("read_keys", keys.join(","));
        }
        Ok(params)
    }

    fn joined_fields(&self) -> Result<String, OptionsError> {
        match &self.fields {
            None => Ok(DEFAULT_FIELDS.join(",")),
            Some(fields) if fields.is_empty() => Err(OptionsError::EmptyFields),
            Some(fields) => Ok(fields.join(",")),
        }
    }

    /// The numeric `location_type` wire code, or `None` when the option is
    /// absent or neutral (both types requested).
    fn location_type_code(&self) -> Result<Option<u8>, OptionsError> {
        let Some(types) = &self.location_type else {
            return Ok(None);
        };
        if types.is_empty() {
            return Err(OptionsError::EmptyLocationType);
        }
        let inside = types.contains(&LocationType::Inside);
        let outside = types.contains(&LocationType::Outside);
        Ok(match (inside, outside) {
            (true, true) => None,
            (true, false) => Some(1),
            // Non-empty without Inside means Outside is present.
            _ => Some(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── fields ──────────────────────────────────────────────────────────

    #[test]
    fn should_join_default_fields_when_absent() {
        let params = QueryOptions::new().to_query_params().unwrap();
        assert_eq!(
            params.get("fields").map(String::as_str),
            Some("icon,name,latitude,longitude,altitude,pm2.5")
        );
    }

    #[test]
    fn should_join_supplied_fields_with_commas() {
        let params = QueryOptions::new()
            .fields(["name", "pm2.5"])
            .to_query_params()
            .unwrap();
        assert_eq!(params.get("fields").map(String::as_str), Some("name,pm2.5"));
    }

    #[test]
    fn should_reject_empty_fields() {
        let result = QueryOptions::new().fields(Vec::<String>::new()).to_query_params();
        assert!(matches!(result, Err(OptionsError::EmptyFields)));
    }

    // ── location_type ───────────────────────────────────────────────────

    #[test]
    fn should_parse_location_type_case_insensitively() {
        assert_eq!("INSIDE".parse::<LocationType>().unwrap(), LocationType::Inside);
        assert_eq!("Outside".parse::<LocationType>().unwrap(), LocationType::Outside);
    }

    #[test]
    fn should_reject_unknown_location_type_string() {
        let err = "underwater".parse::<LocationType>().unwrap_err();
        assert!(matches!(err, OptionsError::UnknownLocationType(value) if value == "underwater"));
    }

    #[test]
    fn should_omit_location_type_when_both_requested() {
        let params = QueryOptions::new()
            .location_type([LocationType::Outside, LocationType::Inside])
            .to_query_params()
            .unwrap();
        assert!(!params.contains_key("location_type"));
    }

    #[test]
    fn should_translate_inside_only_to_code_1() {
        let params = QueryOptions::new()
            .location_type([LocationType::Inside])
            .to_query_params()
            .unwrap();
        assert_eq!(params.get("location_type").map(String::as_str), Some("1"));
    }

    #[test]
    fn should_translate_outside_only_to_code_0() {
        let params = QueryOptions::new()
            .location_type([LocationType::Outside])
            .to_query_params()
            .unwrap();
        assert_eq!(params.get("location_type").map(String::as_str), Some("0"));
    }

    #[test]
    fn should_reject_empty_location_type() {
        let result = QueryOptions::new().location_type([]).to_query_params();
        assert!(matches!(result, Err(OptionsError::EmptyLocationType)));
    }

    // ── show_only ───────────────────────────────────────────────────────

    #[test]
    fn should_join_show_only_indices_with_commas() {
        let params = QueryOptions::new()
            .show_only([20, 47])
            .to_query_params()
            .unwrap();
        assert_eq!(params.get("show_only").map(String::as_str), Some("20,47"));
    }

    #[test]
    fn should_reject_empty_show_only() {
        let result = QueryOptions::new().show_only([]).to_query_params();
        assert!(matches!(result, Err(OptionsError::EmptyShowOnly)));
    }

    // ── scalar passthrough ──────────────────────────────────────────────

    #[test]
    fn should_pass_through_modified_since_and_max_age() {
        let params = QueryOptions::new()
            .modified_since(1_614_787_814)
            .max_age(3600)
            .to_query_params()
            .unwrap();
        assert_eq!(params.get("modified_since").map(String::as_str), Some("1614787814"));
        assert_eq!(params.get("max_age").map(String::as_str), Some("3600"));
    }

    #[test]
    fn should_omit_absent_options_entirely() {
        let params = QueryOptions::new().to_query_params().unwrap();
        assert_eq!(params.len(), 1);
        assert!(params.contains_key("fields"));
    }

    // ── bounding_box ────────────────────────────────────────────────────

    #[test]
    fn should_expand_bounding_box_to_four_corner_parameters() {
        let params = QueryOptions::new()
            .bounding_box(BoundingBox::new([49.0, 33.0], [22.0, 27.0]))
            .to_query_params()
            .unwrap();
        assert_eq!(params.get("nwlat").map(String::as_str), Some("49"));
        assert_eq!(params.get("nwlng").map(String::as_str), Some("33"));
        assert_eq!(params.get("selat").map(String::as_str), Some("22"));
        assert_eq!(params.get("selng").map(String::as_str), Some("27"));
    }

    #[test]
    fn should_keep_fractional_bounding_box_coordinates() {
        let params = QueryOptions::new()
            .bounding_box(BoundingBox::new(
                (37.779_026_2, -122.419_906_1),
                (37.653_540_3, -122.416_866_4),
            ))
            .to_query_params()
            .unwrap();
        assert_eq!(params.get("nwlat").map(String::as_str), Some("37.7790262"));
        assert_eq!(params.get("selng").map(String::as_str), Some("-122.4168664"));
    }

    // ── read_keys ───────────────────────────────────────────────────────

    #[test]
    fn should_join_read_keys_with_commas() {
        let params = QueryOptions::new()
            .read_keys(["KEY1", "KEY2"])
            .to_query_params()
            .unwrap();
        assert_eq!(params.get("read_keys").map(String::as_str), Some("KEY1,KEY2"));
    }

    #[test]
    fn should_reject_empty_read_keys() {
        let result = QueryOptions::new()
            .read_keys(Vec::<String>::new())
            .to_query_params();
        assert!(matches!(result, Err(OptionsError::EmptyReadKeys)));
    }

    // ── determinism ─────────────────────────────────────────────────────

    #[test]
    fn should_produce_identical_params_for_identical_options() {
        let options = QueryOptions::new()
            .fields(["name"])
            .show_only([20, 47])
            .max_age(3600);
        assert_eq!(options.to_query_params().unwrap(), options.to_query_params().unwrap());
    }

    // ── deserialization ─────────────────────────────────────────────────

    #[test]
    fn should_deserialize_mixed_case_location_type() {
        let options: QueryOptions = toml::from_str("location_type = ['OUTSIDE']").unwrap();
        let params = options.to_query_params().unwrap();
        assert_eq!(params.get("location_type").map(String::as_str), Some("0"));

        let options: QueryOptions = toml::from_str("location_type = ['Inside']").unwrap();
        let params = options.to_query_params().unwrap();
        assert_eq!(params.get("location_type").map(String::as_str), Some("1"));
    }

    #[test]
    fn should_omit_location_type_when_deserialized_with_both_in_mixed_case() {
        let options: QueryOptions =
            toml::from_str("location_type = ['INSIDE', 'Outside']").unwrap();
        let params = options.to_query_params().unwrap();
        assert!(!params.contains_key("location_type"));
    }

    #[test]
    fn should_reject_unknown_location_type_during_deserialization() {
        let result: Result<QueryOptions, _> = toml::from_str("location_type = ['underwater']");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unknown location type"), "{message}");
    }

    #[test]
    fn should_deserialize_options_from_toml() {
        let options: QueryOptions = toml::from_str(
            "
            fields = ['name', 'pm2.5']
            location_type = ['outside']
            max_age = 3600

            [bounding_box.northwest]
            latitude = 49.0
            longitude = 33.0

            [bounding_box.southeast]
            latitude = 22.0
            longitude = 27.0
            ",
        )
        .unwrap();
        let params = options.to_query_params().unwrap();
        assert_eq!(params.get("location_type").map(String::as_str), Some("0"));
        assert_eq!(params.get("nwlat").map(String::as_str), Some("49"));
    }
}
