//! Pure transformation of IP geolocation responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PlacesResult;

/// Default IP geolocation endpoint
pub const DEFAULT_IP_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

pub const IP_LOCATION_NOTE: &str = "This is an approximation based on IP address.";

pub const NO_IP_LOCATION_MESSAGE: &str = "Could not determine location from IP.";

/// Approximate location of the caller
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IpLocation {
    /// `"lat,lng"`
    pub coordinates: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub note: String,
}

fn coordinate(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn string_field(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Build the `get_location` result from a geolocation response
///
/// Fails when either coordinate is missing.
pub fn transform_ip_location(data: &Value) -> PlacesResult {
    let (Some(lat), Some(lng)) = (
        coordinate(data.get("latitude")),
        coordinate(data.get("longitude")),
    ) else {
        return PlacesResult::failure(NO_IP_LOCATION_MESSAGE);
    };

    PlacesResult::success(IpLocation {
        coordinates: format!("{lat},{lng}"),
        city: string_field(data, "city"),
        region: string_field(data, "region"),
        country: string_field(data, "country_name"),
        note: IP_LOCATION_NOTE.to_string(),
    })
}

/// Failure for a geolocation lookup that never produced a response body
pub fn location_lookup_failed(error: impl std::fmt::Display) -> PlacesResult {
    PlacesResult::failure(format!("Location lookup failed: {error}"))
}
