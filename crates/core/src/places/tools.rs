//! Tool arguments and upstream request construction
//!
//! Every tool has an argument struct that enumerates its inputs together with
//! their defaults and bounds. Numeric inputs outside their bounds are clamped,
//! never rejected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use super::format::{
    transform_place_snap, transform_search_near, transform_search_near_point, PlaceSnapOutput,
    SearchNearOutput, SearchNearPointOutput,
};

pub const SEARCH_PATH: &str = "/places/search";
pub const NEARBY_PATH: &str = "/places/nearby";

/// Fields requested by `place_details` when none are given
pub const DEFAULT_DETAIL_FIELDS: &str =
    "name,location,categories,description,tel,website,hours,rating,price,photos,tips";

/// Inclusive range and default of a numeric tool input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl Bounds {
    pub const fn new(min: i64, max: i64, default: i64) -> Self {
        Self { min, max, default }
    }

    /// Apply the default to a missing value and saturate to the range
    pub fn resolve(&self, value: Option<i64>) -> i64 {
        value.unwrap_or(self.default).clamp(self.min, self.max)
    }
}

/// Read an optional numeric input as an `i64`, saturating instead of failing
///
/// Integers beyond the `i64` range and floats of any magnitude are accepted;
/// floats are truncated toward zero.
fn saturating_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<Number>::deserialize(deserializer)?.map(|n| saturate(&n)))
}

fn saturate(number: &Number) -> i64 {
    if let Some(value) = number.as_i64() {
        value
    } else if let Some(value) = number.as_u64() {
        i64::try_from(value).unwrap_or(i64::MAX)
    } else {
        number.as_f64().map_or(0, |value| value as i64)
    }
}

pub const SEARCH_LIMIT: Bounds = Bounds::new(1, 50, 5);
pub const SEARCH_RADIUS: Bounds = Bounds::new(1, 100_000, 1000);
pub const SNAP_LIMIT: Bounds = Bounds::new(1, 10, 1);

/// HTTP method of an upstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Upstream call description produced by a tool
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesRequest {
    pub method: Method,
    pub path: String,
    pub params: Map<String, Value>,
}

impl PlacesRequest {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            params: Map::new(),
        }
    }

    fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

// ============================================================================
// search_near
// ============================================================================

/// Arguments of `search_near`: places matching `what` near a named region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchNearArgs {
    #[serde(rename = "where")]
    pub region: String,
    pub what: String,
    #[serde(default, deserialize_with = "saturating_int")]
    pub limit: Option<i64>,
}

impl SearchNearArgs {
    pub fn limit(&self) -> i64 {
        SEARCH_LIMIT.resolve(self.limit)
    }

    pub fn request(&self) -> PlacesRequest {
        PlacesRequest::get(SEARCH_PATH)
            .param("query", self.what.as_str())
            .param("near", self.region.as_str())
            .param("limit", self.limit())
    }

    pub fn output(&self, data: &Value) -> SearchNearOutput {
        transform_search_near(data, &self.what, &self.region)
    }
}

// ============================================================================
// search_near_point
// ============================================================================

/// Arguments of `search_near_point`: places matching `what` around `ll`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchNearPointArgs {
    pub what: String,
    pub ll: String,
    #[serde(default, deserialize_with = "saturating_int")]
    pub radius: Option<i64>,
    #[serde(default, deserialize_with = "saturating_int")]
    pub limit: Option<i64>,
}

impl SearchNearPointArgs {
    pub fn limit(&self) -> i64 {
        SEARCH_LIMIT.resolve(self.limit)
    }

    pub fn radius(&self) -> i64 {
        SEARCH_RADIUS.resolve(self.radius)
    }

    pub fn request(&self) -> PlacesRequest {
        PlacesRequest::get(SEARCH_PATH)
            .param("query", self.what.as_str())
            .param("ll", self.ll.as_str())
            .param("radius", self.radius())
            .param("limit", self.limit())
    }

    pub fn output(&self, data: &Value) -> SearchNearPointOutput {
        transform_search_near_point(data, &self.what, &self.ll, self.radius())
    }
}

// ============================================================================
// place_snap
// ============================================================================

/// Arguments of `place_snap`: the most likely places at `ll`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSnapArgs {
    pub ll: String,
    #[serde(default, deserialize_with = "saturating_int")]
    pub limit: Option<i64>,
}

impl PlaceSnapArgs {
    pub fn limit(&self) -> i64 {
        SNAP_LIMIT.resolve(self.limit)
    }

    pub fn request(&self) -> PlacesRequest {
        PlacesRequest::get(NEARBY_PATH)
            .param("ll", self.ll.as_str())
            .param("limit", self.limit())
    }

    pub fn output(&self, data: &Value) -> PlaceSnapOutput {
        transform_place_snap(data, &self.ll)
    }
}

// ============================================================================
// place_details
// ============================================================================

/// Arguments of `place_details`
///
/// `fsq_id` is forwarded untouched; upstream decides whether it is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDetailsArgs {
    pub fsq_id: String,
    #[serde(default)]
    pub fields: Option<String>,
}

impl PlaceDetailsArgs {
    pub fn fields(&self) -> &str {
        match self.fields.as_deref() {
            Some(fields) if !fields.is_empty() => fields,
            _ => DEFAULT_DETAIL_FIELDS,
        }
    }

    pub fn request(&self) -> PlacesRequest {
        PlacesRequest::get(format!("/places/{}", self.fsq_id)).param("fields", self.fields())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_near(limit: Option<i64>) -> SearchNearArgs {
        SearchNearArgs {
            region: "Times Square, New York".to_string(),
            what: "pizza".to_string(),
            limit,
        }
    }

    #[test]
    fn test_bounds_resolve_default() {
        assert_eq!(SEARCH_LIMIT.resolve(None), 5);
        assert_eq!(SEARCH_RADIUS.resolve(None), 1000);
        assert_eq!(SNAP_LIMIT.resolve(None), 1);
    }

    #[test]
    fn test_search_limit_saturates() {
        assert_eq!(search_near(Some(0)).limit(), 1);
        assert_eq!(search_near(Some(-7)).limit(), 1);
        assert_eq!(search_near(Some(999)).limit(), 50);
        assert_eq!(search_near(Some(50)).limit(), 50);
        assert_eq!(search_near(Some(3)).limit(), 3);
    }

    #[test]
    fn test_radius_saturates() {
        let mut args = SearchNearPointArgs {
            what: "coffee".to_string(),
            ll: "40.758,-73.9855".to_string(),
            radius: Some(0),
            limit: None,
        };
        assert_eq!(args.radius(), 1);

        args.radius = Some(250_000);
        assert_eq!(args.radius(), 100_000);

        args.radius = Some(500);
        assert_eq!(args.radius(), 500);
    }

    #[test]
    fn test_snap_limit_saturates() {
        let mut args = PlaceSnapArgs {
            ll: "40.758,-73.9855".to_string(),
            limit: Some(0),
        };
        assert_eq!(args.limit(), 1);

        args.limit = Some(11);
        assert_eq!(args.limit(), 10);
    }

    #[test]
    fn test_oversized_numbers_saturate() {
        let args: SearchNearArgs = serde_json::from_value(json!({
            "where": "Brooklyn",
            "what": "gym",
            "limit": u64::MAX
        }))
        .unwrap();
        assert_eq!(args.limit(), 50);

        let args: SearchNearArgs = serde_json::from_str(
            r#"{"where": "Brooklyn", "what": "gym", "limit": 9223372036854775808}"#,
        )
        .unwrap();
        assert_eq!(args.limit(), 50);

        let args: PlaceSnapArgs =
            serde_json::from_value(json!({"ll": "40.758,-73.9855", "limit": -1e30})).unwrap();
        assert_eq!(args.limit(), 1);

        let args: SearchNearPointArgs = serde_json::from_value(json!({
            "what": "coffee",
            "ll": "40.758,-73.9855",
            "radius": 1e12
        }))
        .unwrap();
        assert_eq!(args.radius(), 100_000);
    }

    #[test]
    fn test_float_inputs_truncate() {
        let args: SearchNearPointArgs = serde_json::from_value(json!({
            "what": "coffee",
            "ll": "40.758,-73.9855",
            "radius": 250.9,
            "limit": 3.0
        }))
        .unwrap();

        assert_eq!(args.radius(), 250);
        assert_eq!(args.limit(), 3);
    }

    #[test]
    fn test_null_and_non_numeric_inputs() {
        let args: PlaceSnapArgs =
            serde_json::from_value(json!({"ll": "40.758,-73.9855", "limit": null})).unwrap();
        assert_eq!(args.limit(), 1);

        assert!(serde_json::from_value::<PlaceSnapArgs>(json!({
            "ll": "40.758,-73.9855",
            "limit": "many"
        }))
        .is_err());
    }

    #[test]
    fn test_search_near_request() {
        let request = search_near(Some(999)).request();

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/places/search");
        assert_eq!(
            Value::Object(request.params),
            json!({"query": "pizza", "near": "Times Square, New York", "limit": 50})
        );
    }

    #[test]
    fn test_search_near_point_request() {
        let args: SearchNearPointArgs = serde_json::from_value(json!({
            "what": "coffee",
            "ll": "40.758,-73.9855"
        }))
        .unwrap();

        assert_eq!(
            Value::Object(args.request().params),
            json!({"query": "coffee", "ll": "40.758,-73.9855", "radius": 1000, "limit": 5})
        );
    }

    #[test]
    fn test_place_snap_request() {
        let args: PlaceSnapArgs =
            serde_json::from_value(json!({"ll": "40.758,-73.9855", "limit": 2})).unwrap();
        let request = args.request();

        assert_eq!(request.path, "/places/nearby");
        assert_eq!(
            Value::Object(request.params),
            json!({"ll": "40.758,-73.9855", "limit": 2})
        );
    }

    #[test]
    fn test_place_details_default_fields() {
        let args: PlaceDetailsArgs = serde_json::from_value(json!({"fsq_id": "4a1b2c"})).unwrap();
        let request = args.request();

        assert_eq!(request.path, "/places/4a1b2c");
        assert_eq!(
            request.params["fields"],
            json!("name,location,categories,description,tel,website,hours,rating,price,photos,tips")
        );
    }

    #[test]
    fn test_place_details_empty_fields_uses_default() {
        let args = PlaceDetailsArgs {
            fsq_id: "a".to_string(),
            fields: Some(String::new()),
        };
        assert_eq!(args.fields(), DEFAULT_DETAIL_FIELDS);
    }

    #[test]
    fn test_place_details_custom_fields() {
        let args = PlaceDetailsArgs {
            fsq_id: "a".to_string(),
            fields: Some("name,tel".to_string()),
        };
        assert_eq!(args.request().params["fields"], json!("name,tel"));
    }

    #[test]
    fn test_search_near_args_rename_where() {
        let args: SearchNearArgs = serde_json::from_value(json!({
            "where": "Brooklyn",
            "what": "gym"
        }))
        .unwrap();

        assert_eq!(args.region, "Brooklyn");
        assert_eq!(args.limit(), 5);
    }

    #[test]
    fn test_search_near_point_output_uses_clamped_radius() {
        let args = SearchNearPointArgs {
            what: "coffee".to_string(),
            ll: "40.758,-73.9855".to_string(),
            radius: Some(-1),
            limit: None,
        };

        let output = args.output(&json!({"results": []}));

        assert_eq!(output.radius_meters, 1);
        assert_eq!(output.coordinates, "40.758,-73.9855");
    }
}
