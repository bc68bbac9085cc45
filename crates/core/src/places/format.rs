//! Pure transformation functions for Foursquare place records
//!
//! Upstream records are read as loose JSON: any missing or mistyped field
//! becomes `None` or an empty list instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of tips kept in a place detail
pub const MAX_TIPS: usize = 5;

// ============================================================================
// Output Models
// ============================================================================

/// Compact view of a place returned by search and snap operations
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceSummary {
    pub fsq_id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub distance: Option<u64>,
    pub categories: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Contact information of a place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// Full view of a single place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceDetail {
    pub fsq_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Value>,
    pub categories: Vec<String>,
    pub contact: Contact,
    pub hours: Option<Value>,
    pub rating: Option<f64>,
    pub price: Option<u64>,
    pub photos: Vec<Value>,
    pub tips: Vec<String>,
}

/// Output of the `search_near` tool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchNearOutput {
    pub query: String,
    pub location: String,
    pub count: usize,
    pub places: Vec<PlaceSummary>,
}

/// Output of the `search_near_point` tool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchNearPointOutput {
    pub query: String,
    pub coordinates: String,
    pub radius_meters: i64,
    pub count: usize,
    pub places: Vec<PlaceSummary>,
}

/// Output of the `place_snap` tool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceSnapOutput {
    pub coordinates: String,
    pub count: usize,
    pub places: Vec<PlaceSummary>,
}

// ============================================================================
// Pure Helper Functions
// ============================================================================

fn string_field(value: Option<&Value>, key: &str) -> Option<String> {
    value?.get(key)?.as_str().map(str::to_owned)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn category_names(place: &Value) -> Vec<String> {
    place
        .get("categories")
        .and_then(Value::as_array)
        .map(|categories| {
            categories
                .iter()
                .filter_map(|c| c.get("name").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Photo groups of a place.
///
/// The documented shape is `{"groups": [...]}`; a bare array is used as is.
fn photo_groups(place: &Value) -> Vec<Value> {
    match place.get("photos") {
        Some(Value::Object(photos)) => photos
            .get("groups")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        Some(Value::Array(photos)) => photos.clone(),
        _ => Vec::new(),
    }
}

fn tip_texts(place: &Value) -> Vec<String> {
    place
        .get("tips")
        .and_then(Value::as_array)
        .map(|tips| {
            tips.iter()
                .take(MAX_TIPS)
                .filter_map(|t| t.get("text").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Summaries of the `results` array of a search or nearby response
pub fn format_results(data: &Value) -> Vec<PlaceSummary> {
    data.get("results")
        .and_then(Value::as_array)
        .map(|places| places.iter().map(format_summary).collect())
        .unwrap_or_default()
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Reduce a raw place record to a `PlaceSummary`
///
/// Coordinates come from `geocodes.main` and are `None` when it is absent.
pub fn format_summary(place: &Value) -> PlaceSummary {
    let location = place.get("location");
    let main = place.get("geocodes").and_then(|g| g.get("main"));

    PlaceSummary {
        fsq_id: string_field(Some(place), "fsq_id"),
        name: string_field(Some(place), "name"),
        address: string_field(location, "formatted_address")
            .or_else(|| string_field(location, "address")),
        locality: string_field(location, "locality"),
        region: string_field(location, "region"),
        country: string_field(location, "country"),
        distance: place.get("distance").and_then(Value::as_u64),
        categories: category_names(place),
        latitude: main.and_then(|m| m.get("latitude")).and_then(Value::as_f64),
        longitude: main.and_then(|m| m.get("longitude")).and_then(Value::as_f64),
    }
}

/// Reduce a raw place detail record to a `PlaceDetail`
///
/// # Arguments
/// * `place` - The raw response of `/places/{fsq_id}`
/// * `fsq_id` - The identifier that was requested
pub fn format_detail(place: &Value, fsq_id: &str) -> PlaceDetail {
    PlaceDetail {
        fsq_id: fsq_id.to_string(),
        name: string_field(Some(place), "name"),
        description: string_field(Some(place), "description"),
        location: present(place.get("location")).cloned(),
        categories: category_names(place),
        contact: Contact {
            phone: string_field(Some(place), "tel"),
            website: string_field(Some(place), "website"),
        },
        hours: present(place.get("hours")).cloned(),
        rating: place.get("rating").and_then(Value::as_f64),
        price: place.get("price").and_then(Value::as_u64),
        photos: photo_groups(place),
        tips: tip_texts(place),
    }
}

pub fn transform_search_near(data: &Value, query: &str, location: &str) -> SearchNearOutput {
    let places = format_results(data);

    SearchNearOutput {
        query: query.to_string(),
        location: location.to_string(),
        count: places.len(),
        places,
    }
}

pub fn transform_search_near_point(
    data: &Value,
    query: &str,
    coordinates: &str,
    radius: i64,
) -> SearchNearPointOutput {
    let places = format_results(data);

    SearchNearPointOutput {
        query: query.to_string(),
        coordinates: coordinates.to_string(),
        radius_meters: radius,
        count: places.len(),
        places,
    }
}

pub fn transform_place_snap(data: &Value, coordinates: &str) -> PlaceSnapOutput {
    let places = format_results(data);

    PlaceSnapOutput {
        coordinates: coordinates.to_string(),
        count: places.len(),
        places,
    }
}

// ============================================================================
// Tests
// ============================================================================
