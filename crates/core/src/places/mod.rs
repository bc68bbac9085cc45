//! Foursquare Places transformations
//!
//! This module owns the result envelope every tool returns. The submodules hold
//! the pure functions that build upstream parameters and reshape responses.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub mod format;
pub mod location;
pub mod tools;

/// Returned for HTTP 429 responses
pub const RATE_LIMITED_MESSAGE: &str = "Rate limited. Please try again later.";

/// Returned for HTTP 401 responses
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Check your API key.";

/// Environment variable holding the Foursquare API key
pub const API_KEY_VAR: &str = "FOURSQUARE_API_KEY";

/// Message for a missing configuration value
pub fn not_set_message(var: &str) -> String {
    format!("{var} environment variable not set")
}

// ============================================================================
// Result Envelope
// ============================================================================

/// Uniform result of every places operation
///
/// Serializes as `{"success": bool, "data": value|null, "error": string|null}`.
/// A failure never carries data and a success never carries an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacesResult {
    Success(Value),
    Failure(String),
}

impl PlacesResult {
    /// Wrap a serializable value as a successful result
    ///
    /// A value that cannot be represented as JSON becomes a failure.
    pub fn success<T: Serialize>(data: T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => PlacesResult::Success(value),
            Err(e) => PlacesResult::Failure(e.to_string()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        PlacesResult::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PlacesResult::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            PlacesResult::Success(value) => Some(value),
            PlacesResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PlacesResult::Success(_) => None,
            PlacesResult::Failure(message) => Some(message),
        }
    }

    /// Reshape the data of a successful result, leaving failures untouched
    pub fn map_data<T, F>(self, f: F) -> Self
    where
        T: Serialize,
        F: FnOnce(&Value) -> T,
    {
        match self {
            PlacesResult::Success(value) => PlacesResult::success(f(&value)),
            failure => failure,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    success: bool,
    data: Option<&'a Value>,
    error: Option<&'a str>,
}

#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl Serialize for PlacesResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EnvelopeRef {
            success: self.is_success(),
            data: self.data(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PlacesResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = Envelope::deserialize(deserializer)?;

        Ok(if envelope.success {
            PlacesResult::Success(envelope.data.unwrap_or(Value::Null))
        } else {
            PlacesResult::Failure(envelope.error.unwrap_or_default())
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
