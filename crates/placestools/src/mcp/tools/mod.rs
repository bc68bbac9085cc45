mod places;

use placestools_core::places::PlacesResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, ServerState, Tool};

/// Name announced in `initialize`
pub const SERVER_NAME: &str = "foursquare-places-mcp";

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn internal_error(e: serde_json::Error) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    }
}

/// Decode tool arguments, treating missing arguments as an empty object
pub fn parse_arguments<T: DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    let arguments = match arguments {
        Some(serde_json::Value::Null) | None => serde_json::json!({}),
        Some(value) => value,
    };

    serde_json::from_value(arguments).map_err(|e| JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

/// Wrap an envelope in the MCP result format
///
/// The envelope is the text payload; a failed envelope also sets `isError`.
pub fn envelope_result(result: &PlacesResult) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: (!result.is_success()).then_some(true),
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "search_near".to_string(),
            description: "Search for places near a particular named region using Foursquare Places API. Returns places with details like name, address, categories, and distance. Best for queries like 'coffee shops near Times Square'. Requires the FOURSQUARE_API_KEY environment variable.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "where": {
                        "type": "string",
                        "description": "A geographic region (e.g., 'Los Angeles', 'Times Square', 'Brooklyn')"
                    },
                    "what": {
                        "type": "string",
                        "description": "What to look for (e.g., 'coffee shop', 'pizza', 'gym', 'hotel')"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Number of results to return (1-50, default: 5)"
                    }
                },
                "required": ["where", "what"]
            }),
        },
        Tool {
            name: "search_near_point".to_string(),
            description: "Search for places near specific latitude/longitude coordinates. More precise than searching by named region. Best for queries when you have exact coordinates. Requires the FOURSQUARE_API_KEY environment variable.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "what": {
                        "type": "string",
                        "description": "What to look for (e.g., 'coffee shop', 'pizza')"
                    },
                    "ll": {
                        "type": "string",
                        "description": "Comma-separated lat,lng (e.g., '40.74,-74.0')"
                    },
                    "radius": {
                        "type": "integer",
                        "description": "Search radius in meters (1-100000, default: 1000)"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Number of results to return (1-50, default: 5)"
                    }
                },
                "required": ["what", "ll"]
            }),
        },
        Tool {
            name: "place_snap".to_string(),
            description: "Get the most likely place the user is at based on their location coordinates. Uses Foursquare's Place Snap technology. Ideal for 'where am I?' queries. Requires the FOURSQUARE_API_KEY environment variable.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "ll": {
                        "type": "string",
                        "description": "Comma-separated lat,lng of the user's location (e.g., '40.74,-74.0')"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Number of candidate places to return (1-10, default: 1)"
                    }
                },
                "required": ["ll"]
            }),
        },
        Tool {
            name: "place_details".to_string(),
            description: "Get comprehensive details about a specific place using its Foursquare ID (fsq_id). Includes description, contact info, hours, rating, price, photos, and tips. Requires the FOURSQUARE_API_KEY environment variable.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "fsq_id": {
                        "type": "string",
                        "description": "Foursquare place ID obtained from search results"
                    },
                    "fields": {
                        "type": "string",
                        "description": "Comma-separated list of fields to include (default: name,location,categories,description,tel,website,hours,rating,price,photos,tips)"
                    }
                },
                "required": ["fsq_id"]
            }),
        },
        Tool {
            name: "get_location".to_string(),
            description: "Get the user's approximate location based on their IP address. Useful when the user hasn't provided their precise location. Returns 'lat,lng' coordinates usable with search_near_point and place_snap.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(internal_error)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "search_near" => places::handle_search_near(params.arguments, state).await,
        "search_near_point" => places::handle_search_near_point(params.arguments, state).await,
        "place_snap" => places::handle_place_snap(params.arguments, state).await,
        "place_details" => places::handle_place_details(params.arguments, state).await,
        "get_location" => places::handle_get_location(state).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
