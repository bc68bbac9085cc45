use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::ServerState;

/// Path of the MCP endpoint
pub const MCP_PATH: &str = "/mcp";

pub async fn run_http(options: super::cli::HttpOptions, state: ServerState) -> Result<()> {
    let verbose = state.global.verbose;

    if verbose {
        eprintln!(
            "Starting MCP server with HTTP transport on {}:{}...",
            options.host, options.port
        );
    }

    let addr = format!("{}:{}", options.host, options.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("MCP server listening on http://{addr}{MCP_PATH}");

    if verbose {
        eprintln!("MCP endpoint: http://{addr}{MCP_PATH}");
    }

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// One POST route carrying a single JSON-RPC message per request.
///
/// Other methods on `/mcp` get 405 since no server-initiated stream is offered.
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(MCP_PATH, post(mcp_handler))
        .layer(cors)
        .with_state(Arc::new(state))
}

async fn mcp_handler(State(state): State<Arc<ServerState>>, body: String) -> Response {
    if state.global.verbose {
        eprintln!("Received: {body}");
    }

    let Some(response) = super::handle_request(&body, &state).await else {
        return StatusCode::ACCEPTED.into_response();
    };

    match serde_json::to_string(&response) {
        Ok(json) => {
            if state.global.verbose {
                eprintln!("Sending: {json}");
            }
            ([(header::CONTENT_TYPE, "application/json")], json).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tests::state;
    use serde_json::{json, Value};

    async fn serve() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state("http://127.0.0.1:1", None));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}{MCP_PATH}")
    }

    #[tokio::test]
    async fn test_tools_list_over_http() {
        let url = serve().await;

        let response = reqwest::Client::new()
            .post(&url)
            .json(&json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let value: Value = response.json().await.unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["result"]["tools"].as_array().unwrap().len(), 5);
        assert_eq!(value["result"]["tools"][0]["name"], json!("search_near"));
    }

    #[tokio::test]
    async fn test_notification_is_accepted() {
        let url = serve().await;

        let response = reqwest::Client::new()
            .post(&url)
            .json(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
        assert!(response.text().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let url = serve().await;

        let response = reqwest::Client::new()
            .post(&url)
            .body("{not json")
            .send()
            .await
            .unwrap();

        let value: Value = response.json().await.unwrap();
        assert_eq!(value["error"]["code"], json!(-32700));
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let url = serve().await;

        let response = reqwest::get(&url).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    }
}
