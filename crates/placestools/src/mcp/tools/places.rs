use crate::prelude::eprintln;
use placestools_core::places::tools::{
    PlaceDetailsArgs, PlaceSnapArgs, SearchNearArgs, SearchNearPointArgs,
};

use super::{envelope_result, parse_arguments, JsonRpcError, ServerState};

pub async fn handle_search_near(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: SearchNearArgs = parse_arguments(arguments)?;

    if state.global.verbose {
        eprintln!(
            "Calling search_near: where={}, what={}, limit={:?}",
            args.region, args.what, args.limit
        );
    }

    let result = crate::places::search_near_data(&state.gateway, &args).await;

    envelope_result(&result)
}

pub async fn handle_search_near_point(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: SearchNearPointArgs = parse_arguments(arguments)?;

    if state.global.verbose {
        eprintln!(
            "Calling search_near_point: what={}, ll={}, radius={:?}, limit={:?}",
            args.what, args.ll, args.radius, args.limit
        );
    }

    let result = crate::places::search_near_point_data(&state.gateway, &args).await;

    envelope_result(&result)
}

pub async fn handle_place_snap(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: PlaceSnapArgs = parse_arguments(arguments)?;

    if state.global.verbose {
        eprintln!("Calling place_snap: ll={}, limit={:?}", args.ll, args.limit);
    }

    let result = crate::places::place_snap_data(&state.gateway, &args).await;

    envelope_result(&result)
}

pub async fn handle_place_details(
    arguments: Option<serde_json::Value>,
    state: &ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: PlaceDetailsArgs = parse_arguments(arguments)?;

    if state.global.verbose {
        eprintln!(
            "Calling place_details: fsq_id={}, fields={:?}",
            args.fsq_id, args.fields
        );
    }

    let result = crate::places::place_details_data(&state.gateway, &args).await;

    envelope_result(&result)
}

pub async fn handle_get_location(state: &ServerState) -> Result<serde_json::Value, JsonRpcError> {
    if state.global.verbose {
        eprintln!("Calling get_location");
    }

    let result = crate::places::get_location_data(&state.gateway).await;

    envelope_result(&result)
}

#[cfg(test)]
mod tests {
    use crate::mcp::tests::state;
    use crate::mcp::tools::handle_tools_call;
    use placestools_core::places::PlacesResult;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn places_calls() -> Vec<Value> {
        vec![
            json!({"name": "search_near", "arguments": {"where": "Times Square, New York", "what": "pizza", "limit": 3}}),
            json!({"name": "search_near_point", "arguments": {"what": "coffee", "ll": "40.758,-73.9855", "radius": 500, "limit": 3}}),
            json!({"name": "place_snap", "arguments": {"ll": "40.758,-73.9855", "limit": 2}}),
            json!({"name": "place_details", "arguments": {"fsq_id": "4a1b2c"}}),
        ]
    }

    fn envelope(result: &Value) -> PlacesResult {
        let text = result["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_places_tools_without_api_key() {
        let server = MockServer::start().await;
        let state = state(&server.uri(), None);

        for call in places_calls() {
            let result = handle_tools_call(Some(call), &state).await.unwrap();

            assert_eq!(result["isError"], json!(true));
            assert_eq!(
                envelope(&result),
                PlacesResult::failure("FOURSQUARE_API_KEY environment variable not set")
            );
        }

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_places_tools_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(4)
            .mount(&server)
            .await;

        let state = state(&server.uri(), Some("fsq-test-key"));

        for call in places_calls() {
            let result = handle_tools_call(Some(call), &state).await.unwrap();

            assert_eq!(
                envelope(&result).error(),
                Some("Rate limited. Please try again later.")
            );
        }
    }

    #[tokio::test]
    async fn test_search_near_tool() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/places/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"name": "Joe's Pizza"}, {"name": "Lombardi's"}, {"name": "Prince St"}]
            })))
            .mount(&server)
            .await;

        let state = state(&server.uri(), Some("fsq-test-key"));
        let call = places_calls().remove(0);

        let result = handle_tools_call(Some(call), &state).await.unwrap();

        assert!(result.get("isError").is_none());
        let data = envelope(&result).data().cloned().unwrap();
        assert_eq!(data["count"], json!(3));
        assert_eq!(data["location"], json!("Times Square, New York"));
    }

    #[tokio::test]
    async fn test_oversized_limit_is_clamped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/places/search"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let state = state(&server.uri(), Some("fsq-test-key"));
        let call = json!({
            "name": "search_near",
            "arguments": {"where": "Brooklyn", "what": "gym", "limit": u64::MAX}
        });

        let result = handle_tools_call(Some(call), &state).await.unwrap();

        assert_eq!(envelope(&result).data().unwrap()["count"], json!(0));
    }

    #[tokio::test]
    async fn test_get_location_tool() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"latitude": null, "longitude": null})),
            )
            .mount(&server)
            .await;

        let state = state(&server.uri(), None);

        let result = handle_tools_call(Some(json!({"name": "get_location"})), &state)
            .await
            .unwrap();

        assert_eq!(
            envelope(&result).error(),
            Some("Could not determine location from IP.")
        );
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let state = state("http://127.0.0.1:1", Some("fsq-test-key"));

        let error = handle_tools_call(
            Some(json!({"name": "search_near", "arguments": {"what": "pizza", "limit": "many"}})),
            &state,
        )
        .await
        .unwrap_err();

        assert_eq!(error.code, -32602);
    }
}
