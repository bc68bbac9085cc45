use crate::prelude::{println, *};
use colored::Colorize;
use placestools_core::places::location::{
    location_lookup_failed, transform_ip_location, IpLocation,
};
use placestools_core::places::PlacesResult;

use super::{into_output, print_envelope, PlacesGateway};

#[derive(Debug, clap::Args, Clone)]
pub struct LocateOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
/// Approximates the caller's location from its public IP address
pub async fn get_location_data(gateway: &PlacesGateway) -> PlacesResult {
    match gateway.fetch_ip_location().await {
        Ok(data) => transform_ip_location(&data),
        Err(e) => {
            log::warn!("IP geolocation failed: {e}");
            location_lookup_failed(e)
        }
    }
}

pub async fn run(options: LocateOptions, gateway: &PlacesGateway) -> Result<()> {
    let result = get_location_data(gateway).await;

    if options.json {
        return print_envelope(&result);
    }

    let location: IpLocation = into_output(result)?;
    let place = [&location.city, &location.region, &location.country]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    println!(
        "{} {}",
        location.coordinates.white().bold(),
        if place.is_empty() {
            String::new()
        } else {
            format!("({place})")
        }
    );
    println!("{}", location.note.dimmed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::PlacesConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(server: &MockServer) -> PlacesGateway {
        PlacesGateway::new(PlacesConfig {
            api_key: None,
            base_url: server.uri(),
            geolocation_url: format!("{}/json/", server.uri()),
        })
    }

    #[tokio::test]
    async fn test_get_location() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "Brooklyn",
                "region": "New York",
                "country_name": "United States",
                "latitude": 40.6501,
                "longitude": -73.9496
            })))
            .mount(&server)
            .await;

        let result = get_location_data(&gateway(&server)).await;

        let data = result.data().unwrap();
        assert_eq!(data["coordinates"], json!("40.6501,-73.9496"));
        assert_eq!(data["country"], json!("United States"));
        assert_eq!(
            data["note"],
            json!("This is an approximation based on IP address.")
        );
    }

    #[tokio::test]
    async fn test_get_location_null_latitude() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "Brooklyn",
                "latitude": null,
                "longitude": -73.9496
            })))
            .mount(&server)
            .await;

        let result = get_location_data(&gateway(&server)).await;

        assert_eq!(
            result,
            PlacesResult::failure("Could not determine location from IP.")
        );
    }

    #[tokio::test]
    async fn test_get_location_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = get_location_data(&gateway(&server)).await;

        let error = result.error().unwrap();
        assert!(error.starts_with("Location lookup failed: "));
        assert!(error.contains("503"));
    }
}
