use crate::prelude::Error;
use placestools_core::places::location::DEFAULT_IP_GEOLOCATION_URL;
use placestools_core::places::tools::{Method, PlacesRequest};
use placestools_core::places::{PlacesResult, API_KEY_VAR};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::{Map, Value};
use std::time::Duration;

/// Foursquare Places v3 API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.foursquare.com/v3";

const PLACES_TIMEOUT: Duration = Duration::from_secs(30);
const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Places configuration from environment variables
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Checked on every call, so a missing key fails the call and not the server.
    pub api_key: Option<String>,
    pub base_url: String,
    pub geolocation_url: String,
}

impl PlacesConfig {
    /// Load configuration from environment variables
    /// Uses FOURSQUARE_API_KEY for auth
    /// Uses FOURSQUARE_BASE_URL and IP_GEOLOCATION_URL with default fallbacks
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_VAR).ok(),
            base_url: std::env::var("FOURSQUARE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            geolocation_url: std::env::var("IP_GEOLOCATION_URL")
                .unwrap_or_else(|_| DEFAULT_IP_GEOLOCATION_URL.to_string()),
        }
    }
}

/// Headers sent with every Foursquare request
///
/// The API key is marked sensitive so it is redacted from `Debug` output.
pub fn places_headers(api_key: &str) -> Result<HeaderMap, Error> {
    let mut authorization =
        HeaderValue::from_str(api_key).map_err(|e| Error::InvalidHeader(e.to_string()))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(headers)
}

/// Create an HTTP client that authenticates with the Foursquare API key
pub fn create_places_client(api_key: &str) -> Result<reqwest::Client, Error> {
    Ok(reqwest::Client::builder()
        .default_headers(places_headers(api_key)?)
        .timeout(PLACES_TIMEOUT)
        .build()?)
}

/// Issues Foursquare requests and folds every failure into a `PlacesResult`
///
/// No client is kept between calls: each request builds its own and drops it
/// when it returns.
#[derive(Debug, Clone)]
pub struct PlacesGateway {
    config: PlacesConfig,
}

impl PlacesGateway {
    pub fn new(config: PlacesConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(PlacesConfig::from_env())
    }

    pub fn config(&self) -> &PlacesConfig {
        &self.config
    }

    /// Run a request built by one of the tools
    pub async fn execute(&self, request: &PlacesRequest) -> PlacesResult {
        self.request(request.method, &request.path, &request.params)
            .await
    }

    /// Call the Places API
    ///
    /// GET sends `params` as the query string, POST as a JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Map<String, Value>,
    ) -> PlacesResult {
        match self.send(method, path, params).await {
            Ok(data) => PlacesResult::Success(data),
            Err(e) => {
                log::warn!("Foursquare request to {path} failed: {e}");
                e.into()
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &Map<String, Value>,
    ) -> Result<Value, Error> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingConfig(API_KEY_VAR))?;

        let client = create_places_client(api_key)?;

        let base_url = self.config.base_url.trim_end_matches('/');
        let url = format!("{base_url}{path}");

        log::debug!("{method:?} {url} {params:?}");

        let builder = match method {
            Method::Get => client.get(&url).query(params),
            Method::Post => client.post(&url).json(params),
        };

        let response = builder.send().await?;

        match response.status() {
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
            reqwest::StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            _ => Ok(response.error_for_status()?.json::<Value>().await?),
        }
    }

    /// Fetch the raw IP geolocation response. Needs no API key.
    pub async fn fetch_ip_location(&self) -> Result<Value, Error> {
        let client = reqwest::Client::builder()
            .timeout(GEOLOCATION_TIMEOUT)
            .build()?;

        log::debug!("GET {}", self.config.geolocation_url);

        let response = client
            .get(&self.config.geolocation_url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }
}
