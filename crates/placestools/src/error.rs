use placestools_core::places::{
    not_set_message, PlacesResult, RATE_LIMITED_MESSAGE, UNAUTHORIZED_MESSAGE,
};

/// Failures of an upstream call.
///
/// The `Display` text of each variant is the `error` reported to tool callers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{}", not_set_message(.0))]
    MissingConfig(&'static str),

    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

impl From<Error> for PlacesResult {
    fn from(error: Error) -> Self {
        PlacesResult::failure(error.to_string())
    }
}
