use serde::Deserialize;
use thiserror::Error;

// Helper structs to parse the JSON error response from openrouteservice
#[derive(Deserialize, Debug)]
pub struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

/// openrouteservice error code for "could not find routable point".
pub const ORS_UNROUTABLE_POINT: u32 = 2010;

#[derive(Error, Debug)]
pub enum RoutingError {
    /// The routing engine response is missing required structure, or its
    /// geometry does not decode.
    #[error("Malformed routing response: {0}")]
    MalformedResponse(String),

    #[error("A point was not routable on the road network")]
    UnroutablePoint,

    // This variant holds the structured error from the API
    #[error("API Error (Code {code}): {message}")]
    ApiError { code: u32, message: String },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error: {0}")]
    RawApiError(String),

    #[error("No results for query: {0}")]
    NoResults(String),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl RoutingError {
    /// Builds the error for a non-success response body.
    pub fn from_error_body(body: &str) -> Self {
        match serde_json::from_str::<OrsErrorPayload>(body) {
            Ok(payload) if payload.error.code == ORS_UNROUTABLE_POINT => RoutingError::UnroutablePoint,
            Ok(payload) => RoutingError::ApiError {
                code: payload.error.code,
                message: payload.error.message,
            },
            Err(_) => RoutingError::RawApiError(body.to_string()),
        }
    }
}
