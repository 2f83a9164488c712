//! Error taxonomy for talking to the meeting-point service.
//!
//! Rendering problems (legs without coordinates, journeys without legs,
//! unknown modes) are never errors; they degrade to fallback drawing.

use thiserror::Error;

/// Bad location input, caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide at least {min} valid locations with names and addresses (got {found})")]
    TooFew { min: usize, found: usize },
    #[error("At most {max} locations can be compared at once (got {found})")]
    TooMany { max: usize, found: usize },
    #[error("Location {position} needs a name")]
    MissingName { position: usize },
    #[error("{name} needs an address or coordinates")]
    MissingPlace { name: String },
    #[error("{name} has coordinates outside the valid range")]
    CoordsOutOfRange { name: String },
    #[error("Cannot read location {input:?}: expected NAME=ADDRESS or NAME@LAT,LON")]
    Unparsable { input: String },
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-success response; `message` is what the service said, verbatim.
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("Request to meeting-point service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from meeting-point service: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid service URL {0:?}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
