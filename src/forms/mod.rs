//! Form definitions backing the booking routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::passenger::PassengerIndexError;
use crate::domain::search::SearchError;

pub mod auth;
pub mod booking;
pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed form payload: {0}")]
    Malformed(String),

    #[error("unknown airport")]
    InvalidAirport,

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid trip type")]
    InvalidTripType,

    #[error("invalid filter value")]
    InvalidFilter,

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("passenger rows do not match the trip party: {0}")]
    PassengerIndex(#[from] PassengerIndexError),
}
