//! DTOs exposed by the JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::offer::FlightOffer;

/// Query parameters accepted by `/api/v1/airports`.
#[derive(Debug, Default, Deserialize)]
pub struct AirportsQuery {
    #[serde(default)]
    pub q: String,
}

/// Result payload returned by [`crate::services::api::list_offers`].
#[derive(Debug, Serialize)]
pub struct OffersResponse {
    /// Number of offers fetched for the current search.
    pub total: usize,
    /// Offers left after applying the visitor's filters.
    pub offers: Vec<FlightOffer>,
}
