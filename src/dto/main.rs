use serde::Serialize;

use crate::domain::airport::Airport;

#[derive(Debug, Serialize)]
pub struct TripTypeOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Values pre-filled into the search form.
#[derive(Debug, Serialize)]
pub struct SearchDefaults {
    pub origin: &'static str,
    pub destination: &'static str,
    /// `YYYY-MM-DD`, the format of a date input.
    pub departure_date: String,
    pub return_date: String,
    /// Earliest selectable date.
    pub min_date: String,
    pub trip_type: &'static str,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

/// Data required to render the home page search form.
#[derive(Debug, Serialize)]
pub struct HomePageData {
    pub airports: Vec<Airport>,
    pub trip_types: Vec<TripTypeOption>,
    pub defaults: SearchDefaults,
    /// Upper bound for each passenger counter.
    pub max_per_category: u32,
}
