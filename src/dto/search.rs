//! DTOs shaped for the results page.

use serde::Serialize;

use crate::domain::offer::{FlightOffer, format_duration};
use crate::domain::search::SearchParams;

/// Message shown in place of results when the fetch failed.
pub const FETCH_ERROR_MESSAGE: &str =
    "An error occurred while fetching flights. Please try again.";

/// Summary line rendered for a single offer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OfferView {
    pub id: String,
    pub airline_name: String,
    pub logo_url: String,
    pub flight_name: String,
    pub equipment: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub route: String,
    pub stops: String,
    pub baggage: String,
    pub price: String,
    pub is_refundable: bool,
}

impl From<&FlightOffer> for OfferView {
    fn from(offer: &FlightOffer) -> Self {
        let leg = offer.first_leg();
        Self {
            id: offer.id.to_string(),
            airline_name: offer.airline_name.clone(),
            logo_url: offer.logo_url.clone(),
            flight_name: leg.map(|l| l.flight_name.clone()).unwrap_or_default(),
            equipment: leg.map(|l| l.equipment.clone()).unwrap_or_default(),
            departure_time: leg
                .map(|l| l.departure.format("%H:%M").to_string())
                .unwrap_or_default(),
            arrival_time: leg
                .map(|l| l.arrival.format("%H:%M").to_string())
                .unwrap_or_default(),
            duration: leg
                .map(|l| format_duration(l.duration_minutes))
                .unwrap_or_default(),
            route: leg
                .map(|l| format!("{} → {}", l.origin_code, l.destination_code))
                .unwrap_or_default(),
            stops: offer.stops_label(),
            baggage: leg.map(|l| l.baggage.clone()).unwrap_or_default(),
            price: offer.price_label(),
            is_refundable: offer.is_refundable,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchSummary {
    pub origin: String,
    pub destination: String,
    /// e.g. `Jun 30`.
    pub departure: String,
    pub return_date: Option<String>,
    pub trip_type: String,
    pub travellers: u32,
}

impl From<&SearchParams> for SearchSummary {
    fn from(params: &SearchParams) -> Self {
        Self {
            origin: params.origin.name.to_string(),
            destination: params.destination.name.to_string(),
            departure: params.departure_date.format("%b %-d").to_string(),
            return_date: params
                .return_date
                .map(|date| date.format("%b %-d").to_string()),
            trip_type: params.trip_type.label().to_string(),
            travellers: params.party.total(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AirlineOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefundabilityOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Data required to render the results page.
#[derive(Debug, Serialize)]
pub struct SearchPageData {
    pub summary: SearchSummary,
    /// True until a fetch for the current search has completed.
    pub pending: bool,
    pub error: Option<&'static str>,
    pub offers: Vec<OfferView>,
    pub total_offers: usize,
    pub airlines: Vec<AirlineOption>,
    pub refundability: Vec<RefundabilityOption>,
    pub filters_active: bool,
}
