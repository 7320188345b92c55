//! Wire models exchanged with the flights API.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::offer::{FlightOffer, Leg};
use crate::domain::search::SearchParams;
use crate::domain::types::{OfferId, TypeConstraintError};

/// Date format the API expects, e.g. `30 Jun 2025`.
pub const API_DATE_FORMAT: &str = "%d %b %Y";

#[derive(Debug, Serialize)]
pub struct PassengerCounts {
    pub adult: u32,
    pub children: u32,
    pub infant: u32,
}

/// Body of the offers search request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub passenger: PassengerCounts,
    pub trip_type: String,
}

impl From<&SearchParams> for FlightSearchRequest {
    fn from(params: &SearchParams) -> Self {
        Self {
            origin: params.origin.code.to_string(),
            destination: params.destination.code.to_string(),
            departure_date: params.departure_date.format(API_DATE_FORMAT).to_string(),
            return_date: params
                .return_date
                .map(|date| date.format(API_DATE_FORMAT).to_string()),
            passenger: PassengerCounts {
                adult: params.party.adults(),
                children: params.party.children(),
                infant: params.party.infants(),
            },
            trip_type: params.trip_type.as_str().to_string(),
        }
    }
}

/// Envelope wrapping every search response.
#[derive(Debug, Deserialize)]
pub struct FlightSearchResponse {
    #[serde(default)]
    pub data: Vec<ApiFlight>,
}

#[derive(Debug, Deserialize)]
pub struct ApiFlight {
    pub resultid: String,
    pub is_refundable: bool,
    #[serde(default)]
    pub air_logo: String,
    pub itin_details: Vec<ApiItinerary>,
    pub price_info: ApiPriceInfo,
}

#[derive(Debug, Deserialize)]
pub struct ApiItinerary {
    #[serde(default)]
    pub layover: u32,
    pub flight_data: Vec<ApiFlightData>,
}

#[derive(Debug, Deserialize)]
pub struct ApiFlightData {
    pub airline_name: String,
    #[serde(default)]
    pub flight_name: String,
    #[serde(default)]
    pub equipmenttext: String,
    pub departuredate: String,
    pub arrivaldate: String,
    pub origincode: String,
    pub destinationcode: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub baggage_details: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiPriceInfo {
    pub total: f64,
    pub currency: String,
}

/// Accepts both offset-qualified and local timestamps.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TypeConstraintError> {
    let value = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| TypeConstraintError::InvalidValue(format!("timestamp {value}")))
}

impl TryFrom<ApiFlightData> for Leg {
    type Error = TypeConstraintError;

    fn try_from(data: ApiFlightData) -> Result<Self, Self::Error> {
        Ok(Self {
            flight_name: data.flight_name,
            equipment: data.equipmenttext,
            departure: parse_timestamp(&data.departuredate)?,
            arrival: parse_timestamp(&data.arrivaldate)?,
            origin_code: data.origincode,
            destination_code: data.destinationcode,
            duration_minutes: data.duration,
            baggage: data.baggage_details,
        })
    }
}

impl TryFrom<ApiFlight> for FlightOffer {
    type Error = TypeConstraintError;

    fn try_from(flight: ApiFlight) -> Result<Self, Self::Error> {
        let id = OfferId::new(flight.resultid)?;

        let airline_name = flight
            .itin_details
            .first()
            .and_then(|itinerary| itinerary.flight_data.first())
            .map(|data| data.airline_name.clone())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("offer {id} has no legs")))?;
        let layover = flight
            .itin_details
            .first()
            .map(|itinerary| itinerary.layover)
            .unwrap_or_default();

        let legs = flight
            .itin_details
            .into_iter()
            .flat_map(|itinerary| itinerary.flight_data)
            .map(Leg::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            airline_name,
            is_refundable: flight.is_refundable,
            price_total: flight.price_info.total,
            currency: flight.price_info.currency,
            logo_url: flight.air_logo,
            layover,
            legs,
        })
    }
}

impl FlightSearchResponse {
    /// Converts every returned flight, failing on the first malformed one.
    pub fn into_offers(self) -> Result<Vec<FlightOffer>, TypeConstraintError> {
        self.data.into_iter().map(FlightOffer::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::airport::find_airport;
    use crate::domain::search::TripType;

    fn sample_response() -> serde_json::Value {
        json!({
            "data": [{
                "resultid": "R-100",
                "is_refundable": true,
                "travel_type": "OneWay",
                "air_logo": "https://cdn.example.com/bs.png",
                "itin_details": [{
                    "origindestinationorder": 0,
                    "layover": 1,
                    "flight_data": [
                        {
                            "airline_name": "US-Bangla",
                            "flight_name": "BS 141",
                            "equipmenttext": "ATR 72",
                            "departuredate": "2025-06-30T10:15:00",
                            "arrivaldate": "2025-06-30T11:20:00",
                            "origincode": "DAC",
                            "destinationcode": "CGP",
                            "duration": 65,
                            "baggage_details": "20 KG"
                        },
                        {
                            "airline_name": "US-Bangla",
                            "flight_name": "BS 305",
                            "equipmenttext": "Dash 8",
                            "departuredate": "2025-06-30T12:00:00+06:00",
                            "arrivaldate": "2025-06-30T12:45:00+06:00",
                            "origincode": "CGP",
                            "destinationcode": "CXB",
                            "duration": 45,
                            "baggage_details": "20 KG"
                        }
                    ]
                }],
                "price_info": {"base": 4800, "total": 5230.0, "currency": "BDT"}
            }]
        })
    }

    #[test]
    fn decodes_offers_from_the_api_envelope() {
        let response: FlightSearchResponse = serde_json::from_value(sample_response()).unwrap();
        let offers = response.into_offers().unwrap();

        assert_eq!(offers.len(), 1);
        let offer = &offers[0];
        assert_eq!(offer.id.as_str(), "R-100");
        assert_eq!(offer.airline_name, "US-Bangla");
        assert_eq!(offer.layover, 1);
        assert_eq!(offer.legs.len(), 2);
        assert_eq!(offer.legs[1].departure.format("%H:%M").to_string(), "12:00");
        assert_eq!(offer.price_label(), "BDT 5,230");
    }

    #[test]
    fn rejects_malformed_timestamps() {
        let mut value = sample_response();
        value["data"][0]["itin_details"][0]["flight_data"][0]["departuredate"] = json!("soon");
        let response: FlightSearchResponse = serde_json::from_value(value).unwrap();

        assert!(response.into_offers().is_err());
    }

    #[test]
    fn missing_data_means_no_offers() {
        let response: FlightSearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_offers().unwrap().is_empty());
    }

    #[test]
    fn request_uses_api_date_format() {
        let params = SearchParams::try_new(
            find_airport("DAC").unwrap(),
            find_airport("CXB").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            Some(NaiveDate::from_ymd_opt(2025, 7, 2).unwrap()),
            TripType::RoundTrip,
            (2, 1, 0),
            NaiveDate::from_ymd_opt(2025, 6, 29).unwrap(),
        )
        .unwrap();

        let body = serde_json::to_value(FlightSearchRequest::from(&params)).unwrap();

        assert_eq!(
            body,
            json!({
                "origin": "DAC",
                "destination": "CXB",
                "departureDate": "30 Jun 2025",
                "returnDate": "02 Jul 2025",
                "passenger": {"adult": 2, "children": 1, "infant": 0},
                "tripType": "RoundTrip"
            })
        );
    }
}
