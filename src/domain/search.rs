//! Validated search parameters.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::airport::Airport;
use crate::domain::party::TripParty;
use crate::domain::types::TypeConstraintError;

/// Reasons a search submission is rejected. Only the first failing check is
/// reported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Departure and arrival cities cannot be the same.")]
    SameCity,
    #[error("Departure date must be in the future.")]
    DepartureInPast,
    #[error("Return date must be after departure date.")]
    ReturnBeforeDeparture,
    #[error("At least one adult is required.")]
    NoAdults,
    #[error("Number of infants cannot exceed number of adults.")]
    TooManyInfants,
    #[error("At most 5 passengers are allowed per category.")]
    PartyTooLarge,
}

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub enum TripType {
    OneWay,
    #[default]
    RoundTrip,
    MultiCity,
}

impl TripType {
    pub const ALL: [TripType; 3] = [TripType::OneWay, TripType::RoundTrip, TripType::MultiCity];

    /// Value used on the wire and in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::OneWay => "OneWay",
            TripType::RoundTrip => "RoundTrip",
            TripType::MultiCity => "MultiCity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "One Way",
            TripType::RoundTrip => "Round Trip",
            TripType::MultiCity => "Multi City",
        }
    }
}

impl FromStr for TripType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OneWay" => Ok(TripType::OneWay),
            "RoundTrip" => Ok(TripType::RoundTrip),
            "MultiCity" => Ok(TripType::MultiCity),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Trip parameters accepted on search submission.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SearchParams {
    pub origin: Airport,
    pub destination: Airport,
    pub departure_date: NaiveDate,
    /// Present only for round trips.
    pub return_date: Option<NaiveDate>,
    pub trip_type: TripType,
    pub party: TripParty,
}

impl SearchParams {
    /// Validates the submission against `today`.
    ///
    /// One-way and multi-city trips drop the return date; a round trip
    /// without one returns on the departure date.
    pub fn try_new(
        origin: Airport,
        destination: Airport,
        departure_date: NaiveDate,
        return_date: Option<NaiveDate>,
        trip_type: TripType,
        (adults, children, infants): (u32, u32, u32),
        today: NaiveDate,
    ) -> Result<Self, SearchError> {
        if origin.code.eq_ignore_ascii_case(destination.code) {
            return Err(SearchError::SameCity);
        }
        if departure_date < today {
            return Err(SearchError::DepartureInPast);
        }

        let return_date = match trip_type {
            TripType::RoundTrip => {
                let return_date = return_date.unwrap_or(departure_date);
                if return_date < departure_date {
                    return Err(SearchError::ReturnBeforeDeparture);
                }
                Some(return_date)
            }
            TripType::OneWay | TripType::MultiCity => None,
        };

        let party = TripParty::try_new(adults, children, infants)?;

        Ok(Self {
            origin,
            destination,
            departure_date,
            return_date,
            trip_type,
            party,
        })
    }
}
