//! Forms for starting a search and toggling result filters.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::airport::find_airport;
use crate::domain::filter::Refundability;
use crate::domain::search::{SearchParams, TripType};
use crate::forms::FormError;

const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_adults() -> String {
    "1".to_string()
}

/// Search submission as posted by the home page.
///
/// Every field is optional at the decoding stage so that incomplete
/// submissions reach validation and come back as a message.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchForm {
    /// IATA code of the departure airport.
    #[serde(default)]
    #[validate(length(equal = 3))]
    pub origin: String,
    /// IATA code of the arrival airport.
    #[serde(default)]
    #[validate(length(equal = 3))]
    pub destination: String,
    /// `YYYY-MM-DD` as produced by a date input.
    #[serde(default)]
    pub departure_date: String,
    #[serde(default)]
    pub return_date: String,
    #[serde(default)]
    pub trip_type: String,
    /// Counter inputs arrive as text and may be blank.
    #[serde(default = "default_adults")]
    pub adults: String,
    #[serde(default)]
    pub children: String,
    #[serde(default)]
    pub infants: String,
}

fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), FORM_DATE_FORMAT).map_err(|_| FormError::InvalidDate)
}

/// Blank or non-numeric counters count as zero; the party checks then report
/// them.
fn parse_count(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

impl SearchForm {
    /// Converts the submission into validated search parameters.
    pub fn into_params(self, today: NaiveDate) -> Result<SearchParams, FormError> {
        self.validate()?;

        let origin = find_airport(&self.origin).ok_or(FormError::InvalidAirport)?;
        let destination = find_airport(&self.destination).ok_or(FormError::InvalidAirport)?;
        let departure_date = parse_date(&self.departure_date)?;
        let return_date = match self.return_date.trim() {
            "" => None,
            value => Some(parse_date(value)?),
        };
        let trip_type = match self.trip_type.trim() {
            "" => TripType::default(),
            value => value
                .parse::<TripType>()
                .map_err(|_| FormError::InvalidTripType)?,
        };

        let params = SearchParams::try_new(
            origin,
            destination,
            departure_date,
            return_date,
            trip_type,
            (
                parse_count(&self.adults),
                parse_count(&self.children),
                parse_count(&self.infants),
            ),
            today,
        )?;
        Ok(params)
    }
}

/// Toggles a single airline in the result filter.
#[derive(Debug, Deserialize, Validate)]
pub struct AirlineFilterForm {
    #[validate(length(min = 1))]
    pub airline: String,
}

/// Selects (or, when already selected, clears) a refundability choice.
#[derive(Debug, Deserialize)]
pub struct RefundabilityFilterForm {
    pub choice: String,
}

impl RefundabilityFilterForm {
    pub fn choice(&self) -> Result<Refundability, FormError> {
        self.choice
            .parse::<Refundability>()
            .map_err(|_| FormError::InvalidFilter)
    }
}
