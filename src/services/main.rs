use chrono::{Days, NaiveDate};

use crate::domain::airport::AIRPORTS;
use crate::domain::party::MAX_PER_CATEGORY;
use crate::domain::search::TripType;
use crate::dto::main::{HomePageData, SearchDefaults, TripTypeOption};

const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds the home page search form pre-filled relative to `today`.
///
/// Defaults to a round trip from Dhaka to Cox's Bazar for one adult, leaving
/// tomorrow and returning three days later.
pub fn load_home_page(today: NaiveDate) -> HomePageData {
    let departure = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let return_date = departure.checked_add_days(Days::new(3)).unwrap_or(departure);

    let defaults = SearchDefaults {
        origin: "DAC",
        destination: "CXB",
        departure_date: departure.format(FORM_DATE_FORMAT).to_string(),
        return_date: return_date.format(FORM_DATE_FORMAT).to_string(),
        min_date: today.format(FORM_DATE_FORMAT).to_string(),
        trip_type: TripType::default().as_str(),
        adults: 1,
        children: 0,
        infants: 0,
    };

    HomePageData {
        airports: AIRPORTS.to_vec(),
        trip_types: TripType::ALL
            .iter()
            .map(|trip_type| TripTypeOption {
                value: trip_type.as_str(),
                label: trip_type.label(),
            })
            .collect(),
        defaults,
        max_per_category: MAX_PER_CATEGORY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_depart_tomorrow_for_three_days() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        let page = load_home_page(today);

        assert_eq!(page.defaults.departure_date, "2025-07-01");
        assert_eq!(page.defaults.return_date, "2025-07-04");
        assert_eq!(page.defaults.min_date, "2025-06-30");
        assert_eq!(page.defaults.trip_type, "RoundTrip");
        assert_eq!(page.airports.len(), AIRPORTS.len());
        assert_eq!(page.trip_types.len(), 3);
    }
}
