//! Transient per-visitor state kept between requests.

use serde::Serialize;

use crate::domain::booking::Booking;
use crate::domain::filter::FilterState;
use crate::domain::offer::FlightOffer;
use crate::domain::passenger::PassengerFormRow;
use crate::domain::search::SearchParams;

/// Result of the most recent offers fetch.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub enum SearchOutcome {
    /// No fetch has completed for the current search yet.
    #[default]
    Pending,
    Offers(Vec<FlightOffer>),
    /// The fetch failed; the cause is only logged.
    Failed,
}

impl SearchOutcome {
    /// Offers held by the outcome, empty unless the fetch succeeded.
    pub fn offers(&self) -> &[FlightOffer] {
        match self {
            SearchOutcome::Offers(offers) => offers,
            SearchOutcome::Pending | SearchOutcome::Failed => &[],
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct VisitorState {
    pub search: Option<SearchParams>,
    /// Incremented every time a new search starts.
    pub generation: u64,
    pub outcome: SearchOutcome,
    pub filters: FilterState,
    /// Draft passenger rows kept after a rejected booking submission.
    pub passengers: Vec<PassengerFormRow>,
    pub last_booking: Option<Booking>,
}

impl VisitorState {
    /// Resets everything tied to the previous search and stores `params`.
    pub fn begin_search(&mut self, params: SearchParams) -> u64 {
        self.generation += 1;
        self.search = Some(params);
        self.outcome = SearchOutcome::Pending;
        self.filters = FilterState::default();
        self.passengers.clear();
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::airport::find_airport;
    use crate::domain::passenger::derive_rows;
    use crate::domain::search::TripType;
    use chrono::NaiveDate;

    #[test]
    fn begin_search_discards_previous_results_and_drafts() {
        let mut state = VisitorState {
            outcome: SearchOutcome::Failed,
            passengers: derive_rows(1, 0),
            ..Default::default()
        };
        state.filters.toggle_airline("X");

        let params = SearchParams::try_new(
            find_airport("DAC").unwrap(),
            find_airport("ZYL").unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 2).unwrap(),
            None,
            TripType::OneWay,
            (1, 0, 0),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        )
        .unwrap();

        assert_eq!(state.begin_search(params.clone()), 1);
        assert_eq!(state.begin_search(params), 2);
        assert_eq!(state.outcome, SearchOutcome::Pending);
        assert!(!state.filters.is_active());
        assert!(state.passengers.is_empty());
    }
}
