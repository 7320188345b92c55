//! Services behind the search form and the results page.

use std::fmt::Display;

use chrono::NaiveDate;
use validator::Validate;

use crate::domain::filter::{self, FilterState, Refundability, available_airlines};
use crate::domain::offer::FlightOffer;
use crate::domain::search::SearchParams;
use crate::domain::types::VisitorId;
use crate::domain::visitor::{SearchOutcome, VisitorState};
use crate::dto::search::{
    AirlineOption, FETCH_ERROR_MESSAGE, OfferView, RefundabilityOption, SearchPageData,
    SearchSummary,
};
use crate::forms::FormError;
use crate::forms::search::{AirlineFilterForm, RefundabilityFilterForm, SearchForm};
use crate::repository::{VisitorReader, VisitorWriter};
use crate::services::{ServiceError, ServiceResult};

/// Search accepted by [`start_search`], ready to be fetched.
#[derive(Debug)]
pub struct StartedSearch {
    pub generation: u64,
    pub params: SearchParams,
}

/// Validates the form and stores it as the visitor's current search.
///
/// Validation failures carry a message suitable for a flash alert.
pub fn start_search<R>(
    repo: &R,
    visitor: VisitorId,
    form: SearchForm,
    today: NaiveDate,
) -> ServiceResult<StartedSearch>
where
    R: VisitorWriter + ?Sized,
{
    let params = form.into_params(today).map_err(|err| match err {
        FormError::Search(err) => ServiceError::Form(err.to_string()),
        other => {
            log::debug!("Rejected search form: {other}");
            ServiceError::Form("Please check the search details.".to_string())
        }
    })?;

    let generation = repo.start_search(visitor, params.clone())?;

    Ok(StartedSearch { generation, params })
}

/// Stores the result of the fetch started for `generation`.
///
/// The failure cause is logged; visitors only see a generic message.
pub fn record_fetch<R, E>(
    repo: &R,
    visitor: VisitorId,
    generation: u64,
    result: Result<Vec<FlightOffer>, E>,
) -> ServiceResult<()>
where
    R: VisitorWriter + ?Sized,
    E: Display,
{
    let outcome = match result {
        Ok(offers) => {
            log::info!("Fetched {} offers for visitor {visitor}", offers.len());
            SearchOutcome::Offers(offers)
        }
        Err(err) => {
            log::error!("Failed to fetch flights for visitor {visitor}: {err}");
            SearchOutcome::Failed
        }
    };

    repo.store_search_outcome(visitor, generation, outcome)?;

    Ok(())
}

fn current_state<R>(repo: &R, visitor: VisitorId) -> ServiceResult<VisitorState>
where
    R: VisitorReader + ?Sized,
{
    repo.get_visitor_state(visitor)?
        .filter(|state| state.search.is_some())
        .ok_or(ServiceError::NotFound)
}

/// Loads the results page for the visitor's current search.
pub fn load_search_page<R>(repo: &R, visitor: VisitorId) -> ServiceResult<SearchPageData>
where
    R: VisitorReader + ?Sized,
{
    let state = current_state(repo, visitor)?;
    let Some(params) = state.search.as_ref() else {
        return Err(ServiceError::NotFound);
    };

    let offers = state.outcome.offers();
    let shown = filter::apply(offers, &state.filters);

    let airlines = available_airlines(offers)
        .into_iter()
        .map(|name| AirlineOption {
            selected: state.filters.selected_airlines.contains(&name),
            name,
        })
        .collect();

    let refundability = Refundability::ALL
        .iter()
        .map(|choice| RefundabilityOption {
            value: choice.as_str(),
            label: choice.label(),
            selected: *choice == state.filters.refundability,
        })
        .collect();

    Ok(SearchPageData {
        summary: SearchSummary::from(params),
        pending: state.outcome == SearchOutcome::Pending,
        error: (state.outcome == SearchOutcome::Failed).then_some(FETCH_ERROR_MESSAGE),
        offers: shown.iter().map(OfferView::from).collect(),
        total_offers: offers.len(),
        airlines,
        refundability,
        filters_active: state.filters.is_active(),
    })
}

fn update_filters<R, F>(repo: &R, visitor: VisitorId, change: F) -> ServiceResult<FilterState>
where
    R: VisitorReader + VisitorWriter + ?Sized,
    F: FnOnce(&mut FilterState),
{
    let mut filters = current_state(repo, visitor)?.filters;
    change(&mut filters);
    repo.replace_filters(visitor, &filters)?;
    Ok(filters)
}

/// Adds the airline to the filter, or removes it when already selected.
pub fn toggle_airline<R>(
    repo: &R,
    visitor: VisitorId,
    form: AirlineFilterForm,
) -> ServiceResult<FilterState>
where
    R: VisitorReader + VisitorWriter + ?Sized,
{
    form.validate().map_err(|err| ServiceError::Form(err.to_string()))?;
    update_filters(repo, visitor, |filters| filters.toggle_airline(&form.airline))
}

/// Selects a refundability choice; selecting the active one resets to any.
pub fn toggle_refundability<R>(
    repo: &R,
    visitor: VisitorId,
    form: RefundabilityFilterForm,
) -> ServiceResult<FilterState>
where
    R: VisitorReader + VisitorWriter + ?Sized,
{
    let choice = form.choice()?;
    update_filters(repo, visitor, |filters| filters.toggle_refundability(choice))
}

pub fn clear_filters<R>(repo: &R, visitor: VisitorId) -> ServiceResult<FilterState>
where
    R: VisitorReader + VisitorWriter + ?Sized,
{
    update_filters(repo, visitor, |filters| *filters = FilterState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::airport::find_airport;
    use crate::domain::search::TripType;
    use crate::domain::types::OfferId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn params() -> SearchParams {
        SearchParams::try_new(
            find_airport("DAC").unwrap(),
            find_airport("CXB").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            None,
            TripType::OneWay,
            (1, 0, 0),
            today(),
        )
        .unwrap()
    }

    fn form(origin: &str, destination: &str) -> SearchForm {
        SearchForm {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: "2025-06-30".to_string(),
            return_date: String::new(),
            trip_type: "OneWay".to_string(),
            adults: "1".to_string(),
            children: "0".to_string(),
            infants: "0".to_string(),
        }
    }

    fn offer(id: &str, airline: &str, is_refundable: bool) -> FlightOffer {
        FlightOffer {
            id: OfferId::new(id).unwrap(),
            airline_name: airline.to_string(),
            is_refundable,
            price_total: 5000.0,
            currency: "BDT".to_string(),
            logo_url: String::new(),
            layover: 0,
            legs: Vec::new(),
        }
    }

    fn state_with(outcome: SearchOutcome) -> VisitorState {
        VisitorState {
            search: Some(params()),
            generation: 1,
            outcome,
            ..VisitorState::default()
        }
    }

    #[test]
    fn start_search_stores_valid_params() {
        let mut repo = MockRepository::new();
        repo.expect_start_search()
            .times(1)
            .withf(|_, params| params.origin.code == "DAC" && params.return_date.is_none())
            .returning(|_, _| Ok(3));

        let started = start_search(&repo, VisitorId::new(), form("DAC", "CXB"), today()).unwrap();

        assert_eq!(started.generation, 3);
        assert_eq!(started.params.destination.code, "CXB");
    }

    #[test]
    fn start_search_reports_validation_message() {
        let mut repo = MockRepository::new();
        repo.expect_start_search().times(0);

        let result = start_search(&repo, VisitorId::new(), form("DAC", "DAC"), today());

        match result {
            Err(ServiceError::Form(message)) => {
                assert_eq!(message, "Departure and arrival cities cannot be the same.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn record_fetch_stores_failure_without_details() {
        let mut repo = MockRepository::new();
        repo.expect_store_search_outcome()
            .times(1)
            .withf(|_, generation, outcome| {
                *generation == 2 && *outcome == SearchOutcome::Failed
            })
            .returning(|_, _, _| Ok(()));

        let result: Result<Vec<FlightOffer>, &str> = Err("connection reset");
        record_fetch(&repo, VisitorId::new(), 2, result).unwrap();
    }

    #[test]
    fn search_page_requires_a_search() {
        let mut repo = MockRepository::new();
        repo.expect_get_visitor_state()
            .returning(|_| Ok(Some(VisitorState::default())));

        let result = load_search_page(&repo, VisitorId::new());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn search_page_applies_filters() {
        let mut repo = MockRepository::new();
        repo.expect_get_visitor_state().returning(|_| {
            let mut state = state_with(SearchOutcome::Offers(vec![
                offer("1", "X", true),
                offer("2", "Y", false),
                offer("3", "X", false),
            ]));
            state.filters.toggle_airline("X");
            Ok(Some(state))
        });

        let page = load_search_page(&repo, VisitorId::new()).unwrap();

        assert_eq!(page.total_offers, 3);
        assert_eq!(page.offers.len(), 2);
        assert!(page.filters_active);
        assert_eq!(
            page.airlines,
            vec![
                AirlineOption {
                    name: "X".to_string(),
                    selected: true
                },
                AirlineOption {
                    name: "Y".to_string(),
                    selected: false
                },
            ]
        );
        assert!(page.error.is_none());
    }

    #[test]
    fn search_page_shows_generic_error_after_failure() {
        let mut repo = MockRepository::new();
        repo.expect_get_visitor_state()
            .returning(|_| Ok(Some(state_with(SearchOutcome::Failed))));

        let page = load_search_page(&repo, VisitorId::new()).unwrap();

        assert_eq!(page.error, Some(FETCH_ERROR_MESSAGE));
        assert!(page.offers.is_empty());
        assert!(!page.pending);
    }

    #[test]
    fn toggling_refundability_twice_resets_it() {
        let mut repo = MockRepository::new();
        repo.expect_get_visitor_state().returning(|_| {
            let mut state = state_with(SearchOutcome::Pending);
            state.filters.refundability = Refundability::Refundable;
            Ok(Some(state))
        });
        repo.expect_replace_filters()
            .times(1)
            .withf(|_, filters| filters.refundability == Refundability::Any)
            .returning(|_, _| Ok(()));

        let form = RefundabilityFilterForm {
            choice: "refundable".to_string(),
        };
        let filters = toggle_refundability(&repo, VisitorId::new(), form).unwrap();

        assert!(!filters.is_active());
    }

    #[test]
    fn clear_filters_surfaces_repository_errors() {
        let mut repo = MockRepository::new();
        repo.expect_get_visitor_state()
            .returning(|_| Ok(Some(state_with(SearchOutcome::Pending))));
        repo.expect_replace_filters()
            .returning(|_, _| Err(RepositoryError::Unavailable("poisoned".to_string())));

        let result = clear_filters(&repo, VisitorId::new());

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
