use std::thread::sleep;
use std::time::Duration;

use chrono::NaiveDate;
use flight_booking::domain::airport::find_airport;
use flight_booking::domain::booking::Booking;
use flight_booking::domain::offer::FlightOffer;
use flight_booking::domain::search::{SearchParams, TripType};
use flight_booking::domain::types::{OfferId, VisitorId};
use flight_booking::domain::visitor::SearchOutcome;
use flight_booking::repository::errors::RepositoryError;
use flight_booking::repository::{InMemoryRepository, VisitorReader, VisitorWriter};

fn params(destination: &str) -> SearchParams {
    SearchParams::try_new(
        find_airport("DAC").unwrap(),
        find_airport(destination).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        None,
        TripType::RoundTrip,
        (1, 1, 0),
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    )
    .unwrap()
}

fn offer(id: &str) -> FlightOffer {
    FlightOffer {
        id: OfferId::new(id).unwrap(),
        airline_name: "Biman".to_string(),
        is_refundable: false,
        price_total: 6200.0,
        currency: "BDT".to_string(),
        logo_url: String::new(),
        layover: 0,
        legs: Vec::new(),
    }
}

#[test]
fn test_unknown_visitor_has_no_state() {
    let repo = InMemoryRepository::new();

    assert!(repo.get_visitor_state(VisitorId::new()).unwrap().is_none());
}

#[test]
fn test_writes_require_a_started_search() {
    let repo = InMemoryRepository::new();

    let result = repo.replace_filters(VisitorId::new(), &Default::default());

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn test_new_search_resets_previous_results() {
    let repo = InMemoryRepository::new();
    let visitor = VisitorId::new();

    let first = repo.start_search(visitor, params("CXB")).unwrap();
    repo.store_search_outcome(visitor, first, SearchOutcome::Offers(vec![offer("a")]))
        .unwrap();
    let mut filters = repo.get_visitor_state(visitor).unwrap().unwrap().filters;
    filters.toggle_airline("Biman");
    repo.replace_filters(visitor, &filters).unwrap();

    let second = repo.start_search(visitor, params("CGP")).unwrap();
    let state = repo.get_visitor_state(visitor).unwrap().unwrap();

    assert_eq!(second, first + 1);
    assert_eq!(state.outcome, SearchOutcome::Pending);
    assert!(!state.filters.is_active());
    assert_eq!(state.search.unwrap().destination.code, "CGP");
}

#[test]
fn test_stale_fetch_still_overwrites_outcome() {
    let repo = InMemoryRepository::new();
    let visitor = VisitorId::new();

    let first = repo.start_search(visitor, params("CXB")).unwrap();
    let second = repo.start_search(visitor, params("CGP")).unwrap();

    repo.store_search_outcome(visitor, second, SearchOutcome::Offers(vec![offer("new")]))
        .unwrap();
    repo.store_search_outcome(visitor, first, SearchOutcome::Offers(vec![offer("old")]))
        .unwrap();

    let state = repo.get_visitor_state(visitor).unwrap().unwrap();
    assert_eq!(state.outcome.offers()[0].id.as_str(), "old");
    assert_eq!(state.generation, second);
}

#[test]
fn test_booking_clears_passenger_drafts() {
    let repo = InMemoryRepository::new();
    let visitor = VisitorId::new();
    let search = params("CXB");

    repo.start_search(visitor, search.clone()).unwrap();

    let mut rows = search.party.passenger_rows();
    rows[0].name = "Ann".to_string();
    rows[0].age = 40;
    rows[0].passport_number = "P1".to_string();
    repo.replace_passengers(visitor, &rows).unwrap();
    assert_eq!(
        repo.get_visitor_state(visitor).unwrap().unwrap().passengers,
        rows
    );

    rows[1].name = "Cid".to_string();
    rows[1].age = 7;
    let booking = Booking::try_new(OfferId::new("a").unwrap(), &rows).unwrap();
    repo.record_booking(visitor, &booking).unwrap();

    let state = repo.get_visitor_state(visitor).unwrap().unwrap();
    assert!(state.passengers.is_empty());
    assert_eq!(state.last_booking.unwrap().reference, booking.reference);
}

#[test]
fn test_clones_share_the_store() {
    let repo = InMemoryRepository::new();
    let other = repo.clone();
    let visitor = VisitorId::new();

    repo.start_search(visitor, params("CXB")).unwrap();

    assert!(other.get_visitor_state(visitor).unwrap().is_some());
}

#[test]
fn test_idle_visitors_are_evicted_when_a_new_one_arrives() {
    let repo = InMemoryRepository::with_limits(Duration::ZERO, 100);
    let first = VisitorId::new();
    let second = VisitorId::new();

    repo.start_search(first, params("CXB")).unwrap();
    repo.start_search(second, params("CXB")).unwrap();

    assert!(repo.get_visitor_state(first).unwrap().is_none());
    assert!(repo.get_visitor_state(second).unwrap().is_some());
    assert_eq!(repo.visitor_count().unwrap(), 1);
}

#[test]
fn test_returning_visitor_is_not_evicted() {
    let repo = InMemoryRepository::with_limits(Duration::ZERO, 100);
    let visitor = VisitorId::new();

    let first = repo.start_search(visitor, params("CXB")).unwrap();
    let second = repo.start_search(visitor, params("CGP")).unwrap();

    assert_eq!(second, first + 1);
    assert_eq!(repo.visitor_count().unwrap(), 1);
}

#[test]
fn test_cap_evicts_least_recently_seen_visitor() {
    let repo = InMemoryRepository::with_limits(Duration::from_secs(3600), 2);
    let a = VisitorId::new();
    let b = VisitorId::new();
    let c = VisitorId::new();

    repo.start_search(a, params("CXB")).unwrap();
    sleep(Duration::from_millis(2));
    repo.start_search(b, params("CXB")).unwrap();
    sleep(Duration::from_millis(2));
    repo.replace_filters(a, &Default::default()).unwrap();
    sleep(Duration::from_millis(2));
    repo.start_search(c, params("CXB")).unwrap();

    assert!(repo.get_visitor_state(a).unwrap().is_some());
    assert!(repo.get_visitor_state(b).unwrap().is_none());
    assert!(repo.get_visitor_state(c).unwrap().is_some());
    assert_eq!(repo.visitor_count().unwrap(), 2);
}
