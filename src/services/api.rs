use crate::domain::airport::{self, Airport};
use crate::domain::filter;
use crate::domain::types::VisitorId;
use crate::dto::api::{AirportsQuery, OffersResponse};
use crate::repository::VisitorReader;
use crate::services::ServiceResult;

/// Returns the visitor's offers after applying the active filters.
///
/// Visitors without a completed search get an empty list.
pub fn list_offers<R>(repo: &R, visitor: VisitorId) -> ServiceResult<OffersResponse>
where
    R: VisitorReader + ?Sized,
{
    let Some(state) = repo.get_visitor_state(visitor)? else {
        return Ok(OffersResponse {
            total: 0,
            offers: Vec::new(),
        });
    };

    let offers = state.outcome.offers();

    Ok(OffersResponse {
        total: offers.len(),
        offers: filter::apply(offers, &state.filters),
    })
}

/// Airports whose city or code matches the query.
pub fn search_airports(query: &AirportsQuery) -> Vec<Airport> {
    airport::search_airports(&query.q)
}
