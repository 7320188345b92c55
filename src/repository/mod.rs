use crate::{
    domain::{
        booking::Booking, filter::FilterState, passenger::PassengerFormRow,
        search::SearchParams, types::VisitorId, visitor::SearchOutcome, visitor::VisitorState,
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use memory::InMemoryRepository;

pub trait VisitorReader {
    fn get_visitor_state(&self, visitor: VisitorId) -> RepositoryResult<Option<VisitorState>>;
}

pub trait VisitorWriter {
    /// Stores new search parameters, discarding the previous search's results,
    /// filters and passenger drafts. Returns the new search generation.
    fn start_search(&self, visitor: VisitorId, params: SearchParams) -> RepositoryResult<u64>;
    /// Stores the outcome of the fetch started for `generation`.
    fn store_search_outcome(
        &self,
        visitor: VisitorId,
        generation: u64,
        outcome: SearchOutcome,
    ) -> RepositoryResult<()>;
    fn replace_filters(&self, visitor: VisitorId, filters: &FilterState) -> RepositoryResult<()>;
    fn replace_passengers(
        &self,
        visitor: VisitorId,
        rows: &[PassengerFormRow],
    ) -> RepositoryResult<()>;
    fn record_booking(&self, visitor: VisitorId, booking: &Booking) -> RepositoryResult<()>;
}
