//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::booking::Booking;
use crate::domain::filter::FilterState;
use crate::domain::passenger::PassengerFormRow;
use crate::domain::search::SearchParams;
use crate::domain::types::VisitorId;
use crate::domain::visitor::{SearchOutcome, VisitorState};
use crate::repository::errors::RepositoryResult;
use crate::repository::{VisitorReader, VisitorWriter};

mock! {
    pub Repository {}

    impl VisitorReader for Repository {
        fn get_visitor_state(&self, visitor: VisitorId) -> RepositoryResult<Option<VisitorState>>;
    }

    impl VisitorWriter for Repository {
        fn start_search(&self, visitor: VisitorId, params: SearchParams) -> RepositoryResult<u64>;
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
}
