use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::{
    domain::{
        booking::Booking, filter::FilterState, passenger::PassengerFormRow,
        search::SearchParams, types::VisitorId, visitor::SearchOutcome, visitor::VisitorState,
    },
    repository::{
        VisitorReader, VisitorWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Visitors without a write for this long are dropped.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);
/// Upper bound on the number of visitors held at once.
pub const DEFAULT_MAX_VISITORS: usize = 10_000;

struct VisitorEntry {
    state: VisitorState,
    last_seen: Instant,
}

/// Process-local store of visitor state. Cloning shares the same map, so one
/// instance can be handed to every worker.
///
/// Entries are swept when a new visitor starts searching: idle ones expire
/// after `idle_ttl`, and the least recently written ones make room once
/// `max_visitors` is reached.
#[derive(Clone)]
pub struct InMemoryRepository {
    visitors: Arc<RwLock<HashMap<VisitorId, VisitorEntry>>>,
    idle_ttl: Duration,
    max_visitors: usize,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_IDLE_TTL, DEFAULT_MAX_VISITORS)
    }

    pub fn with_limits(idle_ttl: Duration, max_visitors: usize) -> Self {
        Self {
            visitors: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
            max_visitors: max_visitors.max(1),
        }
    }

    /// Number of visitors currently held.
    pub fn visitor_count(&self) -> RepositoryResult<usize> {
        Ok(self.visitors.read()?.len())
    }

    /// Runs `f` against an existing visitor record and marks it as seen.
    fn update_visitor<T>(
        &self,
        visitor: VisitorId,
        f: impl FnOnce(&mut VisitorState) -> T,
    ) -> RepositoryResult<T> {
        let mut visitors = self.visitors.write()?;
        let entry = visitors
            .get_mut(&visitor)
            .ok_or(RepositoryError::NotFound)?;
        entry.last_seen = Instant::now();
        Ok(f(&mut entry.state))
    }

    /// Makes room for one more visitor.
    fn evict(&self, visitors: &mut HashMap<VisitorId, VisitorEntry>, now: Instant) {
        let before = visitors.len();
        visitors.retain(|_, entry| now.duration_since(entry.last_seen) < self.idle_ttl);

        while visitors.len() >= self.max_visitors {
            let oldest = visitors
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    visitors.remove(&id);
                }
                None => break,
            }
        }

        let evicted = before - visitors.len();
        if evicted > 0 {
            log::info!("Evicted {evicted} idle visitors");
        }
    }
}

impl VisitorReader for InMemoryRepository {
    fn get_visitor_state(&self, visitor: VisitorId) -> RepositoryResult<Option<VisitorState>> {
        let visitors = self.visitors.read()?;
        Ok(visitors.get(&visitor).map(|entry| entry.state.clone()))
    }
}

impl VisitorWriter for InMemoryRepository {
    fn start_search(&self, visitor: VisitorId, params: SearchParams) -> RepositoryResult<u64> {
        let mut visitors = self.visitors.write()?;
        let now = Instant::now();
        if !visitors.contains_key(&visitor) {
            self.evict(&mut visitors, now);
        }

        let entry = visitors.entry(visitor).or_insert_with(|| VisitorEntry {
            state: VisitorState::default(),
            last_seen: now,
        });
        entry.last_seen = now;
        Ok(entry.state.begin_search(params))
    }

    fn store_search_outcome(
        &self,
        visitor: VisitorId,
        generation: u64,
        outcome: SearchOutcome,
    ) -> RepositoryResult<()> {
        self.update_visitor(visitor, |state| {
            // A slower fetch from a superseded search still wins here.
            if state.generation != generation {
                log::warn!(
                    "Visitor {visitor}: storing results of search {generation} over newer search {}",
                    state.generation
                );
            }
            state.outcome = outcome;
        })
    }

    fn replace_filters(&self, visitor: VisitorId, filters: &FilterState) -> RepositoryResult<()> {
        self.update_visitor(visitor, |state| state.filters = filters.clone())
    }

    fn replace_passengers(
        &self,
        visitor: VisitorId,
        rows: &[PassengerFormRow],
    ) -> RepositoryResult<()> {
        self.update_visitor(visitor, |state| state.passengers = rows.to_vec())
    }

    fn record_booking(&self, visitor: VisitorId, booking: &Booking) -> RepositoryResult<()> {
        self.update_visitor(visitor, |state| {
            state.passengers.clear();
            state.last_booking = Some(booking.clone());
        })
    }
}
