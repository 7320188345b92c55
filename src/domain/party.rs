//! Travelling party counts captured by the search form.

use serde::{Deserialize, Serialize};

use crate::domain::passenger::{PassengerFormRow, derive_rows};
use crate::domain::search::SearchError;

/// Largest head count the search form accepts for a single category.
pub const MAX_PER_CATEGORY: u32 = 5;

/// Passenger counts by age category for one search.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripParty {
    adults: u32,
    children: u32,
    infants: u32,
}

impl TripParty {
    /// Builds a party, enforcing at least one adult and no more infants than
    /// adults.
    pub fn try_new(adults: u32, children: u32, infants: u32) -> Result<Self, SearchError> {
        if adults < 1 {
            return Err(SearchError::NoAdults);
        }
        if infants > adults {
            return Err(SearchError::TooManyInfants);
        }
        if adults > MAX_PER_CATEGORY || children > MAX_PER_CATEGORY || infants > MAX_PER_CATEGORY
        {
            return Err(SearchError::PartyTooLarge);
        }
        Ok(Self {
            adults,
            children,
            infants,
        })
    }

    pub fn adults(&self) -> u32 {
        self.adults
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    pub fn infants(&self) -> u32 {
        self.infants
    }

    /// Number of travellers, infants included.
    pub fn total(&self) -> u32 {
        self.adults + self.children + self.infants
    }

    /// Empty passenger rows for every adult and child in the party.
    pub fn passenger_rows(&self) -> Vec<PassengerFormRow> {
        derive_rows(self.adults as usize, self.children as usize)
    }
}

impl Default for TripParty {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passenger::PassengerKind;

    #[test]
    fn requires_an_adult() {
        assert_eq!(TripParty::try_new(0, 2, 0), Err(SearchError::NoAdults));
    }

    #[test]
    fn infants_cannot_outnumber_adults() {
        assert_eq!(TripParty::try_new(1, 0, 2), Err(SearchError::TooManyInfants));
        assert!(TripParty::try_new(2, 0, 2).is_ok());
    }

    #[test]
    fn caps_each_category() {
        assert_eq!(TripParty::try_new(6, 0, 0), Err(SearchError::PartyTooLarge));
        assert_eq!(TripParty::try_new(1, 6, 0), Err(SearchError::PartyTooLarge));
    }

    #[test]
    fn passenger_rows_skip_infants() {
        let party = TripParty::try_new(2, 1, 1).unwrap();
        let kinds: Vec<_> = party.passenger_rows().iter().map(|r| r.kind).collect();

        assert_eq!(party.total(), 4);
        assert_eq!(
            kinds,
            vec![PassengerKind::Adult, PassengerKind::Adult, PassengerKind::Child]
        );
    }
}
