//! Client-side filtering of fetched offers.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::offer::FlightOffer;
use crate::domain::types::TypeConstraintError;

/// Tri-state refundability filter.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Refundability {
    #[default]
    Any,
    Refundable,
    NonRefundable,
}

impl Refundability {
    pub const ALL: [Refundability; 3] = [
        Refundability::Any,
        Refundability::Refundable,
        Refundability::NonRefundable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Refundability::Any => "any",
            Refundability::Refundable => "refundable",
            Refundability::NonRefundable => "non_refundable",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Refundability::Any => "Any",
            Refundability::Refundable => "Refundable",
            Refundability::NonRefundable => "Non-refundable",
        }
    }

    fn admits(&self, is_refundable: bool) -> bool {
        match self {
            Refundability::Any => true,
            Refundability::Refundable => is_refundable,
            Refundability::NonRefundable => !is_refundable,
        }
    }
}

impl FromStr for Refundability {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "any" => Ok(Refundability::Any),
            "refundable" => Ok(Refundability::Refundable),
            "non_refundable" => Ok(Refundability::NonRefundable),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Active filter selections for one result list.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    pub selected_airlines: BTreeSet<String>,
    pub refundability: Refundability,
}

impl FilterState {
    /// Adds the airline if absent, removes it if present.
    pub fn toggle_airline(&mut self, airline: &str) {
        if !self.selected_airlines.remove(airline) {
            self.selected_airlines.insert(airline.to_string());
        }
    }

    /// Selects `choice`; selecting the active choice again resets to `Any`.
    pub fn toggle_refundability(&mut self, choice: Refundability) {
        self.refundability = if self.refundability == choice {
            Refundability::Any
        } else {
            choice
        };
    }

    /// Whether any predicate narrows the result list.
    pub fn is_active(&self) -> bool {
        !self.selected_airlines.is_empty() || self.refundability != Refundability::Any
    }

    /// Whether a single offer passes every active predicate.
    pub fn matches(&self, offer: &FlightOffer) -> bool {
        (self.selected_airlines.is_empty() || self.selected_airlines.contains(&offer.airline_name))
            && self.refundability.admits(offer.is_refundable)
    }
}

/// Order-preserving subsequence of `offers` matching `filters`.
pub fn apply(offers: &[FlightOffer], filters: &FilterState) -> Vec<FlightOffer> {
    offers
        .iter()
        .filter(|offer| filters.matches(offer))
        .cloned()
        .collect()
}

/// Distinct airline names present in `offers`, sorted.
pub fn available_airlines(offers: &[FlightOffer]) -> Vec<String> {
    offers
        .iter()
        .map(|offer| offer.airline_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
