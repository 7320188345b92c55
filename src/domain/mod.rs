//! Domain values and the pure logic of search, filtering and booking.

pub mod airport;
pub mod booking;
pub mod filter;
pub mod offer;
pub mod party;
pub mod passenger;
pub mod search;
pub mod types;
pub mod visitor;
