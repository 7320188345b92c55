//! Configuration and flights API wire models.

pub mod config;
pub mod offer;
