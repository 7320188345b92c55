//! DTO modules that bridge services with templates and APIs.

pub mod api;
pub mod booking;
pub mod main;
pub mod search;
