//! Domain layer types and invariants.

pub mod draft;
pub mod error;
pub mod reading_time;
pub mod tags;
pub mod types;
