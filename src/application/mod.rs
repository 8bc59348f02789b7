//! Application services layer.

pub mod editor;
pub mod error;
pub mod gateway;
