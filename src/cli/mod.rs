//! Command handlers behind the `quire` binary.

pub mod handlers;
pub mod io;
pub mod print;
