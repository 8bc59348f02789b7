//! HTTP adapter for the blog admin API.

mod client;
pub mod credentials;

pub use client::HttpGateway;
