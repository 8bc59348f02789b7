//! quire: write, publish and archive blog articles against the blog admin API.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infra;
