//! Admin schedule API client library
//!
//! An async client for the sports club's admin schedule endpoints: fetching
//! the weekly schedule and deleting single entries.

pub mod api;
pub mod error;
pub mod model;

mod client;

pub use client::*;
pub use error::Error;
