//! Admin schedule endpoints

mod schedule;

pub use schedule::*;
