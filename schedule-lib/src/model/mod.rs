//! Data model types

mod day;
mod item;

pub use day::*;
pub use item::*;
