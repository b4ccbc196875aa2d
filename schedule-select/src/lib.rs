//! Selection and bulk-action core for the admin schedule list.
//!
//! Tracks which entries of the active group are selected, turns clicks and
//! key presses into selection changes, projects the state into visual flags
//! for a renderer, and runs the confirmation-gated bulk delete.

pub mod bulk;
pub mod collab;
pub mod controller;
pub mod error;
pub mod item;
pub mod keybinds;
pub mod labels;
pub mod prelude;
pub mod selection;
pub mod view;

mod manager;

pub use manager::*;
