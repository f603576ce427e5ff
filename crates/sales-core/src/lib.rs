//! Shared domain layer for the game sales dashboard.
//!
//! Holds the closed enumerations (manufacturer, platform, genre, region),
//! the raw and normalized record types, the error type, CLI settings and
//! display formatting helpers used by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod platform;
pub mod settings;
