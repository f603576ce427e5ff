//! Runtime layer for the game sales dashboard.
//!
//! Owns the loaded dataset and memoizes the aggregated views so the UI can
//! switch manufacturer without recomputing anything.

pub mod data_manager;

pub use sales_core as core;
pub use sales_data as data;
