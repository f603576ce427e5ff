//! Data layer for the game sales dashboard.
//!
//! Responsible for reading the raw dataset, normalizing records, building
//! the four per-manufacturer views and running the top-level analysis
//! pipeline.

pub mod aggregator;
pub mod analysis;
pub mod normalizer;
pub mod reader;

pub use sales_core as core;
