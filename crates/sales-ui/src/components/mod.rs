//! Reusable line-level building blocks shared by the dashboard panels.

pub mod header;
pub mod share_bar;

pub use header::Header;
pub use share_bar::ShareBar;
