// src/lib.rs
pub mod types;
pub mod config;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod report;
pub mod providers;
pub mod funding;
pub mod rank;
pub mod filter;
