//! growthchart-engine
//!
//! Entry point for display code: validate the chosen standard against the
//! patient's age, resolve reference parameters, and turn raw measurements
//! into Z-scores, percentiles and chart curves.

pub mod assessment;
pub mod chart;
pub mod config;
pub mod engine;
pub mod error;

pub use engine::GrowthEngine;
