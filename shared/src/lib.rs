//! Shared types and the report pipeline for the warehouse stock report
//!
//! The pipeline is synchronous and pure apart from file reads:
//! [`loader`] reads the three exports, [`aggregate`] nets the movement log,
//! and [`merge`] joins everything into a sorted [`Report`].

pub mod aggregate;
pub mod coerce;
pub mod error;
pub mod loader;
pub mod merge;
pub mod models;
pub mod types;

pub use error::{LoadError, ReportError};
pub use models::*;
pub use types::*;
