//! Domain models for the warehouse report

mod catalog;
mod movement;
mod report;
mod stock;

pub use catalog::*;
pub use movement::*;
pub use report::*;
pub use stock::*;
