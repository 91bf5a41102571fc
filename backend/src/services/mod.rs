//! Business logic services for the warehouse report server

pub mod presenter;
pub mod report;

pub use presenter::{render_dashboard, DashboardView, NumberFormat};
pub use report::{LastUpdated, ReportExport, ReportService};
