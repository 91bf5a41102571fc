//! HTTP handlers for the warehouse report server

pub mod dashboard;
pub mod health;
pub mod report;

pub use dashboard::show_dashboard;
pub use health::health_check;
pub use report::get_report;

use shared::Language;

/// Language from an optional `lang` query value, falling back to the configured default
pub(crate) fn resolve_language(requested: Option<&str>, default: Language) -> Language {
    requested.and_then(Language::from_code).unwrap_or(default)
}
