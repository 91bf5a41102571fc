//! Dashboard page handler

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_language;
use crate::services::{render_dashboard, DashboardView, NumberFormat};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Highlight rows lasting fewer days than this
    pub threshold: Option<i64>,
    pub lang: Option<String>,
}

/// Render the warehouse dashboard
pub async fn show_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Html<String>> {
    let settings = &state.config.report;
    let language = resolve_language(query.lang.as_deref(), settings.language);
    let threshold_days = query.threshold.unwrap_or(settings.stock_days_threshold);

    let run = state.reports.run().await?;

    tracing::info!(
        rows = run.report.rows.len(),
        at_risk = run.report.at_risk_count(threshold_days),
        threshold_days,
        "Dashboard rendered"
    );

    let page = render_dashboard(&DashboardView {
        report: &run.report,
        last_updated: &run.last_updated,
        threshold_days,
        language,
        format: NumberFormat::with_decimal_places(settings.decimal_places),
    })
    .map_err(|e| AppError::Internal(format!("Dashboard rendering failed: {}", e)))?;

    Ok(Html(page))
}
