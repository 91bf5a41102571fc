//! Report export handler

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::resolve_language;
use crate::services::{ReportExport, ReportService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>, // "json" or "csv"
    pub lang: Option<String>,
    pub threshold: Option<i64>,
}

/// Get the warehouse report as JSON or CSV
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let settings = &state.config.report;
    let run = state.reports.run().await?;

    if query.format.as_deref() == Some("csv") {
        let language = resolve_language(query.lang.as_deref(), settings.language);
        let csv = ReportService::export_to_csv(&run.report, language, settings.decimal_places)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"warehouse_report.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        let threshold_days = query.threshold.unwrap_or(settings.stock_days_threshold);
        Ok(Json(ReportExport {
            report: &run.report,
            last_updated: run.last_updated.to_string(),
            stock_days_threshold: threshold_days,
            at_risk: run.report.at_risk_count(threshold_days),
        })
        .into_response())
    }
}
