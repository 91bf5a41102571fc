//! Error handling for the warehouse report server
//!
//! Provides consistent error responses in English and Czech

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{LoadError, ReportError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Pipeline errors
    #[error("Input file error: {0}")]
    Load(#[from] LoadError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_cs: String,
}

impl AppError {
    fn detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Load(LoadError::Io { path, .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "INPUT_FILE_MISSING".to_string(),
                    message_en: format!("Input file {} cannot be read", path.display()),
                    message_cs: format!("Soubor {} nelze načíst", path.display()),
                },
            ),
            AppError::Load(LoadError::MissingColumn { source_name, column }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INPUT_COLUMN_MISSING".to_string(),
                    message_en: format!("{} has no column {}", source_name, column),
                    message_cs: format!("V souboru {} chybí sloupec {}", source_name, column),
                },
            ),
            AppError::Load(LoadError::Csv { source_name, .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INPUT_MALFORMED".to_string(),
                    message_en: format!("{} is not a valid semicolon-separated file", source_name),
                    message_cs: format!("Soubor {} není platné CSV oddělené středníkem", source_name),
                },
            ),
            AppError::Report(ReportError::SalesPeriodNotStarted { epoch, .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "SALES_PERIOD_NOT_STARTED".to_string(),
                    message_en: format!("Sales period starting {} has not begun yet", epoch),
                    message_cs: format!("Prodejní období od {} ještě nezačalo", epoch),
                },
            ),
            AppError::Report(ReportError::ValueOverflow { product_code }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "VALUE_OUT_OF_RANGE".to_string(),
                    message_en: format!("Stock value of product {} is out of range", product_code),
                    message_cs: format!("Hodnota skladu produktu {} je mimo rozsah", product_code),
                },
            ),
            AppError::Export(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "EXPORT_ERROR".to_string(),
                    message_en: format!("Report export failed: {}", msg),
                    message_cs: "Export reportu selhal".to_string(),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_cs: format!("Chyba konfigurace: {}", msg),
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_cs: "Interní chyba serveru".to_string(),
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_maps_to_service_unavailable() {
        let err = AppError::Load(LoadError::Io {
            path: PathBuf::from("data/warehouse_report.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });

        let (status, detail) = err.detail();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(detail.code, "INPUT_FILE_MISSING");
        assert!(detail.message_en.contains("warehouse_report.csv"));
    }

    #[test]
    fn missing_column_names_the_column() {
        let err = AppError::Load(LoadError::MissingColumn {
            source_name: "stock".to_string(),
            column: "Volné",
        });

        let (status, detail) = err.detail();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(detail.message_cs.contains("Volné"));
    }

    #[test]
    fn value_overflow_is_unprocessable() {
        let err = AppError::Report(ReportError::ValueOverflow {
            product_code: "A".to_string(),
        });

        let (status, detail) = err.detail();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail.code, "VALUE_OUT_OF_RANGE");
    }
}
