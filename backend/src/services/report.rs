//! Report service: runs the load → aggregate → merge pipeline over the input files

use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use shared::aggregate::summarize_movements;
use shared::loader::{load_catalog, load_movements, load_stock};
use shared::merge::build_report;
use shared::{Language, Report, ReportColumn, FIELD_DELIMITER};

use crate::config::DataConfig;
use crate::error::{AppError, AppResult};

/// Sentinel shown when the stock snapshot is gone
pub const FILE_MISSING_TEXT: &str = "File does not exist!";

/// When the stock snapshot was last exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastUpdated {
    At(DateTime<Local>),
    FileMissing,
}

impl LastUpdated {
    /// Creation time of `path`, or its modification time where the
    /// filesystem does not record creation
    pub fn of_file(path: &Path) -> Self {
        let Ok(metadata) = std::fs::metadata(path) else {
            return LastUpdated::FileMissing;
        };

        match metadata.created().or_else(|_| metadata.modified()) {
            Ok(time) => LastUpdated::At(DateTime::<Local>::from(time)),
            Err(err) => {
                tracing::warn!(path = %path.display(), "No file timestamp available: {}", err);
                LastUpdated::FileMissing
            }
        }
    }
}

impl std::fmt::Display for LastUpdated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LastUpdated::At(time) => write!(f, "{}", time.format("%d-%m-%Y %H:%M")),
            LastUpdated::FileMissing => f.write_str(FILE_MISSING_TEXT),
        }
    }
}

/// One pipeline run together with the data timestamp
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub report: Report,
    pub last_updated: LastUpdated,
}

/// Report service
#[derive(Clone)]
pub struct ReportService {
    data: DataConfig,
}

impl ReportService {
    pub fn new(data: DataConfig) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &DataConfig {
        &self.data
    }

    /// Timestamp of the stock snapshot file
    pub fn last_updated(&self) -> LastUpdated {
        LastUpdated::of_file(&self.data.stock_path)
    }

    /// Load all inputs and derive the report as of `today`
    pub fn generate(&self, today: NaiveDate) -> AppResult<Report> {
        let catalog = load_catalog(&self.data.products_path)?;
        let movements = load_movements(&self.data.movements_path)?;
        let summary = summarize_movements(&movements);
        let stock = load_stock(&self.data.stock_path)?;

        tracing::debug!(
            catalog = catalog.len(),
            movements = movements.len(),
            movement_ids = summary.len(),
            stock = stock.len(),
            "Inputs loaded"
        );

        Ok(build_report(&catalog, &stock, &summary, today)?)
    }

    /// Run the pipeline for today's date on a blocking worker thread
    pub async fn run(&self) -> AppResult<ReportRun> {
        let service = self.clone();
        let today = Local::now().date_naive();

        tokio::task::spawn_blocking(move || -> AppResult<ReportRun> {
            let last_updated = service.last_updated();
            let report = service.generate(today)?;
            Ok(ReportRun {
                report,
                last_updated,
            })
        })
        .await
        .map_err(|e| AppError::Internal(format!("Report task failed: {}", e)))?
    }

    /// Export report rows as semicolon-separated CSV with report-facing headers
    pub fn export_to_csv(
        report: &Report,
        language: Language,
        decimal_places: u32,
    ) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .from_writer(vec![]);

        wtr.write_record(ReportColumn::ALL.iter().map(|column| column.label(language)))
            .map_err(|e| AppError::Export(format!("CSV header error: {}", e)))?;
        for row in &report.rows {
            wtr.write_record(
                ReportColumn::ALL
                    .iter()
                    .map(|column| column.cell(row, decimal_places)),
            )
            .map_err(|e| AppError::Export(format!("CSV serialization error: {}", e)))?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Export(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Export(format!("UTF-8 conversion error: {}", e)))
    }
}

/// JSON shape of an exported report
#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    #[serde(flatten)]
    pub report: &'a Report,
    pub last_updated: String,
    pub stock_days_threshold: i64,
    pub at_risk: usize,
}
