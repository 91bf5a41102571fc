//! Error types for loading input tables and deriving the report

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Failures while reading an input table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("{source_name} has no column `{column}`")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },
}

/// Failures while deriving the report from loaded tables
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("sales period has not started yet: today is {today}, period starts {epoch}")]
    SalesPeriodNotStarted { today: NaiveDate, epoch: NaiveDate },

    #[error("stock value of product {product_code} does not fit a decimal")]
    ValueOverflow { product_code: String },
}

pub type LoadResult<T> = Result<T, LoadError>;
