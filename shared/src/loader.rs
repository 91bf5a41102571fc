//! Semicolon-delimited table loaders
//!
//! Each input export is read by header name. Columns the report needs must be
//! present in the header row; numeric columns are coerced with
//! [`parse_locale_decimal`] so malformed cells become zero instead of errors.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::coerce::{parse_locale_decimal, parse_locale_quantity};
use crate::error::{LoadError, LoadResult};
use crate::models::{CatalogProduct, MovementRecord, StockSnapshot};
use crate::types::{Money, FIELD_DELIMITER};

/// A table that can be read from one of the input exports
pub trait InputTable: Sized {
    /// Row shape as it appears in the file
    type Raw: DeserializeOwned;

    /// Header names that must exist for the table to be usable
    const REQUIRED_COLUMNS: &'static [&'static str];

    fn from_raw(raw: Self::Raw) -> Self;
}

#[derive(Deserialize)]
pub struct CatalogRow {
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "purchasePrice", default)]
    purchase_price: String,
}

impl InputTable for CatalogProduct {
    type Raw = CatalogRow;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["code", "name", "purchasePrice"];

    fn from_raw(raw: CatalogRow) -> Self {
        CatalogProduct {
            code: raw.code,
            name: raw.name,
            purchase_price: Money::czk(parse_locale_decimal(&raw.purchase_price)).without_vat(),
        }
    }
}

#[derive(Deserialize)]
pub struct StockRow {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Volné", default)]
    free: String,
    #[serde(rename = "Posl.příjem", default)]
    last_receipt: String,
}

impl InputTable for StockSnapshot {
    type Raw = StockRow;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["ID", "Volné", "Posl.příjem"];

    fn from_raw(raw: StockRow) -> Self {
        StockSnapshot {
            id: raw.id,
            free_quantity: parse_locale_quantity(&raw.free),
            last_receipt: raw.last_receipt,
        }
    }
}

#[derive(Deserialize)]
pub struct MovementRow {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Množ.", default)]
    quantity: String,
}

impl InputTable for MovementRecord {
    type Raw = MovementRow;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["ID", "Množ."];

    fn from_raw(raw: MovementRow) -> Self {
        MovementRecord {
            id: raw.id,
            quantity: parse_locale_quantity(&raw.quantity),
        }
    }
}

/// Read a whole table from `reader`; `source_name` labels errors and logs
pub fn read_table<T: InputTable, R: Read>(reader: R, source_name: &str) -> LoadResult<Vec<T>> {
    let csv_error = |source: csv::Error| LoadError::Csv {
        source_name: source_name.to_string(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    for &column in T::REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(LoadError::MissingColumn {
                source_name: source_name.to_string(),
                column,
            });
        }
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let mut record = record.map_err(csv_error)?;
        // Short rows read as empty cells, surplus cells are dropped
        while record.len() < width {
            record.push_field("");
        }
        record.truncate(width);

        let raw: T::Raw = record.deserialize(Some(&headers)).map_err(csv_error)?;
        rows.push(T::from_raw(raw));
    }

    tracing::debug!(source = source_name, rows = rows.len(), "Input table loaded");
    Ok(rows)
}

/// Open `path` and read it as a table of `T`
pub fn load_table<T: InputTable>(path: impl AsRef<Path>) -> LoadResult<Vec<T>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file, &path.display().to_string())
}

pub fn load_catalog(path: impl AsRef<Path>) -> LoadResult<Vec<CatalogProduct>> {
    load_table(path)
}

pub fn load_stock(path: impl AsRef<Path>) -> LoadResult<Vec<StockSnapshot>> {
    load_table(path)
}

pub fn load_movements(path: impl AsRef<Path>) -> LoadResult<Vec<MovementRecord>> {
    load_table(path)
}
