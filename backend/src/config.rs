//! Configuration management for the warehouse report server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WR_ prefix

use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{Language, DEFAULT_STOCK_DAYS_THRESHOLD};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Input file locations
    pub data: DataConfig,

    /// Report presentation settings
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Product catalog export (code, name, purchasePrice)
    pub products_path: PathBuf,

    /// Warehouse stock snapshot (ID, Volné, Posl.příjem)
    pub stock_path: PathBuf,

    /// Warehouse movement log (ID, Množ.)
    pub movements_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Rows lasting fewer days than this are highlighted
    pub stock_days_threshold: i64,

    /// Default page language
    pub language: Language,

    /// Decimal places for prices and values
    pub decimal_places: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WR_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8501)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("data.products_path", "data/shoptet_products.csv")?
            .set_default("data.stock_path", "data/warehouse_report.csv")?
            .set_default("data.movements_path", "data/warehouse_movements.csv")?
            .set_default("report.stock_days_threshold", DEFAULT_STOCK_DAYS_THRESHOLD)?
            .set_default("report.language", Language::default().code())?
            .set_default("report.decimal_places", 1)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WR_ prefix)
            .add_source(
                Environment::with_prefix("WR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl DataConfig {
    /// All input files with a human-readable role
    pub fn inputs(&self) -> [(&'static str, &Path); 3] {
        [
            ("product catalog", self.products_path.as_path()),
            ("stock snapshot", self.stock_path.as_path()),
            ("movement log", self.movements_path.as_path()),
        ]
    }

    /// Fail with the first input file that does not exist
    pub fn ensure_present(&self) -> Result<(), String> {
        for (role, path) in self.inputs() {
            if !path.is_file() {
                return Err(format!("{} file {} does not exist", role, path.display()));
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8501,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            stock_days_threshold: DEFAULT_STOCK_DAYS_THRESHOLD,
            language: Language::default(),
            decimal_places: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_use_single_underscore_prefix() {
        std::env::set_var("WR_SERVER__PORT", "9999");
        std::env::set_var("WR_DATA__STOCK_PATH", "exports/stock.csv");
        std::env::set_var("WR_REPORT__LANGUAGE", "en");

        let config = Config::load();

        std::env::remove_var("WR_SERVER__PORT");
        std::env::remove_var("WR_DATA__STOCK_PATH");
        std::env::remove_var("WR_REPORT__LANGUAGE");

        let config = config.unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.data.stock_path, PathBuf::from("exports/stock.csv"));
        assert_eq!(config.report.language, Language::English);
        // Untouched keys keep their defaults
        assert_eq!(config.data.products_path, PathBuf::from("data/shoptet_products.csv"));
        assert_eq!(config.report.stock_days_threshold, DEFAULT_STOCK_DAYS_THRESHOLD);
    }
}
