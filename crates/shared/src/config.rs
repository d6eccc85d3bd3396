//! Application configuration management.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::error::AppResult;
use crate::types::{ColumnMapping, LayoutConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Caller-supplied display values.
    pub report: ReportSettings,
    /// Page geometry and height heuristic.
    pub layout: LayoutConfig,
    /// Logical field to physical column mapping.
    pub columns: ColumnMapping,
}

/// Display values passed through into the report unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Free-text report generation date.
    pub report_date: Option<String>,
    /// Page number seed, as typed by the user.
    pub page_number: Option<String>,
}

impl ReportSettings {
    /// Parses the page number seed; anything that is not a positive number is 1.
    #[must_use]
    pub fn page_number_seed(&self) -> u32 {
        self.page_number
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<Decimal>().ok())
            .filter(|seed| *seed >= Decimal::ONE)
            .and_then(|seed| seed.trunc().to_u32())
            .unwrap_or(1)
    }
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// the explicit `file` if given, then `CONSIGN__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the layout is invalid.
    pub fn load(file: Option<&Path>) -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix("CONSIGN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.layout.validate()?;
        tracing::debug!(
            run_mode = %run_mode,
            capacity = config.layout.content_capacity(),
            summary_reserve = config.layout.summary_reserve,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use rstest::rstest;

    #[rstest]
    #[case(None, 1)]
    #[case(Some("3"), 3)]
    #[case(Some(" 7 "), 7)]
    #[case(Some("2.9"), 2)]
    #[case(Some("0"), 1)]
    #[case(Some("-4"), 1)]
    #[case(Some(""), 1)]
    #[case(Some("page one"), 1)]
    fn test_page_number_seed(#[case] raw: Option<&str>, #[case] expected: u32) {
        let settings = ReportSettings {
            report_date: None,
            page_number: raw.map(str::to_string),
        };
        assert_eq!(settings.page_number_seed(), expected);
    }

    #[test]
    fn test_load_defaults() {
        temp_env::with_vars_unset(
            [
                "CONSIGN__LAYOUT__SUMMARY_RESERVE",
                "CONSIGN__COLUMNS__DETAIL__KEY",
            ],
            || {
                let config = AppConfig::load(None).unwrap();
                assert_eq!(config.layout, LayoutConfig::default());
                assert!(config.columns.detail.key.is_none());
                assert!(config.report.report_date.is_none());
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("CONSIGN__LAYOUT__SUMMARY_RESERVE", Some("120")),
                ("CONSIGN__COLUMNS__DETAIL__KEY", Some("run_number")),
                ("CONSIGN__REPORT__REPORT_DATE", Some("Oct 18 2026")),
            ],
            || {
                let config = AppConfig::load(None).unwrap();
                assert_eq!(config.layout.summary_reserve, 120);
                assert_eq!(config.layout.entry_base_height, 245);
                assert_eq!(config.columns.detail.key.as_deref(), Some("run_number"));
                assert_eq!(config.report.report_date.as_deref(), Some("Oct 18 2026"));
            },
        );
    }

    #[test]
    fn test_load_rejects_invalid_layout() {
        temp_env::with_var("CONSIGN__LAYOUT__SUMMARY_RESERVE", Some("5000"), || {
            let err = AppConfig::load(None).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        });
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = AppConfig::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
