#[cfg(feature = "cli")]
pub mod args;
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

use crate::core::pipeline::FORMATS;
use crate::core::source::{DatasetSource, BUILTIN};
use crate::core::ConfigProvider;
use crate::domain::services::Thresholds;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Effective configuration after merging the config file with command line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub source: String,
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub archive: bool,
    pub thresholds: Thresholds,
    pub monitor: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: BUILTIN.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_formats: Vec::new(),
            archive: false,
            thresholds: Thresholds::default(),
            monitor: false,
        }
    }
}

/// 去除空白、空項與重複的輸出格式，保留第一次出現的順序
pub fn normalize_formats<I, S>(formats: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for format in formats {
        let format = format.as_ref().trim();
        if !format.is_empty() && !normalized.iter().any(|f| f == format) {
            normalized.push(format.to_string());
        }
    }
    normalized
}

impl From<TomlConfig> for ReportConfig {
    fn from(file: TomlConfig) -> Self {
        let defaults = ReportConfig::default();
        Self {
            source: file.source.location.unwrap_or(defaults.source),
            output_path: file.output.path.unwrap_or(defaults.output_path),
            output_formats: normalize_formats(&file.output.formats),
            archive: file.output.archive,
            thresholds: file.thresholds,
            monitor: file.monitoring.enabled,
        }
    }
}

impl ConfigProvider for ReportConfig {
    fn source(&self) -> &str {
        &self.source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn archive(&self) -> bool {
        self.archive
    }

    fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        DatasetSource::parse(&self.source)?;
        validate_path("output.path", &self.output_path)?;
        validate_one_of("output.formats", &self.output_formats, &FORMATS)?;
        self.thresholds.validate()
    }
}
