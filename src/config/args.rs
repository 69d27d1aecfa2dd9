use crate::config::toml_config::TomlConfig;
use crate::config::{normalize_formats, ReportConfig};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "record-reports")]
#[command(about = "Functional queries and reports over student, product, book and employee records")]
pub struct CliConfig {
    /// Dataset source: `builtin`, an http(s) URL, a .json/.toml file or a directory of CSV files
    #[arg(long)]
    pub source: Option<String>,

    /// Directory for written reports
    #[arg(long)]
    pub output_path: Option<String>,

    /// Output formats to write (text, json, csv)
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Bundle all outputs into report.zip
    #[arg(long)]
    pub archive: bool,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Do not print the report to stdout
    #[arg(short, long)]
    pub quiet: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(long, help = "Enable system monitoring (CPU, memory)")]
    pub monitor: bool,
}

impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn resolve(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path);
                ReportConfig::from(TomlConfig::from_file(path)?)
            }
            None => ReportConfig::default(),
        };

        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(output_path) = &self.output_path {
            config.output_path = output_path.clone();
        }
        let formats = normalize_formats(&self.formats);
        if !formats.is_empty() {
            config.output_formats = formats;
        }
        config.archive |= self.archive;
        config.monitor |= self.monitor;

        Ok(config)
    }
}
