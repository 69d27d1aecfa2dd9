pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, ReportConfig};

pub use crate::core::{
    engine::{ReportEngine, RunSummary},
    pipeline::ReportPipeline,
    render::TextReport,
    source::DatasetSource,
};
pub use domain::model::{Book, Dataset, Employee, Product, Report, Student};
pub use domain::services::{
    BookService, EmployeeService, ProductService, StudentService, Thresholds,
};
pub use utils::error::{ReportError, Result};
