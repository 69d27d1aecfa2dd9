use crate::core::{Pipeline, Report};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Result of one engine run: the computed report and every path written.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: Report,
    pub written: Vec<String>,
}

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting report run");
        self.monitor.log_stats("Start");

        // Extract
        let dataset = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", dataset.total_records());
        self.monitor.log_stats("Extract");

        // Transform
        let report = self.pipeline.transform(dataset).await?;
        tracing::info!(
            "Computed reports: {} passed students, {} expensive products, {} long books, {} high salaries",
            report.students.passed.len(),
            report.products.expensive.len(),
            report.books.long_titles.len(),
            report.employees.high_salary.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let written = self.pipeline.load(&report).await?;
        for path in &written {
            tracing::info!("Output saved to: {}", path);
        }
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunSummary { report, written })
    }
}
