use crate::core::render::TextReport;
use crate::core::source::DatasetSource;
use crate::core::{ConfigProvider, Dataset, Pipeline, Report, Storage};
use crate::domain::services::{format_decimal, Thresholds};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use reqwest::Client;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const TEXT_FILE: &str = "report.txt";
pub const JSON_FILE: &str = "report.json";
pub const CSV_FILE: &str = "summary.csv";
pub const ARCHIVE_FILE: &str = "report.zip";

pub const FORMATS: [&str; 3] = ["text", "json", "csv"];

/// Runs every query of the four services over a dataset.
pub fn build_report(dataset: &Dataset, thresholds: &Thresholds) -> Report {
    Report {
        generated_at: chrono::Utc::now(),
        students: thresholds.student_service().report(&dataset.students),
        products: thresholds.product_service().report(&dataset.products),
        books: thresholds.book_service().report(&dataset.books),
        employees: thresholds.employee_service().report(&dataset.employees),
    }
}

fn row<W: Write>(
    writer: &mut csv::Writer<W>,
    case: &str,
    metric: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    writer.write_record([case, metric, key, value])?;
    Ok(())
}

/// Long-format `case,metric,key,value` rows of every aggregate in the report.
pub fn summary_csv(report: &Report) -> Result<String> {
    let mut w = csv::Writer::from_writer(Vec::new());
    row(&mut w, "case", "metric", "key", "value")?;

    let s = &report.students;
    for (i, name) in s.passed.iter().enumerate() {
        row(&mut w, "students", "passed", &(i + 1).to_string(), name)?;
    }
    row(&mut w, "students", "average_grade", "", &format_decimal(s.average_grade))?;
    for (course, students) in &s.by_course {
        row(&mut w, "students", "course_size", course, &students.len().to_string())?;
    }
    for (i, student) in s.top.iter().enumerate() {
        row(&mut w, "students", "top", &(i + 1).to_string(), &student.name)?;
    }

    let p = &report.products;
    for product in &p.expensive {
        row(&mut w, "products", "expensive", &product.name, &format_decimal(product.price))?;
    }
    for (category, stock) in &p.stock_by_category {
        row(&mut w, "products", "stock_by_category", category, &stock.to_string())?;
    }
    row(&mut w, "products", "average_price", "", &format_decimal(p.average_price))?;
    for (category, avg) in &p.average_price_by_category {
        row(&mut w, "products", "average_price_by_category", category, &format_decimal(*avg))?;
    }

    let b = &report.books;
    for (i, title) in b.long_titles.iter().enumerate() {
        row(&mut w, "books", "long_title", &(i + 1).to_string(), title)?;
    }
    row(&mut w, "books", "average_pages", "", &format_decimal(b.average_pages))?;
    for (author, count) in &b.count_by_author {
        row(&mut w, "books", "count_by_author", author, &count.to_string())?;
    }
    if let Some(book) = &b.most_expensive {
        row(&mut w, "books", "most_expensive", &book.title, &format_decimal(book.price))?;
    }

    let e = &report.employees;
    for employee in &e.high_salary {
        row(&mut w, "employees", "high_salary", &employee.name, &format_decimal(employee.salary))?;
    }
    row(&mut w, "employees", "average_salary", "", &format_decimal(e.average_salary))?;
    for (department, total) in &e.salary_by_department {
        row(&mut w, "employees", "salary_by_department", department, &format_decimal(*total))?;
    }
    for (i, name) in e.youngest.iter().enumerate() {
        row(&mut w, "employees", "youngest", &(i + 1).to_string(), name)?;
    }

    let bytes = w
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    /// 依設定的格式產生 (檔名, 內容) 列表
    fn render_outputs(&self, report: &Report) -> Result<Vec<(&'static str, Vec<u8>)>> {
        let mut outputs: Vec<(&'static str, Vec<u8>)> = Vec::new();
        for format in self.config.output_formats() {
            let name = match format.trim() {
                "text" => TEXT_FILE,
                "json" => JSON_FILE,
                "csv" => CSV_FILE,
                other => {
                    tracing::warn!("Skipping unknown output format: {}", other);
                    continue;
                }
            };
            // 每種格式只輸出一次
            if outputs.iter().any(|(existing, _)| *existing == name) {
                tracing::debug!("Skipping duplicate output format: {}", format);
                continue;
            }

            let data = match name {
                TEXT_FILE => TextReport::new(report, self.config.thresholds())
                    .to_string()
                    .into_bytes(),
                JSON_FILE => serde_json::to_string_pretty(report)?.into_bytes(),
                _ => summary_csv(report)?.into_bytes(),
            };
            outputs.push((name, data));
        }
        Ok(outputs)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        let source = DatasetSource::parse(self.config.source())?;
        tracing::debug!("Loading dataset from: {}", source);

        let dataset = source.load(&self.client).await?;
        dataset.validate()?;

        tracing::info!(
            "Loaded {} students, {} products, {} books, {} employees",
            dataset.students.len(),
            dataset.products.len(),
            dataset.books.len(),
            dataset.employees.len()
        );
        Ok(dataset)
    }

    async fn transform(&self, data: Dataset) -> Result<Report> {
        Ok(build_report(&data, self.config.thresholds()))
    }

    async fn load(&self, report: &Report) -> Result<Vec<String>> {
        let outputs = self.render_outputs(report)?;
        if outputs.is_empty() {
            tracing::debug!("No output formats configured, nothing written");
            return Ok(Vec::new());
        }

        let base = self.config.output_path().trim_end_matches('/');

        if self.config.archive() {
            tracing::debug!("Creating ZIP file with {} files", outputs.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &outputs {
                    zip.start_file(*name, SimpleFileOptions::default())?;
                    zip.write_all(data)?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(ARCHIVE_FILE, &zip_data).await?;
            return Ok(vec![format!("{}/{}", base, ARCHIVE_FILE)]);
        }

        let mut written = Vec::with_capacity(outputs.len());
        for (name, data) in outputs {
            self.storage.write_file(name, &data).await?;
            written.push(format!("{}/{}", base, name));
        }
        Ok(written)
    }
}
