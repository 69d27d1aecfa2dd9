use anyhow::Result;
use httpmock::prelude::*;
use record_reports::{
    LocalStorage, Report, ReportConfig, ReportEngine, ReportError, ReportPipeline, Thresholds,
};
use tempfile::TempDir;

fn config_for(source: String, output_path: &str, formats: &[&str], archive: bool) -> ReportConfig {
    ReportConfig {
        source,
        output_path: output_path.to_string(),
        output_formats: formats.iter().map(|f| f.to_string()).collect(),
        archive,
        thresholds: Thresholds::default(),
        monitor: false,
    }
}

fn engine_for(config: ReportConfig) -> ReportEngine<ReportPipeline<LocalStorage, ReportConfig>> {
    let storage = LocalStorage::new(config.output_path.clone());
    ReportEngine::new(ReportPipeline::new(storage, config))
}

#[tokio::test]
async fn test_end_to_end_builtin_dataset() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = config_for("builtin".to_string(), &output_path, &["text", "json", "csv"], false);
    let summary = engine_for(config).run().await?;

    assert_eq!(summary.written.len(), 3);
    assert!(temp_dir.path().join("report.txt").exists());
    assert!(temp_dir.path().join("summary.csv").exists());

    let json = std::fs::read(temp_dir.path().join("report.json"))?;
    let report: Report = serde_json::from_slice(&json)?;
    assert_eq!(report.students.top[0].name, "Laura Fernandez");
    assert_eq!(report.products.stock_by_category["Alimentos"], 350);
    assert_eq!(report.books.count_by_author["George Orwell"], 2);
    assert_eq!(report.employees.youngest, vec!["Ana Martinez", "Carlos Lopez"]);
    assert_eq!(report.students.passed, summary.report.students.passed);

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_http_source() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let dataset = serde_json::json!({
        "students": [
            {"name": "Ana", "grade": 9.0, "course": "2A"},
            {"name": "Luis", "grade": 6.9, "course": "2B"}
        ],
        "products": [
            {"name": "Tablet", "category": "Electronica", "price": 300.0, "stock": 4}
        ]
    });
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/dataset");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(dataset);
    });

    let config = config_for(server.url("/dataset"), &output_path, &["json"], true);
    let summary = engine_for(config).run().await?;

    api_mock.assert();
    assert_eq!(summary.report.students.passed, vec!["ANA"]);
    assert_eq!(summary.report.products.price_report, "Tablet;300.0");
    assert!(summary.report.books.most_expensive.is_none());
    assert_eq!(summary.report.employees.average_salary, 0.0);

    // 只有壓縮檔
    let zip_path = temp_dir.path().join("report.zip");
    assert!(zip_path.exists());
    assert!(!temp_dir.path().join("report.json").exists());

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(std::fs::read(&zip_path)?))?;
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.by_index(0)?.name(), "report.json");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_formats_with_archive() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = config_for("builtin".to_string(), &output_path, &["text", "text"], true);
    let summary = engine_for(config).run().await?;

    assert_eq!(summary.written.len(), 1);
    let zip_path = temp_dir.path().join("report.zip");
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(std::fs::read(&zip_path)?))?;
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.by_index(0)?.name(), "report.txt");

    Ok(())
}

#[tokio::test]
async fn test_http_source_failure_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/failed");
        then.status(500);
    });

    let config = config_for(server.url("/failed"), &output_path, &["text"], false);
    let err = engine_for(config).run().await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, ReportError::SourceStatusError { status: 500, .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!temp_dir.path().join("report.txt").exists());

    Ok(())
}

#[tokio::test]
async fn test_csv_directory_source() -> Result<()> {
    let data_dir = TempDir::new()?;
    std::fs::write(
        data_dir.path().join("employees.csv"),
        "name,department,salary,age\nAna,IT,2500,31\nLuis,IT,1900,22\nMarta,Ventas,4100,27\n",
    )?;
    std::fs::write(
        data_dir.path().join("books.csv"),
        "title,author,pages,price\nDune,Frank Herbert,412,30.5\nIkigai,Hector Garcia,208,18\n",
    )?;

    let out_dir = TempDir::new()?;
    let config = config_for(
        data_dir.path().to_str().unwrap().to_string(),
        out_dir.path().to_str().unwrap(),
        &[],
        false,
    );
    let summary = engine_for(config).run().await?;

    assert!(summary.written.is_empty());
    let employees = &summary.report.employees;
    let names: Vec<&str> = employees.high_salary.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Marta", "Ana"]);
    assert_eq!(employees.youngest, vec!["Luis", "Marta"]);
    assert_eq!(summary.report.books.long_titles, vec!["Dune"]);
    assert!(summary.report.students.by_course.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_invalid_record_stops_run() -> Result<()> {
    let data_dir = TempDir::new()?;
    let dataset_path = data_dir.path().join("records.json");
    std::fs::write(
        &dataset_path,
        r#"{"products": [{"name": "Broken", "category": "X", "price": -5.0, "stock": 1}]}"#,
    )?;

    let out_dir = TempDir::new()?;
    let config = config_for(
        dataset_path.to_str().unwrap().to_string(),
        out_dir.path().to_str().unwrap(),
        &["text"],
        false,
    );
    let err = engine_for(config).run().await.unwrap_err();

    assert!(matches!(
        err,
        ReportError::InvalidRecordError { ref entity, index: 0, .. } if entity == "product"
    ));
    Ok(())
}
