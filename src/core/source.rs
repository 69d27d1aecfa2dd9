use crate::domain::model::{Book, Dataset, Employee, Product, Student};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_range, validate_url, Validate,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};

pub const BUILTIN: &str = "builtin";

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Builtin,
    Url(String),
    JsonFile(PathBuf),
    TomlFile(PathBuf),
    /// Directory holding `students.csv`, `products.csv`, `books.csv`, `employees.csv`.
    CsvDirectory(PathBuf),
}

impl DatasetSource {
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() || spec.eq_ignore_ascii_case(BUILTIN) {
            return Ok(DatasetSource::Builtin);
        }

        if spec.starts_with("http://") || spec.starts_with("https://") {
            validate_url("source", spec)?;
            return Ok(DatasetSource::Url(spec.to_string()));
        }

        let path = PathBuf::from(spec);
        if path.is_dir() {
            return Ok(DatasetSource::CsvDirectory(path));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(DatasetSource::JsonFile(path)),
            Some("toml") => Ok(DatasetSource::TomlFile(path)),
            _ => Err(ReportError::UnsupportedSource {
                source_spec: spec.to_string(),
            }),
        }
    }

    pub async fn load(&self, client: &Client) -> Result<Dataset> {
        match self {
            DatasetSource::Builtin => Ok(builtin_dataset()),
            DatasetSource::Url(url) => fetch_dataset(client, url).await,
            DatasetSource::JsonFile(path) => {
                let bytes = tokio::fs::read(path).await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            DatasetSource::TomlFile(path) => {
                let content = tokio::fs::read_to_string(path).await?;
                Ok(toml::from_str(&content)?)
            }
            DatasetSource::CsvDirectory(dir) => Ok(Dataset {
                students: read_csv(&dir.join("students.csv")).await?,
                products: read_csv(&dir.join("products.csv")).await?,
                books: read_csv(&dir.join("books.csv")).await?,
                employees: read_csv(&dir.join("employees.csv")).await?,
            }),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Builtin => write!(f, "{}", BUILTIN),
            DatasetSource::Url(url) => write!(f, "{}", url),
            DatasetSource::JsonFile(path)
            | DatasetSource::TomlFile(path)
            | DatasetSource::CsvDirectory(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn fetch_dataset(client: &Client, url: &str) -> Result<Dataset> {
    tracing::debug!("Fetching dataset from: {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    tracing::debug!("Dataset response status: {}", status);

    if !status.is_success() {
        return Err(ReportError::SourceStatusError {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.json::<Dataset>().await?)
}

/// 檔案不存在時回傳空集合
async fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !tokio::fs::try_exists(path).await? {
        tracing::debug!("No CSV file at {}, using empty collection", path.display());
        return Ok(Vec::new());
    }

    let bytes = tokio::fs::read(path).await?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

fn record_check(entity: &str, index: usize, check: Result<()>) -> Result<()> {
    check.map_err(|e| match e {
        ReportError::InvalidConfigValueError { field, reason, .. } => {
            ReportError::InvalidRecordError {
                entity: entity.to_string(),
                index,
                reason: format!("{}: {}", field, reason),
            }
        }
        other => other,
    })
}

impl Validate for Dataset {
    fn validate(&self) -> Result<()> {
        for (i, s) in self.students.iter().enumerate() {
            record_check("student", i, validate_non_empty_string("name", &s.name))?;
            record_check("student", i, validate_non_empty_string("course", &s.course))?;
            record_check("student", i, validate_range("grade", s.grade, 0.0, 10.0))?;
        }
        for (i, p) in self.products.iter().enumerate() {
            record_check("product", i, validate_non_empty_string("name", &p.name))?;
            record_check("product", i, validate_non_empty_string("category", &p.category))?;
            record_check("product", i, validate_non_negative("price", p.price))?;
        }
        for (i, b) in self.books.iter().enumerate() {
            record_check("book", i, validate_non_empty_string("title", &b.title))?;
            record_check("book", i, validate_non_empty_string("author", &b.author))?;
            record_check("book", i, validate_non_negative("price", b.price))?;
        }
        for (i, e) in self.employees.iter().enumerate() {
            record_check("employee", i, validate_non_empty_string("name", &e.name))?;
            record_check("employee", i, validate_non_empty_string("department", &e.department))?;
            record_check("employee", i, validate_non_negative("salary", e.salary))?;
        }
        Ok(())
    }
}

/// The demonstration dataset used when no source is given.
pub fn builtin_dataset() -> Dataset {
    Dataset {
        students: vec![
            Student::new("Juan Perez", 8.5, "1A"),
            Student::new("Maria Garcia", 9.2, "1A"),
            Student::new("Carlos Lopez", 6.5, "1B"),
            Student::new("Ana Martinez", 7.8, "1A"),
            Student::new("Pedro Rodriguez", 5.5, "1B"),
            Student::new("Laura Fernandez", 9.5, "1C"),
            Student::new("Diego Sanchez", 7.0, "1B"),
            Student::new("Sofia Gonzalez", 8.0, "1C"),
        ],
        products: vec![
            Product::new("Laptop", "Electronica", 1200.0, 15),
            Product::new("Mouse", "Electronica", 25.0, 50),
            Product::new("Monitor", "Electronica", 350.0, 20),
            Product::new("Camisa", "Ropa", 45.0, 100),
            Product::new("Zapatos", "Ropa", 120.0, 40),
            Product::new("Arroz", "Alimentos", 15.0, 200),
            Product::new("Aceite", "Alimentos", 30.0, 150),
        ],
        books: vec![
            Book::new("Cien Anos de Soledad", "Gabriel Garcia Marquez", 471, 45.0),
            Book::new("El Principito", "Antoine de Saint-Exupery", 96, 20.0),
            Book::new("Don Quijote", "Miguel de Cervantes", 863, 60.0),
            Book::new("1984", "George Orwell", 328, 35.0),
            Book::new("Rebelion en la Granja", "George Orwell", 144, 25.0),
            Book::new("Harry Potter y la Piedra Filosofal", "J.K. Rowling", 309, 42.0),
            Book::new("El Senor de los Anillos", "J.R.R. Tolkien", 1178, 80.0),
        ],
        employees: vec![
            Employee::new("Juan Perez", "IT", 3500.0, 28),
            Employee::new("Maria Garcia", "IT", 4200.0, 32),
            Employee::new("Carlos Lopez", "Ventas", 2800.0, 25),
            Employee::new("Ana Martinez", "Ventas", 1800.0, 23),
            Employee::new("Pedro Rodriguez", "RRHH", 3000.0, 35),
            Employee::new("Laura Fernandez", "Finanzas", 3800.0, 29),
            Employee::new("Diego Sanchez", "IT", 3200.0, 26),
            Employee::new("Sofia Gonzalez", "Ventas", 2500.0, 30),
        ],
    }
}
