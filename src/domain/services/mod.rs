//! Query services over the four record collections.
//!
//! Every service is a small value holding its thresholds; the defaults
//! reproduce the classic report (pass mark 7.0, expensive above 100, long
//! books above 300 pages, high salaries above 2000).

pub mod books;
pub mod employees;
pub mod products;
pub mod students;

pub use books::BookService;
pub use employees::EmployeeService;
pub use products::ProductService;
pub use students::StudentService;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_negative, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub passing_grade: f64,
    pub top_students: usize,
    pub expensive_price: f64,
    pub long_book_pages: u32,
    pub high_salary: f64,
    pub youngest_employees: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            passing_grade: 7.0,
            top_students: 3,
            expensive_price: 100.0,
            long_book_pages: 300,
            high_salary: 2000.0,
            youngest_employees: 2,
        }
    }
}

impl Thresholds {
    pub fn student_service(&self) -> StudentService {
        StudentService::new(self.passing_grade, self.top_students)
    }

    pub fn product_service(&self) -> ProductService {
        ProductService::new(self.expensive_price)
    }

    pub fn book_service(&self) -> BookService {
        BookService::new(self.long_book_pages)
    }

    pub fn employee_service(&self) -> EmployeeService {
        EmployeeService::new(self.high_salary, self.youngest_employees)
    }
}

impl Validate for Thresholds {
    fn validate(&self) -> Result<()> {
        validate_non_negative("thresholds.passing_grade", self.passing_grade)?;
        validate_non_negative("thresholds.expensive_price", self.expensive_price)?;
        validate_non_negative("thresholds.high_salary", self.high_salary)?;
        validate_positive_number("thresholds.top_students", self.top_students, 1)?;
        validate_positive_number("thresholds.youngest_employees", self.youngest_employees, 1)?;
        Ok(())
    }
}

/// Arithmetic mean, `0.0` for an empty input.
pub(crate) fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// 依鍵分組後對每組做平均
pub(crate) fn mean_by_key<'a, T, K, V>(items: &'a [T], key: K, value: V) -> BTreeMap<String, f64>
where
    K: Fn(&'a T) -> &'a str,
    V: Fn(&T) -> f64,
{
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for item in items {
        let entry = acc.entry(key(item).to_string()).or_insert((0.0, 0));
        entry.0 += value(item);
        entry.1 += 1;
    }
    acc.into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect()
}

/// Renders a decimal the way the price report expects: always at least one
/// fractional digit (`1200.0`, `25.0`, `76.5`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Fixed-point rendering with `digits` decimals, rounding halves away from
/// zero (`8.25` -> `8.3`, `2.5` -> `3`). `{:.N}` alone rounds an exact half to even.
pub fn format_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", digits, rounded)
}
