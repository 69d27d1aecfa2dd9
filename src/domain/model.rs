use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub grade: f64,
    pub course: String,
}

impl Student {
    pub fn new(name: impl Into<String>, grade: f64, course: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grade,
            course: course.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            stock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub pages: u32,
    pub price: f64,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, pages: u32, price: f64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            pages,
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub department: String,
    pub salary: f64,
    pub age: u32,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        salary: f64,
        age: u32,
    ) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            salary,
            age,
        }
    }
}

/// 四種資料集合；缺少的集合視為空
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub students: Vec<Student>,
    pub products: Vec<Product>,
    pub books: Vec<Book>,
    pub employees: Vec<Employee>,
}

impl Dataset {
    pub fn total_records(&self) -> usize {
        self.students.len() + self.products.len() + self.books.len() + self.employees.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub passed: Vec<String>,
    pub average_grade: f64,
    pub by_course: BTreeMap<String, Vec<Student>>,
    pub top: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReport {
    pub expensive: Vec<Product>,
    pub stock_by_category: BTreeMap<String, u64>,
    pub price_report: String,
    pub average_price: f64,
    pub average_price_by_category: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookReport {
    pub long_titles: Vec<String>,
    pub average_pages: f64,
    pub count_by_author: BTreeMap<String, usize>,
    pub most_expensive: Option<Book>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeReport {
    pub high_salary: Vec<Employee>,
    pub average_salary: f64,
    pub salary_by_department: BTreeMap<String, f64>,
    pub youngest: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub students: StudentReport,
    pub products: ProductReport,
    pub books: BookReport,
    pub employees: EmployeeReport,
}
