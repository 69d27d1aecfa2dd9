use crate::domain::model::Report;
use crate::domain::services::{format_decimal, format_fixed, Thresholds};
use std::fmt;

const WIDTH: usize = 70;

/// Human readable rendering of a [`Report`], printed by the CLI and written as `report.txt`.
pub struct TextReport<'a> {
    report: &'a Report,
    thresholds: &'a Thresholds,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a Report, thresholds: &'a Thresholds) -> Self {
        Self { report, thresholds }
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", "-".repeat(WIDTH))?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(WIDTH))
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let t = self.thresholds;

        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f, "RECORD REPORTS - FUNCTIONAL QUERIES OVER COLLECTIONS")?;
        writeln!(f, "{}", "=".repeat(WIDTH))?;

        // 案例 1: 學生
        section(f, "CASE 1: STUDENTS")?;
        writeln!(
            f,
            "\n1. Passed students (grade >= {}), upper-cased and sorted:",
            format_decimal(t.passing_grade)
        )?;
        for name in &r.students.passed {
            writeln!(f, "   - {}", name)?;
        }
        writeln!(f, "\n2. Average grade:")?;
        writeln!(f, "   Average: {}", format_fixed(r.students.average_grade, 2))?;
        writeln!(f, "\n3. Students grouped by course:")?;
        for (course, students) in &r.students.by_course {
            writeln!(f, "   Course {}: {} students", course, students.len())?;
            for s in students {
                writeln!(f, "      - {} ({})", s.name, format_fixed(s.grade, 1))?;
            }
        }
        writeln!(f, "\n4. Top {} grades:", t.top_students)?;
        for (i, s) in r.students.top.iter().enumerate() {
            writeln!(
                f,
                "   {}. {} - Grade: {}",
                i + 1,
                s.name,
                format_fixed(s.grade, 1)
            )?;
        }

        // 案例 2: 產品
        section(f, "CASE 2: PRODUCTS")?;
        writeln!(
            f,
            "\n1. Products priced above ${} (most expensive first):",
            format_decimal(t.expensive_price)
        )?;
        for p in &r.products.expensive {
            writeln!(f, "   - {}: ${}", p.name, format_fixed(p.price, 2))?;
        }
        writeln!(f, "\n2. Total stock by category:")?;
        for (category, stock) in &r.products.stock_by_category {
            writeln!(f, "   {}: {} units", category, stock)?;
        }
        writeln!(f, "\n3. Product report (name;price):")?;
        writeln!(f, "   {}", r.products.price_report)?;
        writeln!(f, "\n4. Average price:")?;
        writeln!(f, "   ${}", format_fixed(r.products.average_price, 2))?;
        writeln!(f, "\n5. Average price by category:")?;
        for (category, avg) in &r.products.average_price_by_category {
            writeln!(f, "   {}: ${}", category, format_fixed(*avg, 2))?;
        }

        // 案例 3: 書籍
        section(f, "CASE 3: BOOKS")?;
        writeln!(
            f,
            "\n1. Books over {} pages (alphabetical):",
            t.long_book_pages
        )?;
        for title in &r.books.long_titles {
            writeln!(f, "   - {}", title)?;
        }
        writeln!(f, "\n2. Average pages:")?;
        writeln!(f, "   {} pages", format_fixed(r.books.average_pages, 0))?;
        writeln!(f, "\n3. Books per author:")?;
        for (author, count) in &r.books.count_by_author {
            writeln!(f, "   {}: {} book(s)", author, count)?;
        }
        writeln!(f, "\n4. Most expensive book:")?;
        match &r.books.most_expensive {
            Some(b) => writeln!(
                f,
                "   {} - ${} ({} pages)",
                b.title,
                format_fixed(b.price, 2),
                b.pages
            )?,
            None => writeln!(f, "   (no books)")?,
        }

        // 案例 4: 員工
        section(f, "CASE 4: EMPLOYEES")?;
        writeln!(
            f,
            "\n1. Employees earning above ${} (highest first):",
            format_decimal(t.high_salary)
        )?;
        for e in &r.employees.high_salary {
            writeln!(
                f,
                "   - {} ({}): ${}",
                e.name,
                e.department,
                format_fixed(e.salary, 2)
            )?;
        }
        writeln!(f, "\n2. Average salary:")?;
        writeln!(f, "   ${}", format_fixed(r.employees.average_salary, 2))?;
        writeln!(f, "\n3. Total salary by department:")?;
        for (department, total) in &r.employees.salary_by_department {
            writeln!(f, "   {}: ${}", department, format_fixed(*total, 2))?;
        }
        writeln!(f, "\n4. The {} youngest employees:", t.youngest_employees)?;
        for (i, name) in r.employees.youngest.iter().enumerate() {
            writeln!(f, "   {}. {}", i + 1, name)?;
        }

        writeln!(f, "\n{}", "=".repeat(WIDTH))?;
        writeln!(
            f,
            "Generated at {}",
            r.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f, "{}", "=".repeat(WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::build_report;
    use crate::core::source::builtin_dataset;
    use crate::domain::model::{Book, Dataset, Student};

    #[test]
    fn test_render_builtin_sections() {
        let thresholds = Thresholds::default();
        let report = build_report(&builtin_dataset(), &thresholds);
        let text = TextReport::new(&report, &thresholds).to_string();

        assert!(text.starts_with(&"=".repeat(70)));
        assert!(text.contains("CASE 1: STUDENTS"));
        assert!(text.contains("CASE 4: EMPLOYEES"));
        assert!(text.contains("   - ANA MARTINEZ"));
        assert!(text.contains("   Average: 7.75"));
        assert!(text.contains("   1. Laura Fernandez - Grade: 9.5"));
        assert!(text.contains("   - Laptop: $1200.00"));
        assert!(text.contains("   Electronica: 85 units"));
        assert!(text.contains("   Laptop;1200.0;Mouse;25.0;"));
        assert!(text.contains("   George Orwell: 2 book(s)"));
        assert!(text.contains("   El Senor de los Anillos - $80.00 (1178 pages)"));
        assert!(text.contains("   IT: $10900.00"));
        assert!(text.contains("   1. Ana Martinez\n   2. Carlos Lopez"));
    }

    #[test]
    fn test_render_empty_dataset() {
        let thresholds = Thresholds::default();
        let report = build_report(&Dataset::default(), &thresholds);
        let text = TextReport::new(&report, &thresholds).to_string();

        assert!(text.contains("   Average: 0.00"));
        assert!(text.contains("   (no books)"));
    }

    #[test]
    fn test_render_rounds_halves_up() {
        let thresholds = Thresholds::default();
        let dataset = Dataset {
            students: vec![
                Student::new("Ana", 8.25, "1A"),
                Student::new("Bo", 0.125, "1B"),
            ],
            books: vec![
                Book::new("Short", "Someone", 2, 10.0),
                Book::new("Shorter", "Someone", 3, 4.5),
            ],
            ..Dataset::default()
        };
        let report = build_report(&dataset, &thresholds);
        let text = TextReport::new(&report, &thresholds).to_string();

        assert!(text.contains("      - Ana (8.3)"));
        assert!(text.contains("      - Bo (0.1)"));
        assert!(text.contains("   1. Ana - Grade: 8.3"));
        assert!(text.contains("   Average: 4.19"));
        assert!(text.contains("   3 pages"));
    }
}
