use crate::domain::model::{Student, StudentReport};
use crate::domain::services::mean;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentService {
    passing_grade: f64,
    top_n: usize,
}

impl Default for StudentService {
    fn default() -> Self {
        Self::new(7.0, 3)
    }
}

impl StudentService {
    pub fn new(passing_grade: f64, top_n: usize) -> Self {
        Self {
            passing_grade,
            top_n,
        }
    }

    /// Upper-cased names of students at or above the passing grade, sorted.
    pub fn passed_names_sorted(&self, students: &[Student]) -> Vec<String> {
        let mut names: Vec<String> = students
            .iter()
            .filter(|s| s.grade >= self.passing_grade)
            .map(|s| s.name.to_uppercase())
            .collect();
        names.sort();
        names
    }

    pub fn average_grade(&self, students: &[Student]) -> f64 {
        mean(students.iter().map(|s| s.grade))
    }

    pub fn group_by_course(&self, students: &[Student]) -> BTreeMap<String, Vec<Student>> {
        let mut groups: BTreeMap<String, Vec<Student>> = BTreeMap::new();
        for student in students {
            groups
                .entry(student.course.clone())
                .or_default()
                .push(student.clone());
        }
        groups
    }

    /// Best `top_n` students by grade, highest first. Ties keep input order.
    pub fn top_grades(&self, students: &[Student]) -> Vec<Student> {
        let mut sorted = students.to_vec();
        sorted.sort_by(|a, b| b.grade.total_cmp(&a.grade));
        sorted.truncate(self.top_n);
        sorted
    }

    pub fn report(&self, students: &[Student]) -> StudentReport {
        StudentReport {
            passed: self.passed_names_sorted(students),
            average_grade: self.average_grade(students),
            by_course: self.group_by_course(students),
            top: self.top_grades(students),
        }
    }
}
