use crate::domain::model::{Employee, EmployeeReport};
use crate::domain::services::mean;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeService {
    high_salary_threshold: f64,
    youngest_n: usize,
}

impl Default for EmployeeService {
    fn default() -> Self {
        Self::new(2000.0, 2)
    }
}

impl EmployeeService {
    pub fn new(high_salary_threshold: f64, youngest_n: usize) -> Self {
        Self {
            high_salary_threshold,
            youngest_n,
        }
    }

    pub fn high_salary_sorted(&self, employees: &[Employee]) -> Vec<Employee> {
        let mut high: Vec<Employee> = employees
            .iter()
            .filter(|e| e.salary > self.high_salary_threshold)
            .cloned()
            .collect();
        high.sort_by(|a, b| b.salary.total_cmp(&a.salary));
        high
    }

    pub fn average_salary(&self, employees: &[Employee]) -> f64 {
        mean(employees.iter().map(|e| e.salary))
    }

    pub fn salary_by_department(&self, employees: &[Employee]) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for employee in employees {
            *totals.entry(employee.department.clone()).or_default() += employee.salary;
        }
        totals
    }

    /// Names of the youngest employees, youngest first.
    pub fn youngest_names(&self, employees: &[Employee]) -> Vec<String> {
        let mut by_age: Vec<&Employee> = employees.iter().collect();
        by_age.sort_by_key(|e| e.age);
        by_age
            .into_iter()
            .take(self.youngest_n)
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn report(&self, employees: &[Employee]) -> EmployeeReport {
        EmployeeReport {
            high_salary: self.high_salary_sorted(employees),
            average_salary: self.average_salary(employees),
            salary_by_department: self.salary_by_department(employees),
            youngest: self.youngest_names(employees),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employees() -> Vec<Employee> {
        vec![
            Employee::new("Juan Pérez", "IT", 3500.0, 28),
            Employee::new("María García", "IT", 4200.0, 32),
            Employee::new("Carlos López", "Ventas", 2800.0, 25),
            Employee::new("Ana Martínez", "Ventas", 2500.0, 30),
            Employee::new("Pedro Rodríguez", "RRHH", 3000.0, 35),
            Employee::new("Laura Fernández", "Finanzas", 3800.0, 29),
            Employee::new("Diego Sánchez", "IT", 3200.0, 26),
            Employee::new("Sofia González", "Ventas", 1800.0, 23),
            Employee::new("Lucas Torres", "RRHH", 2700.0, 31),
            Employee::new("Valentina Díaz", "Finanzas", 4500.0, 27),
            Employee::new("Mateo Ruiz", "IT", 2900.0, 24),
            Employee::new("Emma Morales", "Ventas", 2200.0, 33),
        ]
    }

    #[test]
    fn test_high_salary_sorted() {
        let high = EmployeeService::default().high_salary_sorted(&employees());

        assert_eq!(high.len(), 11);
        assert!(high.iter().all(|e| e.salary > 2000.0));
        assert_eq!(high[0].name, "Valentina Díaz");
        assert_eq!(high[1].name, "María García");
        assert_eq!(high[2].name, "Laura Fernández");
        assert!(high.windows(2).all(|w| w[0].salary >= w[1].salary));
        assert!(!high.iter().any(|e| e.name == "Sofia González"));
    }

    #[test]
    fn test_high_salary_ties_keep_input_order() {
        let staff = vec![
            Employee::new("First", "IT", 3000.0, 40),
            Employee::new("Low", "IT", 1500.0, 22),
            Employee::new("Second", "Ventas", 3000.0, 35),
            Employee::new("Top", "Ventas", 5000.0, 50),
            Employee::new("Third", "RRHH", 3000.0, 29),
        ];
        let high = EmployeeService::default().high_salary_sorted(&staff);
        let names: Vec<&str> = high.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn test_average_salary() {
        let service = EmployeeService::default();
        assert!((service.average_salary(&employees()) - 3091.67).abs() < 0.01);
        assert_eq!(service.average_salary(&[]), 0.0);
    }

    #[test]
    fn test_salary_by_department() {
        let totals = EmployeeService::default().salary_by_department(&employees());

        assert_eq!(totals.len(), 4);
        assert!((totals["IT"] - 13800.0).abs() < 0.01);
        assert!((totals["Ventas"] - 9300.0).abs() < 0.01);
        assert!((totals["RRHH"] - 5700.0).abs() < 0.01);
        assert!((totals["Finanzas"] - 8300.0).abs() < 0.01);
    }

    #[test]
    fn test_salary_by_department_small() {
        let staff = vec![
            Employee::new("Emp1", "IT", 1000.0, 25),
            Employee::new("Emp2", "IT", 1500.0, 26),
            Employee::new("Emp3", "Ventas", 2000.0, 27),
        ];
        let totals = EmployeeService::default().salary_by_department(&staff);
        assert!((totals["IT"] - 2500.0).abs() < 0.01);
        assert!((totals["Ventas"] - 2000.0).abs() < 0.01);
    }

    #[test]
    fn test_youngest_names() {
        let youngest = EmployeeService::default().youngest_names(&employees());
        assert_eq!(youngest, vec!["Sofia González", "Mateo Ruiz"]);
    }

    #[test]
    fn test_youngest_ties_keep_input_order() {
        let staff = vec![
            Employee::new("Older", "IT", 2500.0, 40),
            Employee::new("First", "IT", 2100.0, 25),
            Employee::new("Second", "Ventas", 1800.0, 25),
            Employee::new("Third", "RRHH", 1900.0, 25),
        ];
        let youngest = EmployeeService::default().youngest_names(&staff);
        assert_eq!(youngest, vec!["First", "Second"]);

        let all = EmployeeService::new(2000.0, 4).youngest_names(&staff);
        assert_eq!(all, vec!["First", "Second", "Third", "Older"]);
    }

    #[test]
    fn test_youngest_names_single_employee() {
        let staff = vec![Employee::new("Empleado 1", "IT", 3000.0, 30)];
        assert_eq!(
            EmployeeService::default().youngest_names(&staff),
            vec!["Empleado 1"]
        );
    }
}
