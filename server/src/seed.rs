//! Sample employees for local development.

use chrono::{TimeZone, Utc};
use tracing::info;

use crate::employee::{Employee, EmployeeUseCase, RepositoryError};

/// Inserts the sample roster through `employees` and returns the stored rows.
pub async fn seed_employees(
    employees: &dyn EmployeeUseCase,
) -> Result<Vec<Employee>, RepositoryError> {
    let mut created = Vec::new();
    for employee in sample_employees() {
        let employee = employees.create_employee(employee).await?;
        info!(id = employee.id, email = %employee.email, "seeded employee");
        created.push(employee);
    }
    Ok(created)
}

fn sample_employees() -> Vec<Employee> {
    let hired = Utc
        .with_ymd_and_hms(2023, 12, 16, 0, 0, 0)
        .single()
        .unwrap_or_default();
    [
        ("Rama", "Widhiantito", "rama.widhiantito@gmail.com"),
        ("John", "Doe", "john.doe@example.com"),
        ("Jane", "Smith", "jane.smith@example.com"),
    ]
    .into_iter()
    .map(|(first, last, email)| Employee {
        id: 0,
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        hire_date: hired,
    })
    .collect()
}
