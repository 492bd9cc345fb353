use chrono::NaiveDate;
use tracing::info;

use crate::model::employee::Employee;
use crate::repository::EmployeeRepository;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid calendar dates")
}

pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new("Marc", 'J', "Christensen", date(1996, 6, 18), date(2022, 1, 15)),
        Employee::new("Bob", 'A', "Smith", date(1980, 5, 10), date(2019, 7, 6)),
        Employee::new("Test", 'C', "Employee", date(1992, 12, 11), date(2018, 4, 1)),
    ]
}

/// Populates an empty store with the sample employees and logs every stored record.
/// A store that already holds employees is left alone.
pub async fn load_database(repository: &EmployeeRepository) -> Result<(), sqlx::Error> {
    let existing = repository.count().await?;
    if existing > 0 {
        info!(existing, "Employee store already populated, skipping preload");
        return Ok(());
    }

    for employee in sample_employees() {
        repository.save(employee).await?;
    }

    for employee in repository.find_all().await? {
        info!("Preloaded {}", employee);
    }

    Ok(())
}
