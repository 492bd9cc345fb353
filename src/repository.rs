use sqlx::SqlitePool;

use crate::model::employee::Employee;

const COLUMNS: &str =
    "id, first_name, middle_initial, last_name, date_of_birth, date_of_employment, status";

/// CRUD access to the `employees` table. Status is never used as a filter here.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(&format!("SELECT {COLUMNS} FROM employees ORDER BY id"))
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(&format!("SELECT {COLUMNS} FROM employees WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts when `id` is unset and fills it from the store. Otherwise writes
    /// every column at that id, inserting the row if it does not exist yet.
    pub async fn save(&self, mut employee: Employee) -> Result<Employee, sqlx::Error> {
        match employee.id {
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO employees
                    (first_name, middle_initial, last_name, date_of_birth, date_of_employment, status)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&employee.first_name)
                .bind(employee.middle_initial.to_string())
                .bind(&employee.last_name)
                .bind(employee.date_of_birth)
                .bind(employee.date_of_employment)
                .bind(employee.status.to_string())
                .execute(&self.pool)
                .await?;

                employee.id = Some(result.last_insert_rowid());
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO employees
                    (id, first_name, middle_initial, last_name, date_of_birth, date_of_employment, status)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    ON CONFLICT(id) DO UPDATE SET
                        first_name = excluded.first_name,
                        middle_initial = excluded.middle_initial,
                        last_name = excluded.last_name,
                        date_of_birth = excluded.date_of_birth,
                        date_of_employment = excluded.date_of_employment,
                        status = excluded.status
                    "#,
                )
                .bind(id)
                .bind(&employee.first_name)
                .bind(employee.middle_initial.to_string())
                .bind(&employee.last_name)
                .bind(employee.date_of_birth)
                .bind(employee.date_of_employment)
                .bind(employee.status.to_string())
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(employee)
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await
    }
}
