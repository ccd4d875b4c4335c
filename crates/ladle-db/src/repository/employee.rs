//! # Employee Repository
//!
//! Database operations for staff records. Same shape as the company
//! repository: CRUD, substring search, and the email index that feeds
//! duplicate validation.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::company::like_pattern;
use ladle_core::{Employee, RecordStatus};

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Lists all employees ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, phone, role, status, start_date,
                   created_at, updated_at
            FROM employees
            ORDER BY name COLLATE NOCASE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// Searches employees by substring across name and email.
    /// Case-insensitive. An empty query lists everything up to `limit`.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Employee>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching employees");

        if query.is_empty() {
            let employees = sqlx::query_as::<_, Employee>(
                r#"
                SELECT id, name, email, phone, role, status, start_date,
                       created_at, updated_at
                FROM employees
                ORDER BY name COLLATE NOCASE
                LIMIT ?1
                "#,
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
            return Ok(employees);
        }

        let pattern = like_pattern(query);
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, phone, role, status, start_date,
                   created_at, updated_at
            FROM employees
            WHERE name LIKE ?1 ESCAPE '\'
               OR email LIKE ?1 ESCAPE '\'
            ORDER BY name COLLATE NOCASE
            LIMIT ?2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = employees.len(), "Search returned employees");
        Ok(employees)
    }

    /// Gets an employee by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, phone, role, status, start_date,
                   created_at, updated_at
            FROM employees
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Returns `(id, email)` pairs for every employee, for the duplicate
    /// check.
    pub async fn email_index(&self) -> DbResult<Vec<(String, String)>> {
        let pairs = sqlx::query_as::<_, (String, String)>("SELECT id, email FROM employees")
            .fetch_all(&self.pool)
            .await?;

        Ok(pairs)
    }

    /// Inserts a new employee.
    pub async fn insert(&self, employee: &Employee) -> DbResult<Employee> {
        debug!(name = %employee.name, "Inserting employee");

        sqlx::query(
            r#"
            INSERT INTO employees (
                id, name, email, phone, role, status, start_date,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(employee.role)
        .bind(employee.status)
        .bind(employee.start_date)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(employee.clone())
    }

    /// Updates an existing employee.
    pub async fn update(&self, employee: &Employee) -> DbResult<()> {
        debug!(id = %employee.id, "Updating employee");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE employees SET
                name = ?2,
                email = ?3,
                phone = ?4,
                role = ?5,
                status = ?6,
                start_date = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(employee.role)
        .bind(employee.status)
        .bind(employee.start_date)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", &employee.id));
        }

        Ok(())
    }

    /// Sets an employee's active/inactive status.
    pub async fn set_status(&self, id: &str, status: RecordStatus) -> DbResult<()> {
        debug!(id = %id, status = ?status, "Setting employee status");

        let now = Utc::now();

        let result = sqlx::query("UPDATE employees SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }

    /// Deletes an employee.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting employee");

        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        Ok(())
    }

    /// Counts employees (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new employee ID.
pub fn generate_employee_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use ladle_core::EmployeeRole;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn test_employee(name: &str, email: &str, role: EmployeeRole) -> Employee {
        let now = Utc::now();
        Employee {
            id: generate_employee_id(),
            name: name.to_string(),
            email: email.to_string(),
            phone: "555-0102".to_string(),
            role,
            status: RecordStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_get_and_roles_round_trip() {
        let db = test_db().await;
        let repo = db.employees();

        let employee = test_employee("Sam Riley", "sam@kitchen.com", EmployeeRole::Manager);
        repo.insert(&employee).await.unwrap();

        let loaded = repo.get_by_id(&employee.id).await.unwrap().unwrap();
        assert_eq!(loaded.role, EmployeeRole::Manager);
        assert_eq!(loaded.start_date, employee.start_date);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        let repo = db.employees();

        repo.insert(&test_employee("Sam", "sam@kitchen.com", EmployeeRole::Staff))
            .await
            .unwrap();
        let err = repo
            .insert(&test_employee("Sammy", "SAM@KITCHEN.COM", EmployeeRole::Staff))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_search_and_delete() {
        let db = test_db().await;
        let repo = db.employees();

        let sam = test_employee("Sam Riley", "sam@kitchen.com", EmployeeRole::Staff);
        repo.insert(&sam).await.unwrap();
        repo.insert(&test_employee("Dana Wu", "dana@kitchen.com", EmployeeRole::Admin))
            .await
            .unwrap();

        let hits = repo.search("riley", 10).await.unwrap();
        assert_eq!(hits.len(), 1);

        repo.delete(&sam.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
