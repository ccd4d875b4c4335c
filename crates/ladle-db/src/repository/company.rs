//! # Company Repository
//!
//! Database operations for client companies.
//!
//! ## Key Operations
//! - CRUD with hard delete
//! - Substring search across name, contact person, and email
//! - Email index for the application-level duplicate check
//!
//! Search uses LIKE rather than an FTS table: the company catalog is a few
//! hundred rows at most, and LIKE keeps the schema simple.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use ladle_core::{Company, RecordStatus};

/// Repository for company database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CompanyRepository::new(pool);
///
/// let results = repo.search("lakeside", 20).await?;
/// let company = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: SqlitePool,
}

impl CompanyRepository {
    /// Creates a new CompanyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CompanyRepository { pool }
    }

    /// Lists all companies ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, contact_person, email, phone, address,
                   price_per_item_cents, status, created_at, updated_at
            FROM companies
            ORDER BY name COLLATE NOCASE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    /// Searches companies by substring across name, contact person, and
    /// email. Case-insensitive. An empty query lists everything up to
    /// `limit`.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Company>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching companies");

        if query.is_empty() {
            let companies = sqlx::query_as::<_, Company>(
                r#"
                SELECT id, name, contact_person, email, phone, address,
                       price_per_item_cents, status, created_at, updated_at
                FROM companies
                ORDER BY name COLLATE NOCASE
                LIMIT ?1
                "#,
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
            return Ok(companies);
        }

        let pattern = like_pattern(query);
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, contact_person, email, phone, address,
                   price_per_item_cents, status, created_at, updated_at
            FROM companies
            WHERE name LIKE ?1 ESCAPE '\'
               OR contact_person LIKE ?1 ESCAPE '\'
               OR email LIKE ?1 ESCAPE '\'
            ORDER BY name COLLATE NOCASE
            LIMIT ?2
            "#,
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = companies.len(), "Search returned companies");
        Ok(companies)
    }

    /// Gets a company by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Company))` - Company found
    /// * `Ok(None)` - Company not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, contact_person, email, phone, address,
                   price_per_item_cents, status, created_at, updated_at
            FROM companies
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    /// Returns `(id, email)` pairs for every company.
    ///
    /// Feeds the duplicate-email validation, which needs the full set to
    /// compare against while excluding the record being edited.
    pub async fn email_index(&self) -> DbResult<Vec<(String, String)>> {
        let pairs = sqlx::query_as::<_, (String, String)>("SELECT id, email FROM companies")
            .fetch_all(&self.pool)
            .await?;

        Ok(pairs)
    }

    /// Inserts a new company.
    ///
    /// ## Returns
    /// * `Ok(Company)` - The inserted company
    /// * `Err(DbError::UniqueViolation)` - Email already exists
    pub async fn insert(&self, company: &Company) -> DbResult<Company> {
        debug!(name = %company.name, "Inserting company");

        sqlx::query(
            r#"
            INSERT INTO companies (
                id, name, contact_person, email, phone, address,
                price_per_item_cents, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(&company.contact_person)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address)
        .bind(company.price_per_item_cents)
        .bind(company.status)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(company.clone())
    }

    /// Updates an existing company.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Company doesn't exist
    pub async fn update(&self, company: &Company) -> DbResult<()> {
        debug!(id = %company.id, "Updating company");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE companies SET
                name = ?2,
                contact_person = ?3,
                email = ?4,
                phone = ?5,
                address = ?6,
                price_per_item_cents = ?7,
                status = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(&company.contact_person)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address)
        .bind(company.price_per_item_cents)
        .bind(company.status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Company", &company.id));
        }

        Ok(())
    }

    /// Sets a company's active/inactive status.
    pub async fn set_status(&self, id: &str, status: RecordStatus) -> DbResult<()> {
        debug!(id = %id, status = ?status, "Setting company status");

        let now = Utc::now();

        let result = sqlx::query("UPDATE companies SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Company", id));
        }

        Ok(())
    }

    /// Deletes a company.
    ///
    /// Orders keep their own company name snapshot, so history is unaffected.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting company");

        let result = sqlx::query("DELETE FROM companies WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Company", id));
        }

        Ok(())
    }

    /// Counts companies (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Escapes LIKE metacharacters and wraps the query in wildcards, so user
/// input is always a plain substring match.
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Helper to generate a new company ID.
pub fn generate_company_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
