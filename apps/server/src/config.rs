//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `ladle-server` starts a working development instance.
//!
//! ## Variables
//! ```text
//! LADLE_PORT                   HTTP port                   (default 8080)
//! LADLE_DB_PATH                SQLite file path            (default: platform data dir)
//! LADLE_SESSION_SECRET         HS256 signing secret        (dev default, set in production)
//! LADLE_SESSION_LIFETIME_SECS  Session token lifetime      (default 28800 = 8h)
//! LADLE_ADMIN_NAME / _EMAIL / _PASSWORD      admin login
//! LADLE_MANAGER_NAME / _EMAIL / _PASSWORD    manager login
//! LADLE_LOG                    tracing filter directives   (default info,ladle_server=debug,ladle_db=debug,sqlx=warn)
//! ```

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use ladle_core::EmployeeRole;

/// A configured login: one of the two accounts that can open a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file path
    pub database_path: PathBuf,

    /// Secret key for signing session tokens
    pub session_secret: String,

    /// Session token lifetime in seconds
    pub session_lifetime_secs: i64,

    /// The admin login (company and employee management)
    pub admin: Principal,

    /// The manager login (orders, drafts, reports)
    pub manager: Principal,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("LADLE_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LADLE_PORT".to_string()))?,

            database_path: match env::var("LADLE_DB_PATH") {
                Ok(path) => PathBuf::from(path),
                Err(_) => default_database_path()?,
            },

            session_secret: env::var("LADLE_SESSION_SECRET")
                .unwrap_or_else(|_| {
                    // Development fallback; production deployments must set this
                    "ladle-dev-secret-change-in-production".to_string()
                }),

            session_lifetime_secs: env::var("LADLE_SESSION_LIFETIME_SECS")
                .unwrap_or_else(|_| "28800".to_string()) // 8 hours
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("LADLE_SESSION_LIFETIME_SECS".to_string())
                })?,

            admin: Principal {
                name: env::var("LADLE_ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string()),
                email: env::var("LADLE_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@ladle.local".to_string()),
                password: env::var("LADLE_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string()),
            },

            manager: Principal {
                name: env::var("LADLE_MANAGER_NAME").unwrap_or_else(|_| "Manager".to_string()),
                email: env::var("LADLE_MANAGER_EMAIL")
                    .unwrap_or_else(|_| "manager@ladle.local".to_string()),
                password: env::var("LADLE_MANAGER_PASSWORD")
                    .unwrap_or_else(|_| "manager".to_string()),
            },
        };

        Ok(config)
    }

    /// Looks up the login matching an email (case-insensitive) and the role
    /// it carries. Staff have no login; only these two principals do.
    pub fn find_principal(&self, email: &str) -> Option<(&Principal, EmployeeRole)> {
        let email = email.trim();
        if self.admin.email.eq_ignore_ascii_case(email) {
            Some((&self.admin, EmployeeRole::Admin))
        } else if self.manager.email.eq_ignore_ascii_case(email) {
            Some((&self.manager, EmployeeRole::Manager))
        } else {
            None
        }
    }
}

/// Default database location in the platform app-data directory.
///
/// - **macOS**: `~/Library/Application Support/com.ladle.ladle/ladle.db`
/// - **Windows**: `%APPDATA%\ladle\ladle\ladle.db`
/// - **Linux**: `~/.local/share/ladle/ladle.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "ladle", "ladle")
        .ok_or_else(|| ConfigError::DataDir("no home directory".to_string()))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;

    Ok(data_dir.join("ladle.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not prepare the data directory: {0}")]
    DataDir(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            port: 8080,
            database_path: PathBuf::from("/tmp/ladle-test.db"),
            session_secret: "test-secret".to_string(),
            session_lifetime_secs: 3600,
            admin: Principal {
                name: "Admin".to_string(),
                email: "admin@ladle.local".to_string(),
                password: "admin".to_string(),
            },
            manager: Principal {
                name: "Manager".to_string(),
                email: "manager@ladle.local".to_string(),
                password: "manager".to_string(),
            },
        }
    }

    #[test]
    fn test_find_principal_roles() {
        let config = test_config();

        let (principal, role) = config.find_principal("admin@ladle.local").unwrap();
        assert_eq!(principal.name, "Admin");
        assert_eq!(role, EmployeeRole::Admin);

        let (_, role) = config.find_principal("manager@ladle.local").unwrap();
        assert_eq!(role, EmployeeRole::Manager);

        assert!(config.find_principal("nobody@ladle.local").is_none());
    }

    #[test]
    fn test_find_principal_ignores_case_and_whitespace() {
        let config = test_config();

        let (_, role) = config.find_principal("  ADMIN@Ladle.LOCAL  ").unwrap();
        assert_eq!(role, EmployeeRole::Admin);
    }
}
