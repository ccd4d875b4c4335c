//! Session token module.
//!
//! Handles signed session token generation and validation. Tokens are HS256
//! JWTs carrying the principal's identity and role; the gate middleware
//! validates one per request.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ladle_core::EmployeeRole;

use crate::error::ApiError;

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal email, lowercased)
    pub sub: String,

    /// Display name of the principal
    pub name: String,

    /// Role ("admin" or "manager")
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Session id (unique per login; keys the session's draft)
    pub jti: String,
}

/// Session token manager.
#[derive(Clone)]
pub struct SessionManager {
    secret: String,
    lifetime_secs: i64,
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(secret: String, lifetime_secs: i64) -> Self {
        SessionManager {
            secret,
            lifetime_secs,
        }
    }

    /// Returns the configured token lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Generate a session token for a logged-in principal.
    pub fn issue(&self, email: &str, name: &str, role: EmployeeRole) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: email.trim().to_lowercase(),
            name: name.to_string(),
            role: role_label(role).to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to generate session token: {}", e)))
    }

    /// Validate and decode a session token.
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| ApiError::unauthorized(format!("Invalid session token: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// The role string carried in token claims.
pub fn role_label(role: EmployeeRole) -> &'static str {
    match role {
        EmployeeRole::Admin => "admin",
        EmployeeRole::Manager => "manager",
        EmployeeRole::Staff => "staff",
    }
}

/// The login role named by a claims string. Staff never hold sessions, so
/// only the two login roles parse.
pub fn parse_role(label: &str) -> Option<EmployeeRole> {
    match label {
        "admin" => Some(EmployeeRole::Admin),
        "manager" => Some(EmployeeRole::Manager),
        _ => None,
    }
}

/// Extract bearer token from an authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    if auth_header.starts_with("Bearer ") {
        Some(&auth_header[7..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_roundtrip() {
        let manager = SessionManager::new("test-secret".to_string(), 3600);

        let token = manager
            .issue("Admin@Ladle.local", "Admin", EmployeeRole::Admin)
            .unwrap();

        let claims = manager.validate(&token).unwrap();

        assert_eq!(claims.sub, "admin@ladle.local");
        assert_eq!(claims.name, "Admin");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_each_login_gets_its_own_session_id() {
        let manager = SessionManager::new("test-secret".to_string(), 3600);

        let first = manager
            .issue("manager@ladle.local", "Manager", EmployeeRole::Manager)
            .unwrap();
        let second = manager
            .issue("manager@ladle.local", "Manager", EmployeeRole::Manager)
            .unwrap();

        let first = manager.validate(&first).unwrap();
        let second = manager.validate(&second).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = SessionManager::new("test-secret".to_string(), 3600);
        let other = SessionManager::new("other-secret".to_string(), 3600);

        let token = manager
            .issue("admin@ladle.local", "Admin", EmployeeRole::Admin)
            .unwrap();

        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative lifetime puts exp in the past
        let manager = SessionManager::new("test-secret".to_string(), -120);

        let token = manager
            .issue("admin@ladle.local", "Admin", EmployeeRole::Admin)
            .unwrap();

        assert!(manager.validate(&token).is_err());
    }

    #[test]
    fn test_bearer_extraction() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("bearer abc123"), None);
        assert_eq!(extract_bearer_token("abc123"), None);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(parse_role("admin"), Some(EmployeeRole::Admin));
        assert_eq!(parse_role("manager"), Some(EmployeeRole::Manager));
        assert_eq!(parse_role("staff"), None);
        assert_eq!(role_label(EmployeeRole::Manager), "manager");
    }
}
