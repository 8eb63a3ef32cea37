use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};

/// Profile row that must exist before a user can log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    display_name: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a profile, deriving a display name when none is given.
    ///
    /// Fallback order: explicit name, the local part of the email, `"User"`.
    pub fn new(
        id: UserId,
        email: String,
        display_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(DomainError::Validation("Email cannot be empty".to_string()));
        }

        let display_name = display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .or_else(|| {
                email
                    .split('@')
                    .next()
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "User".to_string());

        Ok(Self {
            id,
            email,
            display_name,
            created_at,
        })
    }

    pub fn restore(
        id: UserId,
        email: String,
        display_name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
