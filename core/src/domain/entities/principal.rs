//! Principal entity: the authoritative user record held by the user directory.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granted to every registered principal
pub const ROLE_USER: &str = "USER";

/// Role granted to administrators
pub const ROLE_ADMIN: &str = "ADMIN";

/// A registered user together with its granted roles and revocation counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier for the principal
    pub id: Uuid,

    /// Username, unique and immutable once created
    pub username: String,

    /// Email address, unique across the directory
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    /// Granted roles
    pub roles: BTreeSet<String>,

    /// Revocation counter. A token is only valid while its embedded copy
    /// equals this value.
    pub token_version: u64,

    /// Timestamp when the principal was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the principal was last updated
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// Creates a new principal with a zero revocation counter
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: None,
            last_name: None,
            roles: BTreeSet::new(),
            token_version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a role, returning the principal for chaining
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Sets first and last name
    pub fn with_name(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Roles as the ordered sequence embedded in tokens
    pub fn role_list(&self) -> Vec<String> {
        self.roles.iter().cloned().collect()
    }

    /// Checks whether the principal holds a role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}
