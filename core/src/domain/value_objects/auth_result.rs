//! Outcome of authenticating an inbound bearer credential

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Principal;

/// Reason a bearer credential was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// No `Bearer ` credential, or the token is structurally invalid
    Malformed,
    /// The signature does not verify against the configured key
    SignatureInvalid,
    /// `now >= exp`
    Expired,
    /// The embedded revocation counter no longer matches the principal's
    RevocationMismatch,
    /// The token's subject is not in the user directory
    UserNotFound,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Malformed => "MALFORMED",
            RejectReason::SignatureInvalid => "SIGNATURE_INVALID",
            RejectReason::Expired => "EXPIRED",
            RejectReason::RevocationMismatch => "REVOCATION_MISMATCH",
            RejectReason::UserNotFound => "USER_NOT_FOUND",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `RequestAuthenticator::authenticate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    /// Every check passed. Roles come from the token, not the directory.
    Authenticated {
        principal: Principal,
        roles: Vec<String>,
    },
    Rejected(RejectReason),
}

impl AuthResult {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthResult::Authenticated { .. })
    }

    /// Rejection reason, if any
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            AuthResult::Rejected(reason) => Some(*reason),
            AuthResult::Authenticated { .. } => None,
        }
    }

    /// Authenticated principal, if any
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthResult::Authenticated { principal, .. } => Some(principal),
            AuthResult::Rejected(_) => None,
        }
    }
}

impl From<RejectReason> for AuthResult {
    fn from(reason: RejectReason) -> Self {
        AuthResult::Rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_helpers() {
        let result: AuthResult = RejectReason::Expired.into();

        assert!(!result.is_authenticated());
        assert_eq!(result.reason(), Some(RejectReason::Expired));
        assert!(result.principal().is_none());
    }

    #[test]
    fn test_authenticated_helpers() {
        let principal = Principal::new("user", "user@example.com", "hash");
        let result = AuthResult::Authenticated {
            principal: principal.clone(),
            roles: vec!["USER".to_string()],
        };

        assert!(result.is_authenticated());
        assert_eq!(result.reason(), None);
        assert_eq!(result.principal(), Some(&principal));
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(RejectReason::RevocationMismatch.to_string(), "REVOCATION_MISMATCH");
        assert_eq!(
            serde_json::to_value(RejectReason::SignatureInvalid).unwrap(),
            "SIGNATURE_INVALID"
        );
    }
}
