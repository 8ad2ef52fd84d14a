//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::{Claims, IssuedToken, Principal, ROLE_USER};
use crate::domain::value_objects::RegistrationCandidate;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::credentials::CredentialVerifier;
use crate::services::token::TokenCodec;

use super::config::AuthServiceConfig;

/// Token lifecycle manager: login, refresh, logout and revocation
///
/// Holds no per-token state. A token is invalidated by moving the
/// principal's revocation counter past the value embedded in it, and every
/// such move goes through the directory's atomic update.
pub struct AuthService<U, C>
where
    U: UserRepository,
    C: CredentialVerifier,
{
    /// User directory
    user_repository: Arc<U>,
    /// Password verification and hashing
    credentials: Arc<C>,
    /// Token signing and verification
    codec: Arc<TokenCodec>,
    /// Service configuration
    config: AuthServiceConfig,
}

/// Result of checking a presented token against the directory
struct PresentedToken {
    claims: Claims,
    principal: Principal,
}

fn invalid_token() -> DomainError {
    DomainError::Token(TokenError::InvalidToken)
}

impl<U, C> AuthService<U, C>
where
    U: UserRepository,
    C: CredentialVerifier,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - User directory holding principals and counters
    /// * `credentials` - Verifier for username/password pairs
    /// * `codec` - Token codec built from the process-wide signing key
    /// * `config` - Revocation counter policy
    pub fn new(
        user_repository: Arc<U>,
        credentials: Arc<C>,
        codec: Arc<TokenCodec>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            credentials,
            codec,
            config,
        }
    }

    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    pub fn config(&self) -> &AuthServiceConfig {
        &self.config
    }

    /// Authenticate with username and password and issue a token
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Token embedding the principal's current counter and roles
    /// * `Err(AuthError::AuthenticationFailed)` - Unknown user or wrong password,
    ///   indistinguishably
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<IssuedToken> {
        self.login_at(username, password, Utc::now()).await
    }

    /// `login` with an explicit issuance time
    pub async fn login_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<IssuedToken> {
        if !self.credentials.verify(username, password).await? {
            warn!("Login rejected for user: {}", username);
            return Err(AuthError::AuthenticationFailed.into());
        }

        // The principal can vanish between verification and lookup
        let principal = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or(AuthError::AuthenticationFailed)?;

        let token = self.codec.issue(
            &principal.username,
            principal.role_list(),
            principal.token_version,
            now,
        )?;

        info!(
            username = %principal.username,
            token_version = principal.token_version,
            "User logged in"
        );
        Ok(token)
    }

    /// Exchange a valid token for a new one
    ///
    /// With rotation enabled the presented token is consumed: the counter is
    /// moved from the embedded value to the next one, so the old token and any
    /// concurrent refresh of it fail.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - New token carrying the new counter and current roles
    /// * `Err(TokenError::InvalidToken)` - Malformed, bad signature, unknown
    ///   subject, stale counter, or lost a concurrent refresh
    /// * `Err(TokenError::TokenExpired)` - Otherwise valid but past `exp`
    pub async fn refresh(&self, token: &str) -> DomainResult<IssuedToken> {
        self.refresh_at(token, Utc::now()).await
    }

    /// `refresh` evaluated at an explicit time
    pub async fn refresh_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<IssuedToken> {
        let PresentedToken { claims, principal } = self.check_presented(token, now, false).await?;

        let token_version = if self.config.rotate_on_refresh() {
            self.user_repository
                .compare_and_increment_token_version(&claims.sub, claims.token_version)
                .await?
                .ok_or_else(|| {
                    warn!("Concurrent refresh lost for user: {}", claims.sub);
                    invalid_token()
                })?
        } else {
            claims.token_version
        };

        let issued = self
            .codec
            .issue(&principal.username, principal.role_list(), token_version, now)?;

        info!(
            username = %principal.username,
            token_version = token_version,
            "Token refreshed"
        );
        Ok(issued)
    }

    /// Revoke every outstanding token of the presented token's subject
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Counter moved (or left alone when revocation is disabled)
    /// * `Err(TokenError::InvalidToken)` - Malformed, bad signature, unknown
    ///   subject, or stale counter
    /// * `Err(TokenError::TokenExpired)` - Past `exp` and expired logout is not accepted
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        self.logout_at(token, Utc::now()).await
    }

    /// `logout` evaluated at an explicit time
    pub async fn logout_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<()> {
        let PresentedToken { claims, .. } = self
            .check_presented(token, now, self.config.logout_accepts_expired())
            .await?;

        if self.config.revoke_on_logout() {
            let token_version = self
                .user_repository
                .compare_and_increment_token_version(&claims.sub, claims.token_version)
                .await?
                .ok_or_else(invalid_token)?;

            info!(
                username = %claims.sub,
                token_version = token_version,
                "User logged out, outstanding tokens revoked"
            );
        } else {
            debug!("Logout without revocation for user: {}", claims.sub);
        }

        Ok(())
    }

    /// Register a new principal with the USER role
    ///
    /// # Returns
    ///
    /// * `Ok(Principal)` - The stored principal, counter at zero
    /// * `Err(ValidationError)` - Missing field or malformed email
    /// * `Err(AuthError::UsernameTaken)` - Checked before the email
    /// * `Err(AuthError::EmailTaken)`
    pub async fn register(&self, candidate: RegistrationCandidate) -> DomainResult<Principal> {
        candidate.validate()?;

        let username = candidate.username.trim().to_string();
        let email = candidate.email.trim().to_string();

        if self.user_repository.exists_by_username(&username).await? {
            return Err(AuthError::UsernameTaken.into());
        }
        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = self.credentials.hash_password(&candidate.password).await?;
        let principal = Principal::new(username, email, password_hash)
            .with_name(candidate.first_name, candidate.last_name)
            .with_role(ROLE_USER);

        // The directory re-checks both constraints atomically on insert
        let created = self.user_repository.create(principal).await?;

        info!("User registered: {}", created.username);
        Ok(created)
    }

    /// Change a password and revoke every outstanding token
    ///
    /// # Returns
    ///
    /// * `Ok(())` - New hash stored and counter incremented in one store operation
    /// * `Err(AuthError::AuthenticationFailed)` - Current password is wrong
    /// * `Err(ValidationError::RequiredField)` - New password is empty
    pub async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "new_password".to_string(),
            }
            .into());
        }

        if !self.credentials.verify(username, current_password).await? {
            warn!("Password change rejected for user: {}", username);
            return Err(AuthError::AuthenticationFailed.into());
        }

        let password_hash = self.credentials.hash_password(new_password).await?;
        let token_version = self
            .user_repository
            .update_password(username, &password_hash)
            .await?;

        info!(
            username = %username,
            token_version = token_version,
            "Password changed, outstanding tokens revoked"
        );
        Ok(())
    }

    /// Revoke every outstanding token of a user unconditionally
    ///
    /// # Returns
    ///
    /// * `Ok(new_version)` - Counter after the increment
    /// * `Err(AuthError::UserNotFound)` - Unknown username
    pub async fn revoke_all(&self, username: &str) -> DomainResult<u64> {
        let token_version = self
            .user_repository
            .increment_token_version(username)
            .await?;

        info!(
            username = %username,
            token_version = token_version,
            "All tokens revoked"
        );
        Ok(token_version)
    }

    /// Look up a principal by username
    pub async fn get_principal(&self, username: &str) -> DomainResult<Principal> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Shared precondition of refresh and logout
    ///
    /// Every failure except expiry is reported as `InvalidToken`.
    async fn check_presented(
        &self,
        token: &str,
        now: DateTime<Utc>,
        accept_expired: bool,
    ) -> DomainResult<PresentedToken> {
        let claims = self.codec.decode(token).map_err(|e| {
            debug!("Presented token failed to decode: {}", e);
            invalid_token()
        })?;

        let principal = self
            .user_repository
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!("Presented token names unknown user: {}", claims.sub);
                invalid_token()
            })?;

        if principal.token_version != claims.token_version {
            warn!(
                username = %claims.sub,
                presented = claims.token_version,
                current = principal.token_version,
                "Presented token has been revoked"
            );
            return Err(invalid_token());
        }

        if !accept_expired && claims.is_expired_at(now) {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(PresentedToken { claims, principal })
    }
}
