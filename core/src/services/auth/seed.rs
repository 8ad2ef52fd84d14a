//! Development users

use tracing::info;

use crate::domain::entities::{Principal, ROLE_ADMIN, ROLE_USER};
use crate::errors::DomainResult;
use crate::repositories::UserRepository;
use crate::services::credentials::CredentialVerifier;

/// Password of both development users
pub const DEFAULT_USER_PASSWORD: &str = "password";

/// Insert `admin` (ADMIN) and `user` (USER) unless they already exist
///
/// # Returns
///
/// * `Ok(count)` - Number of principals inserted
pub async fn seed_default_users<U, C>(users: &U, credentials: &C) -> DomainResult<usize>
where
    U: UserRepository,
    C: CredentialVerifier,
{
    let defaults = [
        ("admin", "admin@localhost", ROLE_ADMIN),
        ("user", "user@localhost", ROLE_USER),
    ];

    let mut inserted = 0;
    for (username, email, role) in defaults {
        if users.exists_by_username(username).await? {
            continue;
        }

        let password_hash = credentials.hash_password(DEFAULT_USER_PASSWORD).await?;
        users
            .create(Principal::new(username, email, password_hash).with_role(role))
            .await?;
        inserted += 1;
    }

    info!("Seeded {} development user(s)", inserted);
    Ok(inserted)
}
