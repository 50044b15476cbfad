use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{error::ApiError, repository::RepositoryState};

/// Role granted to read-only accounts.
pub const ROLE_USER: &str = "USER";
/// Role required for every write and for any route outside the planet surface.
pub const ROLE_ADMIN: &str = "ADMIN";

/// AuthUser
///
/// The resolved identity of an authenticated request, produced by the
/// Basic-auth extractor below. Handlers receive this struct and apply their
/// own role checks on top of it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    /// 'ADMIN' or 'USER'. ADMIN is a superset: it passes read checks too.
    pub role: String,
}

impl AuthUser {
    /// Read access: USER or ADMIN.
    pub fn can_read(&self) -> bool {
        self.role == ROLE_USER || self.role == ROLE_ADMIN
    }

    /// Write access: ADMIN only.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string. Used when seeding credential
/// records; the API itself never creates users.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
/// Any parse or mismatch failure is a plain `false`: the caller only needs
/// a yes/no, and the distinction must not leak to the client.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any handler. This keeps authentication (extractor)
/// cleanly separated from authorization (role checks in the handlers).
///
/// The flow:
/// 1. Extract the `Authorization: Basic <base64>` header.
/// 2. Decode into `username:password`.
/// 3. Look the username up through the repository (the credential store).
/// 4. Verify the argon2 hash.
///
/// Rejection: 401 Unauthorized with a Basic challenge on any credential
/// failure. A storage error during the lookup is a 500, not a 401.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let encoded = auth_header
            .strip_prefix("Basic ")
            .ok_or(ApiError::Unauthenticated)?;

        let decoded = STANDARD
            .decode(encoded)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or(ApiError::Unauthenticated)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(ApiError::Unauthenticated)?;

        // Storage failure here must surface as 500, hence the `?` before
        // the credential check.
        let user = repo
            .find_user_by_username(username)
            .await?
            .ok_or(ApiError::Unauthenticated)?;

        if !verify_password(password, &user.password) {
            return Err(ApiError::Unauthenticated);
        }

        Ok(AuthUser {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("rebel").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("rebel", &hash));
        assert!(!verify_password("empire", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("rebel", "not-a-phc-string"));
    }

    #[test]
    fn admin_role_passes_both_checks() {
        let admin = AuthUser {
            id: 1,
            username: "vader".to_string(),
            role: ROLE_ADMIN.to_string(),
        };
        assert!(admin.can_read());
        assert!(admin.is_admin());

        let user = AuthUser {
            id: 2,
            username: "skywalker".to_string(),
            role: ROLE_USER.to_string(),
        };
        assert!(user.can_read());
        assert!(!user.is_admin());
    }
}
