//! Authentication service.
//!
//! Password accounts live in an in-memory directory for the lifetime of the
//! process. Passwords are stored as Argon2id hashes.

mod error;

pub use error::AuthError;

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use facade_shop_core::{Email, UserId};

use crate::models::CurrentUser;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// A registered account.
#[derive(Debug, Clone)]
struct StoredUser {
    id: UserId,
    name: String,
    email: Email,
    password_hash: String,
    registered_at: DateTime<Utc>,
}

impl StoredUser {
    fn current(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Directory {
    by_email: HashMap<Email, StoredUser>,
    last_id: i32,
}

/// Registered storefront users, keyed by email.
#[derive(Debug, Default)]
pub struct UserDirectory {
    inner: RwLock<Directory>,
}

impl UserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user with name, email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let mut directory = self.inner.write().await;
        if directory.by_email.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists);
        }
        directory.last_id += 1;
        let user = StoredUser {
            id: UserId::new(directory.last_id),
            name: name.to_string(),
            email: email.clone(),
            password_hash,
            registered_at: Utc::now(),
        };
        let current = user.current();
        directory.by_email.insert(email, user);
        drop(directory);

        tracing::info!(user_id = %current.id, "User registered");
        Ok(current)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .inner
            .read()
            .await
            .by_email
            .get(&email)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;
        Ok(user.current())
    }

    /// When the account was created.
    pub async fn registered_at(&self, email: &Email) -> Option<DateTime<Utc>> {
        self.inner
            .read()
            .await
            .by_email
            .get(email)
            .map(|user| user.registered_at)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_login() {
        let users = UserDirectory::new();
        let registered = users
            .register("Анна", "Anna@Example.ru", "correct horse")
            .await
            .unwrap();
        assert_eq!(registered.email.as_str(), "anna@example.ru");

        let logged_in = users.login("anna@example.ru", "correct horse").await.unwrap();
        assert_eq!(logged_in, registered);
        assert!(users.registered_at(&registered.email).await.is_some());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let users = UserDirectory::new();
        users
            .register("Анна", "anna@example.ru", "correct horse")
            .await
            .unwrap();
        assert!(matches!(
            users.login("anna@example.ru", "wrong horse").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            users.login("nobody@example.ru", "correct horse").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let users = UserDirectory::new();
        users
            .register("Анна", "anna@example.ru", "correct horse")
            .await
            .unwrap();
        assert!(matches!(
            users.register("Аня", "ANNA@example.ru", "another one").await,
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(verify_password("wrong", &hash).is_err());
    }
}
