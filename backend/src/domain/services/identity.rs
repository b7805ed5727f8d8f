//! Identity service: registration, login, sessions, and credential changes.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::error::Error;
use crate::domain::password::{PasswordHash, PlainPassword};
use crate::domain::ports::{SessionStore, UserRepository};
use crate::domain::session::SessionToken;
use crate::domain::user::{validate_name, EmailAddress, User, UserId, UserProfile};

/// Successful registration or login: a fresh session and the public profile.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub token: SessionToken,
    pub profile: UserProfile,
}

/// Orchestrates user accounts and bearer sessions.
///
/// Sessions are opaque tokens held in a [`SessionStore`]; every
/// authentication re-resolves the user row so a token whose account has
/// vanished is rejected and evicted rather than trusted.
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { users, sessions }
    }

    /// Register a new account and open a session for it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, Error> {
        let name = validate_name(name).map_err(|e| Error::invalid_request(e.to_string()))?;
        let email =
            EmailAddress::new(email).map_err(|e| Error::invalid_request(e.to_string()))?;
        let password =
            PlainPassword::new(password).map_err(|e| Error::invalid_request(e.to_string()))?;

        let user = User {
            id: UserId::random(),
            name,
            email,
            password: PasswordHash::derive(&password),
            created_at: Utc::now(),
        };
        let profile = user.profile();
        let user_id = user.id;
        self.users.insert(user).await?;

        let token = SessionToken::generate();
        self.sessions.insert(token.clone(), user_id).await?;
        info!(user_id = %user_id, "registered new user");
        Ok(AuthenticatedSession { token, profile })
    }

    /// Exchange an email/password pair for a fresh session.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedSession, Error> {
        let invalid = || Error::invalid_credentials("Invalid email or password");
        let email = EmailAddress::new(email).map_err(|_| invalid())?;
        let password = PlainPassword::new(password).map_err(|_| invalid())?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid)?;
        if !user.password.verify(&password) {
            return Err(invalid());
        }

        let token = SessionToken::generate();
        self.sessions.insert(token.clone(), user.id).await?;
        info!(user_id = %user.id, "user logged in");
        Ok(AuthenticatedSession {
            token,
            profile: user.profile(),
        })
    }

    /// Remove the account and invalidate the presenting token.
    ///
    /// Other tokens the user may hold become orphans; [`Self::authenticate`]
    /// evicts them the next time they appear. Project and submission cleanup
    /// belongs to the tenant side and runs before this.
    pub async fn delete_account(
        &self,
        user: UserId,
        token: &SessionToken,
    ) -> Result<(), Error> {
        self.users.delete(user).await?;
        self.sessions.remove(token).await?;
        info!(user_id = %user, "deleted account");
        Ok(())
    }

    /// Resolve a bearer token to the user it belongs to.
    ///
    /// Tokens whose user row no longer exists are evicted on sight.
    pub async fn authenticate(&self, token: &SessionToken) -> Result<User, Error> {
        let user_id = self
            .sessions
            .resolve(token)
            .await?
            .ok_or_else(|| Error::unauthenticated("Invalid or expired session"))?;
        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => {
                // Orphaned token: the account went away underneath it.
                self.sessions.remove(token).await?;
                Err(Error::unauthenticated("Invalid or expired session"))
            }
        }
    }

    /// Replace the account's display name.
    pub async fn update_name(&self, user: UserId, name: &str) -> Result<UserProfile, Error> {
        let name = validate_name(name).map_err(|e| Error::invalid_request(e.to_string()))?;
        let updated = self.users.update_name(user, name).await?;
        Ok(updated.profile())
    }

    /// Replace the account password after verifying the current one.
    pub async fn change_password(
        &self,
        user: UserId,
        current: &str,
        replacement: &str,
    ) -> Result<(), Error> {
        let current =
            PlainPassword::new(current).map_err(|e| Error::invalid_request(e.to_string()))?;
        let replacement =
            PlainPassword::new(replacement).map_err(|e| Error::invalid_request(e.to_string()))?;

        let record = self
            .users
            .find_by_id(user)
            .await?
            .ok_or_else(|| Error::unauthenticated("Invalid or expired session"))?;
        if !record.password.verify(&current) {
            return Err(Error::wrong_current_password("Current password is incorrect"));
        }
        self.users
            .update_password(user, PasswordHash::derive(&replacement))
            .await?;
        info!(user_id = %user, "password changed");
        Ok(())
    }
}
