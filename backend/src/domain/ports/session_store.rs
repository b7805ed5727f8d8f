//! Outbound port for login session storage, with the default in-process
//! implementation beside it.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::session::SessionToken;
use crate::domain::user::UserId;

/// Failures surfaced by [`SessionStore`] implementations.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The backing store is unreachable or misbehaving.
    #[error("session store unavailable: {message}")]
    Unavailable { message: String },
}

impl SessionStoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<SessionStoreError> for crate::domain::Error {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::Unavailable { message } => {
                tracing::error!(%message, "session store unavailable");
                Self::service_unavailable("Service temporarily unavailable")
            }
        }
    }
}

/// Storage abstraction for bearer session tokens.
///
/// Tokens are opaque: the store maps them to user identifiers and nothing
/// else. There is no expiry; a token lives until it is removed or the store
/// itself goes away.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record a token for a user.
    async fn insert(&self, token: SessionToken, user: UserId) -> Result<(), SessionStoreError>;

    /// Resolve a token to its user, if the token is known.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError>;

    /// Forget a token. Removing an unknown token is not an error.
    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}

/// Process-lifetime session store backed by a locked map.
///
/// Restarting the server drops every session, which is the intended
/// behaviour for this scheme.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionToken, UserId>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<SessionToken, UserId>>, SessionStoreError>
    {
        self.sessions
            .read()
            .map_err(|_| SessionStoreError::unavailable("session lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<SessionToken, UserId>>, SessionStoreError>
    {
        self.sessions
            .write()
            .map_err(|_| SessionStoreError::unavailable("session lock poisoned"))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, token: SessionToken, user: UserId) -> Result<(), SessionStoreError> {
        self.write()?.insert(token, user);
        Ok(())
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError> {
        Ok(self.read()?.get(token).copied())
    }

    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.write()?.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn insert_then_resolve_returns_user() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::generate();
        let user = UserId::random();
        store.insert(token.clone(), user).await.expect("insert");
        assert_eq!(store.resolve(&token).await.expect("resolve"), Some(user));
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::generate();
        assert_eq!(store.resolve(&token).await.expect("resolve"), None);
    }

    #[tokio::test]
    async fn remove_forgets_the_token() {
        let store = InMemorySessionStore::new();
        let token = SessionToken::generate();
        store
            .insert(token.clone(), UserId::random())
            .await
            .expect("insert");
        store.remove(&token).await.expect("remove");
        assert_eq!(store.resolve(&token).await.expect("resolve"), None);
    }

    #[tokio::test]
    async fn removing_unknown_token_is_fine() {
        let store = InMemorySessionStore::new();
        store
            .remove(&SessionToken::generate())
            .await
            .expect("remove of unknown token");
    }
}
