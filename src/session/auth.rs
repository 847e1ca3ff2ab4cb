use std::sync::Arc;

use crate::api::AuthApi;
use super::errors::SessionError;
use super::store::{SessionStore, AUTH_TOKEN_STORAGE_KEY, AUTH_USER_STORAGE_KEY};
use super::value_objects::{Credentials, Session, SigninResponse, SignupRequest, User};

// ============================================================================
// Auth Service
// ============================================================================
//
// The token and the user are persisted under two fixed keys. A session is
// restored only when both are present; the token is then installed as the
// bearer header of the shared API client.
//
// ============================================================================

pub struct AuthService {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    session: Option<Session>,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Reload a persisted session at start-up.
    pub fn restore(&mut self) -> Result<Option<&Session>, SessionError> {
        let token = self.store.get(AUTH_TOKEN_STORAGE_KEY)?;
        let user = self.store.get(AUTH_USER_STORAGE_KEY)?;

        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => (token, user),
            _ => {
                tracing::debug!("No persisted session");
                return Ok(None);
            }
        };

        let user: User = serde_json::from_str(&user)?;
        self.api.set_bearer_token(Some(token.clone()));

        tracing::info!(username = %user.username, "Session restored");
        Ok(Some(&*self.session.insert(Session { user, token })))
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<User, SessionError> {
        let user = self.api.signup(&request).await?;

        tracing::info!(username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn signin(&mut self, credentials: Credentials) -> Result<&Session, SessionError> {
        let response = self.api.signin(&credentials).await.map_err(|e| {
            tracing::warn!(email = %credentials.email, error = %e, "Sign-in failed");
            e
        })?;

        if let Err(e) = self.persist(&response) {
            tracing::warn!(error = %e, "Could not persist session, clearing stored keys");
            self.forget_stored();
            return Err(e);
        }
        self.api.set_bearer_token(Some(response.token.clone()));

        tracing::info!(username = %response.user.username, "Signed in");
        Ok(&*self.session.insert(Session {
            user: response.user,
            token: response.token,
        }))
    }

    /// Token and user are written as a pair; a half-written pair is never left behind.
    fn persist(&self, response: &SigninResponse) -> Result<(), SessionError> {
        let user = serde_json::to_string(&response.user)?;
        self.store.set(AUTH_USER_STORAGE_KEY, &user)?;
        self.store.set(AUTH_TOKEN_STORAGE_KEY, &response.token)?;
        Ok(())
    }

    fn forget_stored(&self) {
        for key in [AUTH_TOKEN_STORAGE_KEY, AUTH_USER_STORAGE_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key = key, error = %e, "Could not remove stored session key");
            }
        }
    }

    pub fn signout(&mut self) -> Result<(), SessionError> {
        self.store.remove(AUTH_TOKEN_STORAGE_KEY)?;
        self.store.remove(AUTH_USER_STORAGE_KEY)?;
        self.api.set_bearer_token(None);

        if let Some(session) = self.session.take() {
            tracing::info!(username = %session.user.username, "Signed out");
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
