use serde::{Deserialize, Serialize};

// ============================================================================
// Session Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub full_name: String,
    pub email: String,
    pub username: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
pub struct SigninResponse {
    pub user: User,
    pub token: String,
}

/// An authenticated user and the bearer token for their requests.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

// Secrets stay out of logs.

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("full_name", &self.full_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for SigninResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigninResponse")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}
