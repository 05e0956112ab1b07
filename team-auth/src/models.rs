use serde::{Deserialize, Serialize};

/// One row of the pre-issued credential table.
///
/// The table ships in the application config; passwords are stored as
/// hex-encoded SHA-256 digests, never in the clear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamCredentials {
    pub team_name: String,
    pub team_number: String,
    /// Service account at the hosted identity provider
    pub email: String,
    pub password_sha256: String,
}

/// The authenticated principal for one session
#[derive(Debug, Clone, PartialEq)]
pub struct TeamIdentity {
    pub team_name: String,
    pub team_number: String,
    /// Opaque session token from the identity provider
    pub id_token: String,
}

/// Request body for the identity provider token exchange
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExchangeRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Response from a successful token exchange
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExchangeResponse {
    pub id_token: String,
    #[serde(default)]
    pub expires_in: Option<String>,
}

/// State of the login process
#[derive(Debug, Clone, PartialEq)]
pub enum LoginState {
    /// No attempt yet
    SignedOut,
    /// Credentials checked locally, token exchange in flight
    Verifying,
    /// Login successful
    Authenticated(TeamIdentity),
    /// Login failed with a user-visible message
    Error(String),
}
