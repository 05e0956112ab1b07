use crate::models::{TeamCredentials, TeamIdentity, TokenExchangeRequest, TokenExchangeResponse};
use sha2::{Digest, Sha256};

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid Team Name, Password, or Team Number";
pub const MSG_AUTH_FAILED: &str = "Authentication Failed!";

/// Error type for authentication operations
#[derive(Debug)]
pub enum AuthError {
    /// The credential table has no matching row
    InvalidCredentials,
    NetworkError(String),
    JsonError(String),
    ServerError(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "{}", MSG_INVALID_CREDENTIALS),
            AuthError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AuthError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            AuthError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Hex-encoded SHA-256 digest of a password
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Team authentication service.
///
/// Verification is two-step: the fixed credential table decides whether
/// the team name / number / password combination is valid at all, then
/// the matching service account is exchanged with the hosted identity
/// provider for the session token used on every store request.
pub struct TeamAuthService {
    token_endpoint: String,
    teams: Vec<TeamCredentials>,
}

impl TeamAuthService {
    pub fn new(token_endpoint: String, teams: Vec<TeamCredentials>) -> Self {
        Self {
            token_endpoint,
            teams,
        }
    }

    /// Looks up the credential row matching all three login fields.
    pub fn verify_local(
        &self,
        team_name: &str,
        team_number: &str,
        password: &str,
    ) -> Option<&TeamCredentials> {
        let digest = password_digest(password);
        self.teams.iter().find(|t| {
            t.team_name == team_name
                && t.team_number == team_number
                && t.password_sha256.eq_ignore_ascii_case(&digest)
        })
    }

    /// Signs a team in: local table check, then token exchange.
    pub async fn sign_in(
        &self,
        team_name: &str,
        team_number: &str,
        password: &str,
    ) -> Result<TeamIdentity, AuthError> {
        let team = self
            .verify_local(team_name, team_number, password)
            .ok_or(AuthError::InvalidCredentials)?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent("TeamAuth/0.1.0")
            .build()
            .map_err(|e| AuthError::NetworkError(format!("Client build failed: {}", e)))?;

        let response = client
            .post(&self.token_endpoint)
            .json(&TokenExchangeRequest {
                email: &team.email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            // provider error bodies carry a message worth logging
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.pointer("/error/message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_default();
            log::warn!("Token exchange rejected ({}): {}", status, detail);
            return Err(AuthError::ServerError(format!(
                "Identity provider returned status: {}",
                status
            )));
        }

        let result = response
            .json::<TokenExchangeResponse>()
            .await
            .map_err(|e| AuthError::JsonError(format!("Failed to parse token response: {}", e)))?;

        log::info!("Team {} signed in", team.team_name);
        Ok(TeamIdentity {
            team_name: team.team_name.clone(),
            team_number: team.team_number.clone(),
            id_token: result.id_token,
        })
    }
}
