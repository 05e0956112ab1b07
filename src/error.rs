use std::fmt;

/// Central error types for the Decked Out app
#[derive(Debug)]
pub enum AppError {
    /// Malformed application config or roster; fatal at startup
    Config(String),
    /// Authentication failure
    Auth(team_auth::AuthError),
    /// Store access failure
    Store(hunt_tracker::StoreError),
    /// Refused tracker transition
    Tracker(hunt_tracker::TrackerError),
    /// General error
    #[allow(dead_code)]
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Auth(e) => write!(f, "Authentication error: {}", e),
            AppError::Store(e) => write!(f, "Store error: {}", e),
            AppError::Tracker(e) => write!(f, "Tracker error: {}", e),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<team_auth::AuthError> for AppError {
    fn from(e: team_auth::AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<hunt_tracker::StoreError> for AppError {
    fn from(e: hunt_tracker::StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<hunt_tracker::TrackerError> for AppError {
    fn from(e: hunt_tracker::TrackerError) -> Self {
        AppError::Tracker(e)
    }
}

impl From<hunt_tracker::RosterError> for AppError {
    fn from(e: hunt_tracker::RosterError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl AppError {
    /// User-friendly message for the UI
    #[allow(dead_code)]
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(_) => "The event is misconfigured. Please contact an organizer.".to_string(),
            AppError::Auth(e) => e.to_string(),
            AppError::Store(_) => "Could not reach the event server. Please try again.".to_string(),
            AppError::Tracker(e) => e.to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }
}
