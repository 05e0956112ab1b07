use crate::error::AppError;
use serde::Deserialize;
use team_auth::TeamCredentials;

/// Embedded application config; validated before launch
pub const APP_CONFIG_TOML: &str = include_str!("../assets/config.toml");

/// Embedded location dataset for the event
pub const ROSTER_JSON: &str = include_str!("../assets/roster.json");

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    pub event: EventSettings,
    pub store: StoreSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub teams: Vec<TeamCredentials>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventSettings {
    /// Store key segment for this event
    pub name: String,
    /// Display title on the login and home screens
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreSettings {
    pub base_url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthSettings {
    pub token_endpoint: String,
}

fn default_poll_interval() -> u64 {
    hunt_tracker::DEFAULT_POLL_INTERVAL_SECS
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, AppError> {
        let config: AppConfig = toml::from_str(raw).map_err(|e| AppError::Config(e.to_string()))?;

        if config.event.name.trim().is_empty() {
            return Err(AppError::Config("event name is empty".to_string()));
        }
        if config.store.base_url.trim().is_empty() {
            return Err(AppError::Config("store base_url is empty".to_string()));
        }
        if config.auth.token_endpoint.trim().is_empty() {
            return Err(AppError::Config("auth token_endpoint is empty".to_string()));
        }
        if config.teams.is_empty() {
            return Err(AppError::Config("no team credentials configured".to_string()));
        }

        // the roster ships alongside the config; a bad dataset is the same
        // class of fatal startup error
        hunt_tracker::load_roster(ROSTER_JSON)?;

        Ok(config)
    }

    pub fn load() -> Result<Self, AppError> {
        Self::from_toml_str(APP_CONFIG_TOML)
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.store.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [event]
        name = "decked-out"
        title = "Decked Out"

        [store]
        base_url = "https://store.example.com"
        poll_interval_secs = 15

        [auth]
        token_endpoint = "https://id.example.com/v1/token"

        [[teams]]
        team_name = "Alpha"
        team_number = "1"
        email = "team1@example.com"
        password_sha256 = "2618be5da8aefa55ea5834d506110cf6fab41a09236ffaa6798f8a1a83125a9c"
    "#;

    #[test]
    fn test_sample_config_parses() {
        let config = AppConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.event.name, "decked-out");
        assert_eq!(config.store.poll_interval_secs, 15);
        assert_eq!(config.teams.len(), 1);
        assert_eq!(config.teams[0].team_name, "Alpha");
    }

    #[test]
    fn test_poll_interval_defaults() {
        let trimmed = SAMPLE.replace("poll_interval_secs = 15", "");
        let config = AppConfig::from_toml_str(&trimmed).unwrap();
        assert_eq!(
            config.poll_interval().as_secs(),
            hunt_tracker::DEFAULT_POLL_INTERVAL_SECS
        );
    }

    #[test]
    fn test_missing_teams_rejected() {
        let trimmed = SAMPLE.split("[[teams]]").next().unwrap().to_string();
        assert!(matches!(
            AppConfig::from_toml_str(&trimmed),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_missing_section_rejected() {
        assert!(matches!(
            AppConfig::from_toml_str("[event]\nname = \"x\"\ntitle = \"x\""),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_embedded_config_is_valid() {
        AppConfig::load().unwrap();
    }
}
