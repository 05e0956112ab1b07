//! Store access for submissions
//!
//! The external collaborator is a hosted keyed JSON database reached over
//! HTTPS: one PUT per submission attempt, one GET for the team's
//! authoritative subtree, and a session-long polling subscription that
//! republishes decoded snapshots on a watch channel.

use crate::models::SubmissionAttempt;
use crate::paths;
use crate::snapshot::TeamSnapshot;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Default reconciliation poll interval
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Configuration for store access
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub event: String,
    pub poll_interval_secs: u64,
}

/// Errors that can occur talking to the store
#[derive(Debug)]
pub enum StoreError {
    NetworkError(String),
    ServerError(String),
    DecodeError(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            StoreError::ServerError(msg) => write!(f, "Server error: {}", msg),
            StoreError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Client for the hosted keyed store, bound to one session's auth token
pub struct StoreClient {
    config: StoreConfig,
    token: String,
    client: reqwest::Client,
}

impl StoreClient {
    pub fn new(config: StoreConfig, id_token: String) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .tcp_keepalive(Duration::from_secs(30))
            .user_agent("DeckedOut/0.1.0")
            .build()
            .map_err(|e| StoreError::NetworkError(format!("Client build failed: {}", e)))?;

        Ok(Self {
            config,
            token: id_token,
            client,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.poll_interval_secs.max(1))
    }

    fn node_url(&self, key: &str) -> String {
        format!(
            "{}/{}.json?auth={}",
            self.config.base_url.trim_end_matches('/'),
            key,
            self.token
        )
    }

    /// Durably writes one submission attempt and returns the store key of
    /// the written record, used as the location's image reference.
    pub async fn write_submission(
        &self,
        team: &str,
        location_id: u32,
        attempt: &SubmissionAttempt,
    ) -> Result<String, StoreError> {
        let key = paths::submission_path(&self.config.event, team, location_id, &attempt.attempt_id);

        let response = self
            .client
            .put(self.node_url(&key))
            .json(attempt)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(format!("Write request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(StoreError::ServerError(format!(
                "Store returned status: {}",
                response.status()
            )));
        }

        log::info!("Wrote submission {} for location {}", attempt.attempt_id, location_id);
        Ok(key)
    }

    /// Fetches the team's authoritative submission subtree.
    pub async fn fetch_snapshot(&self, team: &str) -> Result<TeamSnapshot, StoreError> {
        let key = paths::team_submissions_path(&self.config.event, team);

        let response = self
            .client
            .get(self.node_url(&key))
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(format!("Snapshot request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(StoreError::ServerError(format!(
                "Store returned status: {}",
                response.status()
            )));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StoreError::DecodeError(format!("Failed to parse snapshot: {}", e)))?;

        Ok(TeamSnapshot::from_value(&value))
    }
}

/// Handle of a running snapshot subscription.
///
/// Cancellation is explicit on logout and implicit on drop; the polling
/// loop also stops once every receiver is gone.
pub struct SnapshotSubscription {
    stop: Arc<AtomicBool>,
    rx: watch::Receiver<Option<TeamSnapshot>>,
}

impl SnapshotSubscription {
    pub fn receiver(&self) -> watch::Receiver<Option<TeamSnapshot>> {
        self.rx.clone()
    }

    pub fn cancel(&self) {
        if !self.stop.swap(true, Ordering::SeqCst) {
            log::info!("Snapshot subscription cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

impl Drop for SnapshotSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Starts the session-long reconciliation subscription.
///
/// Runs on a dedicated thread with its own current-thread runtime so the
/// UI event loop is never blocked. Snapshots are delivered in arrival
/// order; the watch channel collapses to the latest unseen one, which is
/// exactly the last-one-wins semantics reconciliation wants.
pub fn subscribe_snapshots(client: Arc<StoreClient>, team: String) -> SnapshotSubscription {
    let (tx, rx) = watch::channel(None);
    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime");

        runtime.block_on(async move {
            let interval = client.poll_interval();
            let mut consecutive_errors: u32 = 0;

            while !flag.load(Ordering::SeqCst) {
                let wait = match client.fetch_snapshot(&team).await {
                    Ok(snapshot) => {
                        consecutive_errors = 0;
                        if tx.send(Some(snapshot)).is_err() {
                            // every receiver dropped, session is gone
                            break;
                        }
                        interval
                    }
                    Err(e) => {
                        consecutive_errors += 1;
                        log::warn!(
                            "Snapshot poll failed (attempt {}): {}",
                            consecutive_errors,
                            e
                        );
                        backoff_with_jitter(interval, consecutive_errors)
                    }
                };
                tokio::time::sleep(wait).await;
            }

            log::info!("Snapshot polling stopped for team {}", team);
        });
    });

    SnapshotSubscription { stop, rx }
}

/// Exponential backoff with jitter for poll failures
fn backoff_with_jitter(base: Duration, retry: u32) -> Duration {
    use rand::Rng;

    let scaled = base.as_secs().max(1) * (1u64 << retry.min(3));
    let capped = scaled.min(300);
    Duration::from_secs(rand::rng().random_range(1..=capped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_capped() {
        for retry in 1..10 {
            let delay = backoff_with_jitter(Duration::from_secs(30), retry);
            assert!(delay >= Duration::from_secs(1));
            assert!(delay <= Duration::from_secs(300));
        }
    }

    #[test]
    fn test_node_url_shape() {
        let client = StoreClient::new(
            StoreConfig {
                base_url: "https://store.example.com/".to_string(),
                event: "decked-out".to_string(),
                poll_interval_secs: 30,
            },
            "tok".to_string(),
        )
        .unwrap();

        assert_eq!(
            client.node_url("events/decked-out/submissions/alpha"),
            "https://store.example.com/events/decked-out/submissions/alpha.json?auth=tok"
        );
    }
}
