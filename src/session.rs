use crate::config::AppConfig;
use crate::error::AppError;
use hunt_tracker::{subscribe_snapshots, SnapshotSubscription, StoreClient, StoreConfig};
use std::sync::Arc;
use team_auth::TeamIdentity;
use uuid::Uuid;

/// Session-scoped state, constructed at login and torn down at logout.
///
/// Holds the authenticated identity, the store client bound to its token
/// and the running reconciliation subscription. Nothing here outlives the
/// session, and no other part of the app keeps store credentials.
#[derive(Clone)]
pub struct HuntSession {
    pub identity: TeamIdentity,
    /// Attached to every durable write so sessions can be told apart
    pub session_id: String,
    pub client: Arc<StoreClient>,
    pub subscription: Arc<SnapshotSubscription>,
}

// Sessions are compared by id only; clients and subscriptions carry no
// identity of their own.
impl PartialEq for HuntSession {
    fn eq(&self, other: &Self) -> bool {
        self.session_id == other.session_id
    }
}

impl HuntSession {
    /// Starts a session for an authenticated team: store client plus the
    /// session-long snapshot subscription.
    pub fn start(config: &AppConfig, identity: TeamIdentity) -> Result<Self, AppError> {
        let store_config = StoreConfig {
            base_url: config.store.base_url.clone(),
            event: config.event.name.clone(),
            poll_interval_secs: config.store.poll_interval_secs,
        };
        let client = Arc::new(StoreClient::new(store_config, identity.id_token.clone())?);
        let subscription = Arc::new(subscribe_snapshots(
            client.clone(),
            identity.team_name.clone(),
        ));

        let session_id = Uuid::new_v4().to_string();
        log::info!(
            "Session {} started for team {}",
            session_id,
            identity.team_name
        );

        Ok(Self {
            identity,
            session_id,
            client,
            subscription,
        })
    }

    /// Tears the session down: cancels the subscription. The caller drops
    /// the session afterwards, which discards the token-bound client.
    pub fn sign_out(&self) {
        self.subscription.cancel();
        log::info!(
            "Session {} ended for team {}",
            self.session_id,
            self.identity.team_name
        );
    }
}
