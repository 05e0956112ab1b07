//! # Hunt Tracker
//!
//! A scavenger hunt submission tracking library.
//!
//! This crate provides the client-side core of an event scavenger hunt:
//! - Roster loading from a static dataset
//! - Per-location submission lifecycle (open, stage a file, submit)
//! - Transient auto-expiring notifications
//! - Reconciliation against the authoritative remote snapshot
//!
//! ## Platform Separation
//!
//! This crate focuses on the cross-platform submission logic. The actual
//! screens live in the application crate; storage access is gated behind
//! the `sync` feature and UI helpers behind the `components` feature.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use hunt_tracker::{load_roster, Notifier, SubmissionTracker};
//!
//! let roster = load_roster(include_str!("roster.json"))?;
//! let notifier = Notifier::new();
//! let mut tracker = SubmissionTracker::new("decked-out", "Team Shadow", roster, notifier);
//! tracker.open(5)?;
//! ```

pub mod models;
pub mod notify;
pub mod paths;
pub mod roster;
pub mod snapshot;
pub mod tracker;

#[cfg(feature = "sync")]
pub mod storage;

#[cfg(feature = "components")]
pub mod components;

pub use models::{Location, StagedFile, SubmissionAttempt};
pub use notify::{Notification, NotificationKind, Notifier, NOTIFICATION_VISIBLE};
pub use roster::{load_roster, RosterError};
pub use snapshot::{SubmissionRecord, TeamSnapshot};
pub use tracker::{
    CardState, SubmissionTracker, SubmitTicket, TrackerError, MAX_UPLOAD_BYTES,
};

#[cfg(feature = "sync")]
pub use storage::{
    subscribe_snapshots, SnapshotSubscription, StoreClient, StoreConfig, StoreError,
    DEFAULT_POLL_INTERVAL_SECS,
};

#[cfg(feature = "components")]
pub use components::{content_data_url, image_data_url, staged_data_url, StagedPreview};
