//! # Team Auth
//!
//! Authentication for pre-issued event team credentials, with a Dioxus
//! login component.
//!
//! Teams are checked against a fixed credential table first (team name,
//! team number, SHA-256 password digest), then the matching service
//! account is exchanged with the hosted identity provider for a session
//! token. The resulting [`TeamIdentity`] is the partition key for all
//! per-team storage.

pub mod component;
pub mod models;
pub mod service;

pub use component::LoginScreen;
pub use models::{LoginState, TeamCredentials, TeamIdentity};
pub use service::{password_digest, AuthError, TeamAuthService};
