use dioxus::prelude::*;
use hunt_tracker::{Notification, NotificationKind};

/// Banner for the current transient message. Renders nothing when no
/// message is active; the caller drives visibility from the notifier's
/// watch channel.
#[component]
pub fn NotificationBanner(notification: Option<Notification>) -> Element {
    let Some(note) = notification else {
        return rsx! {};
    };

    let class = match note.kind {
        NotificationKind::Success => "notification notification-success",
        NotificationKind::Info => "notification notification-info",
        NotificationKind::Error | NotificationKind::Rejection(_) => {
            "notification notification-error"
        }
    };

    rsx! {
        div { class: "{class}", role: "status", "{note.message}" }
    }
}
