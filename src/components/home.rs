use crate::components::{LocationCard, NotificationBanner, UploadModal};
use crate::config::{self, AppConfig};
use crate::session::HuntSession;
use dioxus::prelude::*;
use hunt_tracker::{Notification, NotificationKind, Notifier, SubmissionTracker};

/// Main screen: progress header, notification banner, the location grid
/// and the upload dialog when a card is open.
#[component]
pub fn HomeScreen(config: AppConfig, session: HuntSession, on_logout: EventHandler<()>) -> Element {
    let notifier = use_hook(Notifier::new);

    let mut tracker = use_signal({
        let notifier = notifier.clone();
        let event = config.event.name.clone();
        let team = session.identity.team_name.clone();
        move || {
            let roster = hunt_tracker::load_roster(config::ROSTER_JSON).unwrap_or_else(|e| {
                // validated at startup; only reachable if the embedded
                // dataset changed underneath us
                log::error!("Location roster failed to load: {}", e);
                Vec::new()
            });
            SubmissionTracker::new(event, team, roster, notifier)
        }
    });

    // fold incoming store snapshots into the tracker for the whole session
    use_hook({
        let subscription = session.subscription.clone();
        move || {
            let mut rx = subscription.receiver();
            spawn(async move {
                loop {
                    let snapshot = rx.borrow_and_update().clone();
                    if let Some(snapshot) = snapshot {
                        tracker.write().apply_snapshot(&snapshot);
                    }
                    if rx.changed().await.is_err() {
                        break;
                    }
                }
            })
        }
    });

    // mirror the notifier into a signal and arm the expiry timer for
    // each message; a newer message supersedes an older timer
    let mut current_note = use_signal(|| None::<Notification>);
    use_hook({
        let notifier = notifier.clone();
        move || {
            let mut rx = notifier.subscribe();
            spawn(async move {
                loop {
                    let note = rx.borrow_and_update().clone();
                    if let Some(n) = &note {
                        let expiry = notifier.clone();
                        let id = n.id;
                        spawn(async move {
                            expiry.expire(id).await;
                        });
                    }
                    current_note.set(note);
                    if rx.changed().await.is_err() {
                        break;
                    }
                }
            })
        }
    });

    let (locations, submitted, total, open) = {
        let t = tracker.read();
        (
            t.locations().to_vec(),
            t.submitted_count(),
            t.locations().len(),
            t.open_location().cloned(),
        )
    };

    let flashing_id = match current_note() {
        Some(Notification {
            kind: NotificationKind::Rejection(id),
            ..
        }) => Some(id),
        _ => None,
    };

    rsx! {
        div { class: "home-screen",
            header { class: "home-header",
                div {
                    h1 { "{config.event.title}" }
                    p { class: "welcome", "Welcome, {session.identity.team_name}!" }
                }
                div { class: "home-header-side",
                    span { class: "progress", "{submitted} / {total} found" }
                    button { class: "btn-logout", onclick: move |_| on_logout.call(()), "Sign out" }
                }
            }

            NotificationBanner { notification: current_note() }

            div { class: "card-grid",
                for location in locations {
                    LocationCard {
                        key: "{location.id}",
                        flashing: flashing_id == Some(location.id),
                        location,
                        on_open: move |id| {
                            if let Err(e) = tracker.write().open(id) {
                                log::debug!("Open refused for location {}: {}", id, e);
                            }
                        },
                    }
                }
            }

            if let Some(open) = open {
                UploadModal {
                    location_id: open.id,
                    location_name: open.name.clone(),
                    tracker,
                    session: session.clone(),
                }
            }
        }
    }
}
