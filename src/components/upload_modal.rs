use crate::session::HuntSession;
use dioxus::prelude::*;
use hunt_tracker::{staged_data_url, StagedFile, StagedPreview, SubmissionAttempt, SubmissionTracker};

/// Upload dialog for the currently open location.
///
/// All state transitions go through the tracker; this component only
/// reads files off the picker and runs the durable write for a ticket
/// handed out by `begin_submit`.
#[component]
pub fn UploadModal(
    location_id: u32,
    location_name: String,
    mut tracker: Signal<SubmissionTracker>,
    session: HuntSession,
) -> Element {
    let (staged_name, preview, in_flight) = {
        let t = tracker.read();
        (
            t.staged_file().map(|f| f.name.clone()),
            t.staged_file().and_then(staged_data_url),
            t.submit_in_flight(),
        )
    };

    let on_file = move |evt: FormEvent| {
        let files = evt.files();
        spawn(async move {
            let Some(file) = files.into_iter().next() else {
                return;
            };
            let name = file.name();
            match file.read_bytes().await {
                Ok(bytes) => {
                    let staged = StagedFile::new(name, bytes.to_vec());
                    if let Err(e) = tracker.write().choose_file(staged) {
                        log::debug!("Selected file refused: {}", e);
                    }
                }
                Err(e) => {
                    log::error!("Failed to read selected file: {}", e);
                }
            }
        });
    };

    let submit_session = session.clone();
    let on_submit = move |_| {
        let ticket = match tracker.write().begin_submit() {
            Ok(ticket) => ticket,
            Err(e) => {
                log::debug!("Submit refused: {}", e);
                return;
            }
        };

        let session = submit_session.clone();
        spawn(async move {
            let team = session.identity.team_name.clone();
            let attempt = SubmissionAttempt::new(
                ticket.attempt_id.as_str(),
                &ticket.file,
                session.session_id.as_str(),
            );

            match session
                .client
                .write_submission(&team, ticket.location_id, &attempt)
                .await
            {
                Ok(reference) => {
                    // refresh before confirming so a stale poll can never
                    // land on top of this submit
                    match session.client.fetch_snapshot(&team).await {
                        Ok(snapshot) => tracker.write().apply_snapshot(&snapshot),
                        Err(e) => log::warn!("Post-write refresh failed: {}", e),
                    }
                    tracker.write().complete_submit(ticket.location_id, reference);
                }
                Err(e) => {
                    log::error!("Submission write failed: {}", e);
                    tracker.write().fail_submit(ticket.location_id);
                }
            }
        });
    };

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal",
                header { class: "modal-header",
                    h2 { "Location {location_id}: {location_name}" }
                    button {
                        class: "btn-close",
                        onclick: move |_| tracker.write().close(),
                        "×"
                    }
                }

                label { class: "file-picker",
                    "Choose a photo"
                    input {
                        r#type: "file",
                        accept: "image/*",
                        onchange: on_file,
                    }
                }

                if let Some(url) = preview {
                    StagedPreview { data_url: url }
                } else {
                    div { class: "preview-empty", "No image selected yet." }
                }
                if let Some(name) = staged_name {
                    p { class: "staged-name", "{name}" }
                }

                footer { class: "modal-actions",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| tracker.write().close(),
                        "Cancel"
                    }
                    button {
                        class: "btn-primary",
                        disabled: in_flight,
                        onclick: on_submit,
                        if in_flight { "Uploading…" } else { "Submit" }
                    }
                }
            }
        }
    }
}
