use crate::models::{LoginState, TeamCredentials, TeamIdentity};
use crate::service::{AuthError, TeamAuthService, MSG_AUTH_FAILED, MSG_INVALID_CREDENTIALS};
use dioxus::prelude::*;

/// Login form for pre-issued team credentials.
///
/// Collects team name, password and team number, verifies them against
/// the credential table and exchanges the matching service account for a
/// session token. `on_success` fires with the authenticated identity.
#[component]
pub fn LoginScreen(
    token_endpoint: String,
    teams: Vec<TeamCredentials>,
    event_title: String,
    on_success: EventHandler<TeamIdentity>,
) -> Element {
    let mut team_name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut team_number = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut state = use_signal(|| LoginState::SignedOut);

    let submit_endpoint = token_endpoint.clone();
    let submit_teams = teams.clone();
    let submit = move |_| {
        if state() == LoginState::Verifying {
            return;
        }
        state.set(LoginState::Verifying);

        let service = TeamAuthService::new(submit_endpoint.clone(), submit_teams.clone());
        spawn(async move {
            match service
                .sign_in(team_name().trim(), team_number().trim(), &password())
                .await
            {
                Ok(identity) => {
                    state.set(LoginState::Authenticated(identity.clone()));
                    on_success.call(identity);
                }
                Err(AuthError::InvalidCredentials) => {
                    state.set(LoginState::Error(MSG_INVALID_CREDENTIALS.to_string()));
                }
                Err(e) => {
                    log::error!("Token exchange failed: {}", e);
                    state.set(LoginState::Error(MSG_AUTH_FAILED.to_string()));
                }
            }
        });
    };

    let verifying = state() == LoginState::Verifying;

    rsx! {
        div { class: "login-screen",
            div { class: "login-card",
                h2 { class: "login-title", "{event_title}" }

                if let LoginState::Error(message) = state() {
                    div { class: "login-error", "{message}" }
                }

                div { class: "field",
                    label { "Team Name" }
                    input {
                        r#type: "text",
                        class: "input",
                        placeholder: "Enter your team name",
                        value: "{team_name}",
                        oninput: move |e| team_name.set(e.value()),
                        autofocus: true,
                    }
                }

                div { class: "field",
                    label { "Password" }
                    div { class: "password-row",
                        input {
                            r#type: if show_password() { "text" } else { "password" },
                            class: "input",
                            placeholder: "Enter your password",
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                        }
                        button {
                            r#type: "button",
                            class: "btn-toggle",
                            onclick: move |_| show_password.toggle(),
                            if show_password() { "Hide" } else { "Show" }
                        }
                    }
                }

                div { class: "field",
                    label { "Team Number" }
                    input {
                        r#type: "number",
                        class: "input",
                        placeholder: "Enter your team number",
                        value: "{team_number}",
                        oninput: move |e| team_number.set(e.value()),
                    }
                }

                button {
                    class: "btn-primary login-submit",
                    disabled: verifying,
                    onclick: submit,
                    if verifying { "Verifying..." } else { "Enter the Game" }
                }
            }
        }
    }
}
