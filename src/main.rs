use dioxus::prelude::*;

mod components;
mod config;
mod error;
mod session;

use components::HomeScreen;
use config::AppConfig;
use session::HuntSession;
use team_auth::{LoginScreen, TeamIdentity};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    env_logger::init();

    // malformed config or roster halts startup
    if let Err(e) = AppConfig::load() {
        log::error!("Fatal configuration error: {}", e);
        std::process::exit(1);
    }

    dioxus::launch(App);
}

/// Screen navigation for the app
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Login,
    Home,
}

#[component]
fn App() -> Element {
    // validated in main; this re-reads the same embedded data
    let config = use_hook(|| AppConfig::load().map_err(|e| e.to_string()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match &config {
            Ok(config) => rsx! {
                Shell { config: config.clone() }
            },
            Err(e) => rsx! {
                div { class: "fatal-error",
                    h2 { "Configuration error" }
                    p { "{e}" }
                }
            },
        }
    }
}

#[component]
fn Shell(config: AppConfig) -> Element {
    let mut screen = use_signal(|| Screen::Login);
    let mut session = use_signal(|| None::<HuntSession>);

    let login_config = config.clone();
    let on_login = use_callback(move |identity: TeamIdentity| {
        match HuntSession::start(&login_config, identity) {
            Ok(started) => {
                session.set(Some(started));
                screen.set(Screen::Home);
            }
            Err(e) => {
                log::error!("Failed to start session: {}", e);
            }
        }
    });

    let on_logout = move |_| {
        if let Some(current) = session() {
            current.sign_out();
        }
        session.set(None);
        screen.set(Screen::Login);
    };

    rsx! {
        match screen() {
            Screen::Login => rsx! {
                LoginScreen {
                    token_endpoint: config.auth.token_endpoint.clone(),
                    teams: config.teams.clone(),
                    event_title: config.event.title.clone(),
                    on_success: on_login,
                }
            },
            Screen::Home => {
                if let Some(current) = session() {
                    rsx! {
                        HomeScreen {
                            config: config.clone(),
                            session: current,
                            on_logout,
                        }
                    }
                } else {
                    // logged out under our feet; fall back to login
                    rsx! {
                        LoginScreen {
                            token_endpoint: config.auth.token_endpoint.clone(),
                            teams: config.teams.clone(),
                            event_title: config.event.title.clone(),
                            on_success: on_login,
                        }
                    }
                }
            }
        }
    }
}
