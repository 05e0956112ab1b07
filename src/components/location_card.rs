use dioxus::prelude::*;
use hunt_tracker::Location;

/// One tile in the location grid. Clicking it asks the tracker to open
/// the upload dialog; already-submitted cards stay clickable so the
/// refusal message and flash can fire.
#[component]
pub fn LocationCard(location: Location, flashing: bool, on_open: EventHandler<u32>) -> Element {
    let mut class = String::from("location-card");
    if location.submitted {
        class.push_str(" location-card-submitted");
    }
    if flashing {
        class.push_str(" location-card-flash");
    }

    let id = location.id;
    let difficulty = location.difficulty;

    rsx! {
        div { class: "{class}", onclick: move |_| on_open.call(id),
            span { class: "card-number", "{location.id}" }
            h3 { class: "card-name", "{location.name}" }
            div { class: "card-difficulty", title: "Difficulty {location.difficulty} of 5",
                {(1..=5u8).map(|pip| {
                    let pip_class = if pip <= difficulty { "pip pip-filled" } else { "pip" };
                    rsx! {
                        span { key: "{pip}", class: "{pip_class}", "♠" }
                    }
                })}
            }
            if location.submitted {
                span { class: "card-found", "Found" }
            }
        }
    }
}
