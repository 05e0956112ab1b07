//! Dioxus UI helpers for submission previews
//!
//! Staged files and store-side photo content are rendered as inline data
//! URLs, with the image format sniffed from the bytes.

use crate::models::StagedFile;
use base64::{engine::general_purpose, Engine as _};
use dioxus::prelude::*;

/// Converts raw image bytes into a data URL. Returns `None` when the
/// bytes are not a recognisable image.
pub fn image_data_url(bytes: &[u8]) -> Option<String> {
    let mime = match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => "image/jpeg",
        image::ImageFormat::Png => "image/png",
        image::ImageFormat::WebP => "image/webp",
        image::ImageFormat::Gif => "image/gif",
        other => {
            log::debug!("Unsupported preview format {:?}", other);
            return None;
        }
    };
    Some(format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    ))
}

/// Data URL for a staged file
pub fn staged_data_url(file: &StagedFile) -> Option<String> {
    image_data_url(&file.bytes)
}

/// Data URL for base64 photo content from a snapshot record
pub fn content_data_url(content: &str) -> Option<String> {
    let bytes = general_purpose::STANDARD.decode(content).ok()?;
    image_data_url(&bytes)
}

/// Inline preview of a staged image. Context menu and dragging are
/// suppressed, matching the card artwork treatment.
#[component]
pub fn StagedPreview(data_url: String) -> Element {
    rsx! {
        div { class: "staged-preview",
            img {
                src: "{data_url}",
                draggable: false,
                oncontextmenu: move |evt| evt.prevent_default(),
            }
        }
    }
}
