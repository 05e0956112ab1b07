mod home;
mod location_card;
mod notification;
mod upload_modal;

pub use home::HomeScreen;
pub use location_card::LocationCard;
pub use notification::NotificationBanner;
pub use upload_modal::UploadModal;
