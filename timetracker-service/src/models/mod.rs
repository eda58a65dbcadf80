pub mod contact_message;
pub mod status_check;

pub use contact_message::ContactMessage;
pub use status_check::StatusCheck;
