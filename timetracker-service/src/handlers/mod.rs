pub mod contact;
pub mod health;
pub mod metrics;
pub mod root;
pub mod status;

pub use contact::{list_contact_messages, submit_contact_form};
pub use health::{health_check, readiness_check};
pub use root::{api_root, method_not_allowed, not_found, root};
pub use status::{create_status_check, list_status_checks};
