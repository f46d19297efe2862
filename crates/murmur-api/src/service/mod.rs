//! Validation/orchestration layer between the HTTP handlers and the stores.

mod accounts;
mod messages;

pub use accounts::AccountService;
pub use messages::MessageService;
