pub mod accounts;
pub mod messages;
pub mod service;

use std::sync::Arc;

use murmur_db::Database;

use crate::service::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

impl AppStateInner {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            accounts: AccountService::new(db.clone()),
            messages: MessageService::new(db),
        }
    }
}
