use std::sync::Arc;

use murmur_db::Database;
use murmur_db::error::StoreError;
use murmur_types::models::Account;

/// Thin pass-through: every registration and login rule lives in the
/// account store.
#[derive(Clone)]
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn all(&self) -> Result<Vec<Account>, StoreError> {
        self.db.list_accounts()
    }

    pub fn register(&self, username: &str, password: &str) -> Result<Account, StoreError> {
        self.db.insert_account(username, password)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Option<Account>, StoreError> {
        self.db.login_account(username, password)
    }
}
