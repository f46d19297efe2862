use std::sync::Arc;

use murmur_db::Database;
use murmur_db::error::StoreError;
use murmur_types::api::CreateMessageRequest;
use murmur_types::models::Message;

#[derive(Clone)]
pub struct MessageService {
    db: Arc<Database>,
}

impl MessageService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn all(&self) -> Result<Vec<Message>, StoreError> {
        self.db.list_messages()
    }

    pub fn by_user(&self, account_id: i64) -> Result<Vec<Message>, StoreError> {
        self.db.list_messages_by_user(account_id)
    }

    /// Creation validation lives in the store.
    pub fn create(&self, req: &CreateMessageRequest) -> Result<Message, StoreError> {
        self.db
            .insert_message(req.posted_by, &req.message_text, req.time_posted_epoch)
    }

    pub fn get(&self, message_id: i64) -> Result<Option<Message>, StoreError> {
        self.db.find_message_by_id(message_id)
    }

    /// Authoritative text gate for updates: the store-level overwrite does
    /// not re-validate.
    pub fn update_text(&self, message_id: i64, new_text: &str) -> Result<Message, StoreError> {
        if new_text.is_empty() || new_text.chars().count() > 255 {
            return Err(StoreError::Rejected(
                "message text must be 1 to 255 characters",
            ));
        }
        self.db.update_message_text(message_id, new_text)
    }

    /// Delete only if present, returning the pre-deletion record so the
    /// handler can echo it back. Absent ids are `Ok(None)`, never an error.
    pub fn delete(&self, message_id: i64) -> Result<Option<Message>, StoreError> {
        match self.get(message_id)? {
            Some(message) => {
                self.db.delete_message_by_id(message_id)?;
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }
}
