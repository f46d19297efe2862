use serde::{Deserialize, Serialize};

/// A registered user identity. Field names double as the JSON wire names
/// and the `account` table column names.
///
/// The password is stored and returned as the plain string the client sent.
/// Hashing would change the login comparison and the /register response
/// body, so it stays out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

/// A single posted text item owned by one account.
///
/// `posted_by` refers to an `account_id` but is not enforced as a foreign
/// key by application logic. `time_posted_epoch` is client-supplied epoch
/// milliseconds, stored opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}
