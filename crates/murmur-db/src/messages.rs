use rusqlite::{Connection, OptionalExtension, Row, params};

use murmur_types::models::Message;

use crate::Database;
use crate::error::StoreError;

const SELECT_MESSAGE: &str =
    "SELECT message_id, posted_by, message_text, time_posted_epoch FROM message";

impl Database {
    pub fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(SELECT_MESSAGE)?;
            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_messages_by_user(&self, account_id: i64) -> Result<Vec<Message>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_MESSAGE} WHERE posted_by = ?1"))?;
            let rows = stmt
                .query_map([account_id], message_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn find_message_by_id(&self, message_id: i64) -> Result<Option<Message>, StoreError> {
        self.with_conn(|conn| query_message_by_id(conn, message_id))
    }

    /// Insert a new message, returning it with its generated id.
    ///
    /// The text gate for creation lives here: non-empty, at most 255
    /// characters.
    pub fn insert_message(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<Message, StoreError> {
        if message_text.is_empty() {
            return Err(StoreError::Rejected("message text must not be empty"));
        }
        if message_text.chars().count() > 255 {
            return Err(StoreError::Rejected(
                "message text must be at most 255 characters",
            ));
        }

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text, time_posted_epoch)
                 VALUES (?1, ?2, ?3)",
                params![posted_by, message_text, time_posted_epoch],
            )?;
            Ok(Message {
                message_id: conn.last_insert_rowid(),
                posted_by,
                message_text: message_text.to_owned(),
                time_posted_epoch,
            })
        })
    }

    /// Overwrite a message's text and return the refreshed row.
    ///
    /// The new text is NOT validated here; the message service is the
    /// authoritative gate for update text.
    pub fn update_message_text(
        &self,
        message_id: i64,
        new_text: &str,
    ) -> Result<Message, StoreError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE message SET message_text = ?1 WHERE message_id = ?2",
                params![new_text, message_id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            query_message_by_id(conn, message_id)?.ok_or(StoreError::NotFound)
        })
    }

    /// Absent ids are a no-op, not an error.
    pub fn delete_message_by_id(&self, message_id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM message WHERE message_id = ?1",
                [message_id],
            )?;
            Ok(())
        })
    }
}

fn query_message_by_id(
    conn: &Connection,
    message_id: i64,
) -> Result<Option<Message>, StoreError> {
    let row = conn
        .query_row(
            &format!("{SELECT_MESSAGE} WHERE message_id = ?1"),
            [message_id],
            message_from_row,
        )
        .optional()?;
    Ok(row)
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}
