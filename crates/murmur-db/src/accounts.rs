use rusqlite::{Connection, OptionalExtension, Row, params};

use murmur_types::models::Account;

use crate::Database;
use crate::error::StoreError;

impl Database {
    pub fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT account_id, username, password FROM account")?;
            let rows = stmt
                .query_map([], account_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.with_conn(|conn| query_account_by_username(conn, username))
    }

    /// Insert a new account, returning it with its generated id.
    ///
    /// All registration rules live here: non-empty username, username not
    /// already taken, password at least 4 characters.
    pub fn insert_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, StoreError> {
        if username.is_empty() {
            return Err(StoreError::Rejected("username must not be empty"));
        }
        if password.chars().count() < 4 {
            return Err(StoreError::Rejected(
                "password must be at least 4 characters",
            ));
        }
        if self.find_account_by_username(username)?.is_some() {
            return Err(StoreError::Rejected("username already taken"));
        }

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                params![username, password],
            )?;
            Ok(Account {
                account_id: conn.last_insert_rowid(),
                username: username.to_owned(),
                password: password.to_owned(),
            })
        })
    }

    /// Exact match on both fields. Passwords are compared as the plain
    /// strings they were stored as.
    pub fn login_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT account_id, username, password FROM account
                     WHERE username = ?1 AND password = ?2",
                    params![username, password],
                    account_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }
}

fn query_account_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<Account>, StoreError> {
    let row = conn
        .query_row(
            "SELECT account_id, username, password FROM account WHERE username = ?1",
            [username],
            account_from_row,
        )
        .optional()?;
    Ok(row)
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        account_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}
