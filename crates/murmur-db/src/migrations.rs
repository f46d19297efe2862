use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS account (
            account_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL
        );

        -- posted_by refers to account.account_id but is deliberately not a
        -- foreign key constraint; the application does not enforce it.
        CREATE TABLE IF NOT EXISTS message (
            message_id         INTEGER PRIMARY KEY AUTOINCREMENT,
            posted_by          INTEGER NOT NULL,
            message_text       TEXT NOT NULL,
            time_posted_epoch  INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_message_posted_by
            ON message(posted_by);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
