use thiserror::Error;

/// Store call outcomes beyond a successful row.
///
/// The HTTP layer collapses most of these into the same status codes, but
/// they stay distinguishable here so callers and logs can tell a rejected
/// input from a missing row from a broken database.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input failed a store-level rule (empty username, short password,
    /// oversized message text, duplicate username).
    #[error("rejected: {0}")]
    Rejected(&'static str),

    /// The targeted row does not exist.
    #[error("no such row")]
    NotFound,

    /// SQL or connectivity failure.
    #[error("storage: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The connection mutex was poisoned by a panicking holder.
    #[error("connection lock poisoned")]
    LockPoisoned,
}
