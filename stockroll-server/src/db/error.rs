/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store could not be opened or the connection could not be initialized
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// A statement, transaction or commit failed on an open connection
    #[error("database error: {0}")]
    Query(#[from] sqlx::Error),

    /// The request scope already released its connection
    #[error("request scope is closed")]
    ScopeClosed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
