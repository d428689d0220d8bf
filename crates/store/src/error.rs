use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// A required field was empty at save time. The action is aborted and
    /// nothing is written.
    Validation { entity: &'static str, field: &'static str },
    /// Underlying query/insert failure. Propagated as the failure of the
    /// current action; never retried.
    Sqlite(String),
    /// Attachment file I/O error.
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { entity, field } => {
                write!(f, "{entity}: required field '{field}' is empty")
            }
            Self::Sqlite(msg) => write!(f, "store error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e.to_string())
    }
}
