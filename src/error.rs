/// Failure taxonomy for the tracker core.
///
/// There is no `NotFound` variant on purpose: a month with no records
/// resolves to a zero-valued default at the read path, never to an error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// The backing workbook could not be reached, or a call against it
    /// failed. Surfaced to the end caller as a server-side fault.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Caller-supplied data violates a field constraint.
    #[error("{0}")]
    Validation(String),

    /// A failure during archive export or purge. The archival process
    /// contains these at its own top level; they never reach the insert
    /// that triggered the run.
    #[error("archival failed: {0}")]
    Archival(String),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::StoreUnavailable(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Archival(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Archival(e.to_string())
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
