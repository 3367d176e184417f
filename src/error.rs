use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    /// The storage medium could not be read or written.
    Storage(String),
    /// A stored row could not be decoded into its record type.
    Malformed(String),
    NotFound(Ulid),
    /// An existing reservation overlaps the requested stay (checked booking only).
    Conflict(Ulid),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Storage(e) => write!(f, "storage unavailable: {e}"),
            Error::Malformed(e) => write!(f, "malformed record: {e}"),
            Error::NotFound(id) => write!(f, "not found: {id}"),
            Error::Conflict(id) => write!(f, "conflict with reservation: {id}"),
        }
    }
}

impl std::error::Error for Error {}
