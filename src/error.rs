use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// Malformed operation input: blank id, bad email shape, inverted dates,
    /// room number out of bounds. Always raised before any mutation.
    Validation(String),
    NotFound { kind: &'static str, id: String },
    AlreadyExists { kind: &'static str, id: String },
    RoomBusy { hotel_id: String, room_no: u32 },
    NoAvailability { hotel_id: String },
    /// OS-level I/O failure from the record store. Malformed file *content*
    /// is not a storage error — it degrades to an empty collection.
    Storage { path: PathBuf, source: io::Error },
    /// The single-writer task is gone; no further operations are possible.
    Shutdown,
}

impl Error {
    /// The Conflict taxonomy: duplicate id, busy room, or a full hotel.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::AlreadyExists { .. } | Error::RoomBusy { .. } | Error::NoAvailability { .. }
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "validation: {msg}"),
            Error::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Error::AlreadyExists { kind, id } => write!(f, "{kind} already exists: {id}"),
            Error::RoomBusy { hotel_id, room_no } => {
                write!(f, "room {room_no} at hotel {hotel_id} is not available for those dates")
            }
            Error::NoAvailability { hotel_id } => {
                write!(f, "no rooms available at hotel {hotel_id} for those dates")
            }
            Error::Storage { path, source } => {
                write!(f, "storage failure at {}: {source}", path.display())
            }
            Error::Shutdown => write!(f, "service writer shut down"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}
