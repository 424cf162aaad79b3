//! Typed errors for snapshot save/load.

use std::fmt;

#[derive(Debug)]
pub enum SnapshotError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// JSON encoding failed.
    Encode(String),
    /// JSON decoding failed (corrupt or hand-edited snapshot).
    Decode(String),
    /// No snapshot file exists to load.
    NoData,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "I/O error: {e}"),
            SnapshotError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SnapshotError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SnapshotError::NoData => write!(f, "No saved scene available"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            SnapshotError::NoData
        } else {
            SnapshotError::Io(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let io = SnapshotError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(format!("{io}").contains("denied"));
        assert!(format!("{}", SnapshotError::Decode("bad token".into())).contains("bad token"));
        assert!(format!("{}", SnapshotError::NoData).contains("No saved scene"));
    }

    #[test]
    fn test_missing_file_maps_to_no_data() {
        let err: SnapshotError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, SnapshotError::NoData));
    }
}
