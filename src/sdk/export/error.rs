use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// A route needs a start and an end point to be drawn or linked.
    #[error("Route has {found} polyline point(s); at least 2 are required")]
    InsufficientPoints { found: usize },

    /// Local write or remote upload failed. Artifacts written before the
    /// failure are left in place.
    #[error("Failed to write {key}: {reason}")]
    SinkWrite { key: String, reason: String },

    #[error("Failed to serialize route metadata: {0}")]
    Serialize(#[from] serde_json::Error),
}
