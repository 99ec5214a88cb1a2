use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A read that does not compact on its own ran against a stale matrix.
    #[error("graph has staged edits that are not compacted")]
    NotCompacted,

    #[error("unknown node id: {id}")]
    UnknownNode { id: usize },

    #[error("no node at position ({x}, {y}, {z})")]
    UnknownPosition { x: f32, y: f32, z: f32 },

    #[error("invalid aggregation kind: {0}")]
    InvalidAggregationKind(i32),

    #[error("shape mismatch in {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        got: usize,
    },

    #[error("node id {id} exceeds the largest exportable id {max}")]
    IdOutOfRange { id: usize, max: usize },

    #[error("node id {id} already has a position")]
    PositionTaken { id: usize },

    #[error("placeholder nodes are disabled; id {id} was never registered")]
    PlaceholderRejected { id: usize },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for GraphError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
