//! Include graph error types.

use std::path::PathBuf;

/// Errors that can occur while resolving an include graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A schema file could not be opened or read.
    #[error("unable to read file \"{}\"", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include chain leads back to a file that is still being resolved.
    #[error("circular include: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}

/// Result type alias for include graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
