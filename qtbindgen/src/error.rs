use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the transformation pipeline.
///
/// A missing class or enum means the upstream Qt API changed shape and the
/// transformation rules are stale. There is no recovery path for that:
/// silently skipping a rule would ship an incorrect binding surface, so the
/// run must abort. Optional members (version-dependent methods, conversion
/// operators) are handled as no-ops by the passes and never reach here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("class '{0}' not found in the declaration graph")]
    ClassNotFound(String),

    #[error("enum '{enumeration}' not found in class '{class}'")]
    EnumNotFound { class: String, enumeration: String },

    #[error("invalid target triple '{triple}': {message}")]
    Target { triple: String, message: String },

    #[error("failed to parse configuration {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
