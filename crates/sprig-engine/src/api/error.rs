use crate::assets::content::ResourceKind;

/// Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Everything that can go wrong in the engine core.
///
/// Errors propagate to the immediate caller (a load or frame routine); the
/// engine never retries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("tween duration must be a positive, finite number of seconds (got {0})")]
    InvalidDuration(f64),

    #[error("invalid frame animation: {0}")]
    InvalidAnimation(&'static str),

    #[error("malformed resource path \"{0}\": expected a bundle:// or local:// prefix")]
    InvalidPath(String),

    #[error("{feature} is not available for the {mode} geometry mode")]
    NotSupported {
        feature: &'static str,
        mode: &'static str,
    },

    #[error("can't create a {kind:?} resource with path \"{path}\"")]
    UnsupportedResource { kind: ResourceKind, path: String },

    #[error("can't load texture \"{path}\": {reason}")]
    TextureLoad { path: String, reason: String },

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("manifest refers to unknown {kind} \"{name}\"")]
    UnknownAsset { kind: &'static str, name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("renderer: {0}")]
    Frame(&'static str),

    #[error("game is already loaded")]
    AlreadyLoaded,

    #[error("game must be loaded before {0}")]
    NotLoaded(&'static str),

    #[error("unknown script type \"{0}\"")]
    UnknownType(String),

    #[error("type \"{type_name}\" has no field \"{field}\"")]
    UnknownField { type_name: String, field: String },

    #[error("bad arguments for \"{type_name}\": {message}")]
    ScriptArgument {
        type_name: &'static str,
        message: String,
    },

    #[error("no tween behind handle {0}")]
    InvalidHandle(u32),
}
