use thiserror::Error;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown material '{name}' referenced by object {object}")]
    UnknownMaterial { name: String, object: usize },

    #[error("Material index {0} is out of range")]
    MaterialIndex(usize),

    #[error("Duplicate material name '{0}'")]
    DuplicateMaterial(String),

    #[error("Invalid {shape} in object {object}: {reason}")]
    InvalidShape {
        shape: &'static str,
        object: usize,
        reason: String,
    },

    #[error("Degenerate transform on object {0}")]
    DegenerateTransform(usize),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
