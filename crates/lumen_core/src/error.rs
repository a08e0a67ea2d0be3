use thiserror::Error;

use crate::material::MaterialId;

/// Errors raised while building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid material: {reason}")]
    InvalidMaterial { reason: String },

    #[error("Unknown {0}: not registered with this scene")]
    UnknownMaterial(MaterialId),
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;
