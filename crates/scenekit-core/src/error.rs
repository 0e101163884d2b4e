//! Error types for scene editing.

use thiserror::Error;

/// Errors raised by the scene model and the editing pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// No component with this id exists in the scene.
    #[error("Component not found: {0}")]
    NotFound(String),
    /// No scene with this id exists in the store.
    #[error("Scene not found: {0}")]
    SceneNotFound(String),
    /// A mutation would produce a non-positive size, duration or an inverted frame range.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A property update was attempted with no active selection.
    #[error("No component is selected")]
    SelectionMismatch,
    /// The property does not exist on this kind of component.
    #[error("Property '{property}' is not supported on {kind} components")]
    UnsupportedProperty {
        property: &'static str,
        kind: &'static str,
    },
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// Loaded scene data is malformed or breaks a model invariant.
    #[error("Invalid scene data: {0}")]
    InvalidData(String),
}

impl SceneError {
    /// Whether the error is a benign race or no-op that the editing boundary absorbs.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SceneError::NotFound(_) | SceneError::SceneNotFound(_) | SceneError::SelectionMismatch
        )
    }
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
