//! Reconciling a working copy back into its authoritative scene.

use crate::error::{SceneError, SceneResult};
use crate::scene::{Scene, SceneComponent, SceneId};

/// A request, produced when the quiet period elapses, to write a working copy back.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitIntent {
    pub scene_id: SceneId,
    pub component: SceneComponent,
}

/// What a commit did to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The component was overwritten with a different value.
    Applied,
    /// The working copy matched the scene; nothing changed.
    Unchanged,
}

/// Replace the component with the working copy's id, keeping its z-order slot.
///
/// Fails with [`SceneError::NotFound`] and leaves the scene untouched when the
/// component no longer exists.
pub fn commit(scene: &mut Scene, working_copy: &SceneComponent) -> SceneResult<CommitOutcome> {
    let slot = scene
        .find_mut(working_copy.id())
        .ok_or_else(|| SceneError::NotFound(working_copy.id().to_string()))?;
    if *slot == *working_copy {
        return Ok(CommitOutcome::Unchanged);
    }
    *slot = working_copy.clone();
    log::debug!("Committed {} into scene {}", working_copy.id(), scene.id);
    Ok(CommitOutcome::Applied)
}
