//! The authoritative list of scenes in a project.

use crate::commit::{CommitIntent, CommitOutcome, commit};
use crate::error::{SceneError, SceneResult};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};

/// Ordered scenes of a project. At most one scene is selected at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneStore {
    scenes: Vec<Scene>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene. The first scene added becomes the selected one.
    pub fn add_scene(&mut self, mut scene: Scene) -> SceneResult<()> {
        if self.scene(&scene.id).is_some() {
            return Err(SceneError::InvalidGeometry(format!("duplicate scene id {}", scene.id)));
        }
        scene.selected = self.scenes.is_empty();
        log::debug!("Added scene {} ({})", scene.id, scene.title);
        self.scenes.push(scene);
        Ok(())
    }

    /// Remove a scene. If it was selected, the first remaining scene is selected instead.
    pub fn remove_scene(&mut self, id: &str) -> SceneResult<Scene> {
        let index = self
            .scenes
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SceneError::SceneNotFound(id.to_string()))?;
        let removed = self.scenes.remove(index);
        if removed.selected {
            if let Some(first) = self.scenes.first_mut() {
                first.selected = true;
            }
        }
        Ok(removed)
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn scene_mut(&mut self, id: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == id)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Mark exactly one scene as selected.
    pub fn select_scene(&mut self, id: &str) -> SceneResult<()> {
        if self.scene(id).is_none() {
            return Err(SceneError::SceneNotFound(id.to_string()));
        }
        for scene in &mut self.scenes {
            scene.selected = scene.id == id;
        }
        Ok(())
    }

    pub fn selected_scene(&self) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.selected)
    }

    /// Sum of all scene durations.
    pub fn total_duration_in_frames(&self) -> u64 {
        self.scenes.iter().map(|s| u64::from(s.duration_in_frames)).sum()
    }

    /// Reconcile a working copy into its scene.
    ///
    /// A commit whose scene or component has been deleted in the meantime is
    /// dropped and reported as `Ok(None)`.
    pub fn commit(&mut self, intent: &CommitIntent) -> SceneResult<Option<CommitOutcome>> {
        let Some(scene) = self.scene_mut(&intent.scene_id) else {
            log::debug!("Dropping commit for {}: scene {} is gone", intent.component.id(), intent.scene_id);
            return Ok(None);
        };
        match commit(scene, &intent.component) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(SceneError::NotFound(id)) => {
                log::debug!("Dropping commit for deleted component {id}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a store and check every scene and component invariant.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let store: SceneStore =
            serde_json::from_str(json).map_err(|e| SceneError::InvalidData(e.to_string()))?;
        store.validate()?;
        Ok(store)
    }

    /// Check that scene ids are unique, at most one scene is selected and every scene is valid.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, scene) in self.scenes.iter().enumerate() {
            scene.validate()?;
            if self.scenes[..index].iter().any(|s| s.id == scene.id) {
                return Err(SceneError::InvalidData(format!("duplicate scene id {}", scene.id)));
            }
        }
        let selected = self.scenes.iter().filter(|s| s.selected).count();
        if selected > 1 {
            return Err(SceneError::InvalidData(format!("{selected} scenes are selected")));
        }
        Ok(())
    }
}
