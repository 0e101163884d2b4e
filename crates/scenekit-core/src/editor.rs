//! Editing facade tying the store, the overlay and gesture tracking together.
//!
//! [`SceneEditor`] is the entry point for a UI layer: it routes pointer input
//! into a [`ManipulationSession`], writes gesture results and property edits
//! into the [`OverlayEditor`] working copy, and commits that copy back into
//! the [`SceneStore`] when [`SceneEditor::tick`] observes the quiet period.
//!
//! Benign races (editing with nothing selected, committing a deleted
//! component) are absorbed here and only logged.

use crate::commit::CommitOutcome;
use crate::config::EditorConfig;
use crate::error::{SceneError, SceneResult};
use crate::manipulation::{
    GestureKind, GestureOutcome, GestureState, HANDLE_HIT_TOLERANCE, ManipulationSession,
    ResizeHandle, hit_test,
};
use crate::overlay::{ComponentProperty, OverlayEditor};
use crate::scene::{SceneComponent, SceneId};
use crate::store::SceneStore;
use kurbo::{Point, Rect, Vec2};

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Scene editing state for one user.
#[derive(Debug, Clone)]
pub struct SceneEditor {
    store: SceneStore,
    overlay: OverlayEditor,
    session: ManipulationSession,
    config: EditorConfig,
}

impl Default for SceneEditor {
    fn default() -> Self {
        Self::new(SceneStore::default(), EditorConfig::default())
    }
}

impl SceneEditor {
    pub fn new(store: SceneStore, config: EditorConfig) -> Self {
        let guidelines = config.guidelines();
        Self {
            store,
            overlay: OverlayEditor::new(config.quiet_period(), guidelines.clone()),
            session: ManipulationSession::new(guidelines, config.throttle()),
            config,
        }
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Direct access to the authoritative scenes, bypassing the overlay.
    pub fn store_mut(&mut self) -> &mut SceneStore {
        &mut self.store
    }

    pub fn overlay(&self) -> &OverlayEditor {
        &self.overlay
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        let guidelines = config.guidelines();
        self.overlay.set_quiet_period(config.quiet_period());
        self.overlay.set_guidelines(guidelines.clone());
        self.session.set_guidelines(guidelines);
        self.session.set_throttle(config.throttle());
        self.config = config;
    }

    /// Id of the component whose overlay is shown.
    pub fn visible_overlay_id(&self) -> Option<&str> {
        self.overlay.visible_overlay_id()
    }

    /// The working copy of the selected component.
    pub fn overlay_object(&self) -> Option<&SceneComponent> {
        self.overlay.overlay_object()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.session.state()
    }

    /// Live rectangle of the gesture in progress.
    pub fn transient(&self) -> Option<Rect> {
        self.session.transient()
    }

    /// Select a component, replacing the overlay with a fresh working copy.
    ///
    /// Selecting the component that is already selected keeps the current
    /// working copy and its pending commit.
    pub fn select(&mut self, scene_id: &str, component_id: &str) -> SceneResult<()> {
        if self.overlay.scene_id() == Some(scene_id) && self.overlay.visible_overlay_id() == Some(component_id) {
            return Ok(());
        }
        let scene = self
            .store
            .scene(scene_id)
            .ok_or_else(|| SceneError::SceneNotFound(scene_id.to_string()))?;
        let component = scene
            .find(component_id)
            .ok_or_else(|| SceneError::NotFound(component_id.to_string()))?;
        self.session.cancel();
        self.overlay.select(scene_id, component);
        self.store.select_scene(scene_id)?;
        log::debug!("Selected {component_id} in scene {scene_id}");
        Ok(())
    }

    /// Clear the selection, discarding edits that have not been committed.
    pub fn deselect(&mut self) {
        self.session.cancel();
        self.overlay.deselect();
    }

    /// Edit one field of the working copy. A no-op when nothing is selected.
    pub fn update_property(&mut self, property: ComponentProperty, now: Instant) -> SceneResult<()> {
        absorb(self.overlay.update_property(property, now))
    }

    /// Start dragging the selected component. Returns false when nothing is selected.
    pub fn begin_drag(&mut self) -> bool {
        self.begin(GestureKind::Drag)
    }

    /// Start resizing the selected component from `handle`.
    pub fn begin_resize(&mut self, handle: ResizeHandle) -> bool {
        self.begin(GestureKind::Resize(handle))
    }

    fn begin(&mut self, kind: GestureKind) -> bool {
        match self.overlay.overlay_object() {
            Some(component) => {
                self.session.begin(component, kind);
                true
            }
            None => {
                log::debug!("Ignoring {kind:?} with no selection");
                false
            }
        }
    }

    /// Route a pointer press on the canvas.
    ///
    /// Handles and the body of the selected component start a resize or drag
    /// on it. Otherwise the topmost component under the pointer in the current
    /// scene is selected and dragged; empty canvas clears the selection.
    pub fn pointer_down(&mut self, point: Point) -> Option<GestureKind> {
        if let Some(component) = self.overlay.overlay_object() {
            if let Some(kind) = hit_test(component.bounds(), point, HANDLE_HIT_TOLERANCE) {
                self.session.begin(component, kind);
                return Some(kind);
            }
        }

        let scene_id: Option<SceneId> = self
            .overlay
            .scene_id()
            .map(str::to_string)
            .or_else(|| self.store.selected_scene().map(|s| s.id.clone()));
        let hit = scene_id.and_then(|scene_id| {
            let scene = self.store.scene(&scene_id)?;
            let component = scene.hit_test(point)?;
            Some((scene_id, component.id().to_string()))
        });

        match hit {
            Some((scene_id, component_id)) => {
                // Both ids were just read from the store.
                self.select(&scene_id, &component_id).ok()?;
                self.begin_drag().then_some(GestureKind::Drag)
            }
            None => {
                self.deselect();
                None
            }
        }
    }

    /// Feed a movement tick. `delta` is cumulative since the gesture began.
    pub fn on_move(&mut self, delta: Vec2, now: Instant) -> Option<Rect> {
        self.session.on_move(delta, now)
    }

    /// Finish the gesture and write its final geometry into the working copy.
    pub fn end_gesture(&mut self, now: Instant) -> SceneResult<Option<GestureOutcome>> {
        let Some(outcome) = self.session.end_gesture() else {
            return Ok(None);
        };
        absorb(self.overlay.apply_gesture(&outcome, now))?;
        Ok(Some(outcome))
    }

    pub fn cancel_gesture(&mut self) {
        self.session.cancel();
    }

    /// Advance the editor clock, committing the working copy once the quiet period has passed.
    pub fn tick(&mut self, now: Instant) -> SceneResult<Option<CommitOutcome>> {
        match self.overlay.poll_commit(now) {
            Some(intent) => self.store.commit(&intent),
            None => Ok(None),
        }
    }

    /// Add a component on top of a scene.
    pub fn insert_component(&mut self, scene_id: &str, component: impl Into<SceneComponent>) -> SceneResult<()> {
        self.store
            .scene_mut(scene_id)
            .ok_or_else(|| SceneError::SceneNotFound(scene_id.to_string()))?
            .insert(component)
    }

    /// Delete a component. If it is selected the overlay is cleared first.
    pub fn remove_component(&mut self, scene_id: &str, component_id: &str) -> SceneResult<SceneComponent> {
        let removed = self
            .store
            .scene_mut(scene_id)
            .ok_or_else(|| SceneError::SceneNotFound(scene_id.to_string()))?
            .remove(component_id)?;
        if self.overlay.scene_id() == Some(scene_id) && self.overlay.visible_overlay_id() == Some(component_id) {
            self.deselect();
        }
        log::debug!("Removed {component_id} from scene {scene_id}");
        Ok(removed)
    }
}

/// Swallow errors that only signal a benign race.
fn absorb(result: SceneResult<()>) -> SceneResult<()> {
    match result {
        Err(e) if e.is_recoverable() => {
            log::debug!("Ignored: {e}");
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manipulation::Corner;
    use crate::scene::{Scene, SceneBase, SceneText};

    #[cfg(not(target_arch = "wasm32"))]
    use std::time::Duration;

    #[cfg(target_arch = "wasm32")]
    use web_time::Duration;

    fn editor() -> SceneEditor {
        let mut scene = Scene::new("Intro", 90).unwrap().with_id("s1");
        scene
            .insert(SceneText::new(SceneBase::new("t1", 100, 100, 200, 100).with_frames(0, 90), "A"))
            .unwrap();
        scene
            .insert(SceneText::new(SceneBase::new("t2", 1000, 600, 200, 100).with_frames(0, 90), "B"))
            .unwrap();
        let mut store = SceneStore::new();
        store.add_scene(scene).unwrap();
        SceneEditor::new(store, EditorConfig::default())
    }

    fn authoritative(editor: &SceneEditor, id: &str) -> SceneComponent {
        editor.store().scene("s1").unwrap().find(id).unwrap().clone()
    }

    #[test]
    fn test_select_unknown_ids() {
        let mut editor = editor();
        assert_eq!(editor.select("nope", "t1"), Err(SceneError::SceneNotFound("nope".into())));
        assert_eq!(editor.select("s1", "nope"), Err(SceneError::NotFound("nope".into())));
        assert!(editor.visible_overlay_id().is_none());
    }

    #[test]
    fn test_update_without_selection_is_noop() {
        let mut editor = editor();
        assert!(editor.update_property(ComponentProperty::Left(5.0), Instant::now()).is_ok());
        assert!(!editor.begin_drag());
    }

    #[test]
    fn test_update_commits_after_quiet_period() {
        let mut editor = editor();
        let t0 = Instant::now();
        editor.select("s1", "t1").unwrap();
        editor.update_property(ComponentProperty::Top(300.0), t0).unwrap();
        assert_eq!(editor.tick(t0 + Duration::from_millis(500)).unwrap(), None);
        assert_eq!(authoritative(&editor, "t1").base().top, 100);
        assert_eq!(
            editor.tick(t0 + Duration::from_millis(1000)).unwrap(),
            Some(CommitOutcome::Applied)
        );
        assert_eq!(authoritative(&editor, "t1").base().top, 300);
    }

    #[test]
    fn test_pointer_down_routes_to_handles_and_body() {
        let mut editor = editor();
        // Empty canvas.
        assert_eq!(editor.pointer_down(Point::new(700.0, 900.0)), None);
        // Body of t2 selects it and starts a drag.
        assert_eq!(editor.pointer_down(Point::new(1100.0, 650.0)), Some(GestureKind::Drag));
        assert_eq!(editor.visible_overlay_id(), Some("t2"));
        editor.cancel_gesture();
        // Bottom-right handle of the selection.
        assert_eq!(
            editor.pointer_down(Point::new(1200.0, 700.0)),
            Some(GestureKind::Resize(ResizeHandle::Corner(Corner::BottomRight)))
        );
        assert_eq!(editor.gesture_state(), GestureState::Resizing);
    }

    #[test]
    fn test_drag_commits_snapped_position() {
        let mut editor = editor();
        let t0 = Instant::now();
        editor.select("s1", "t1").unwrap();
        assert!(editor.begin_drag());
        editor.on_move(Vec2::new(100.0, 50.0), t0);
        editor.on_move(Vec2::new(377.0, 167.0), t0 + Duration::from_millis(16));
        // The authoritative scene is untouched mid-gesture.
        assert_eq!(authoritative(&editor, "t1").base().left, 100);
        let outcome = editor.end_gesture(t0 + Duration::from_millis(20)).unwrap().unwrap();
        assert_eq!(outcome.rect.origin(), Point::new(480.0, 270.0));
        editor.tick(t0 + Duration::from_millis(1020)).unwrap();
        let base = authoritative(&editor, "t1").base().clone();
        assert_eq!((base.left, base.top, base.width, base.height), (480, 270, 200, 100));
    }

    #[test]
    fn test_remove_selected_clears_overlay() {
        let mut editor = editor();
        let t0 = Instant::now();
        editor.select("s1", "t1").unwrap();
        editor.update_property(ComponentProperty::Left(700.0), t0).unwrap();
        editor.remove_component("s1", "t1").unwrap();
        assert!(editor.visible_overlay_id().is_none());
        assert_eq!(editor.tick(t0 + Duration::from_secs(5)).unwrap(), None);
        assert!(editor.store().scene("s1").unwrap().find("t1").is_none());
    }

    #[test]
    fn test_out_of_range_update_is_rejected_without_panicking() {
        let mut editor = editor();
        let t0 = Instant::now();
        editor.select("s1", "t1").unwrap();
        let result = editor.update_property(ComponentProperty::Left(3.0e9), t0);
        assert!(matches!(result, Err(SceneError::InvalidGeometry(_))));
        assert!(editor.begin_drag());
        editor.on_move(Vec2::new(5.0, 0.0), t0);
        editor.end_gesture(t0).unwrap();
        editor.tick(t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(authoritative(&editor, "t1").base().left, 105);
    }

    #[test]
    fn test_insert_component() {
        let mut editor = editor();
        editor
            .insert_component("s1", SceneText::new(SceneBase::new("t3", 0, 0, 10, 10), "C"))
            .unwrap();
        assert_eq!(editor.store().scene("s1").unwrap().component_ids(), vec!["t1", "t2", "t3"]);
        assert!(editor.insert_component("s9", SceneText::new(SceneBase::new("t4", 0, 0, 10, 10), "D")).is_err());
    }
}
