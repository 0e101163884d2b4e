//! Overlay edit buffer for the selected component.
//!
//! The buffer owns a detached working copy of the selected component. Edits
//! only touch that copy; each one re-arms a debounce so that a burst of
//! updates (for example one per drag tick) yields a single commit intent
//! once input has been quiet for the configured period.

mod debounce;
mod property;

pub use debounce::{DEFAULT_QUIET_PERIOD, Debounce};
pub use property::ComponentProperty;

use crate::commit::CommitIntent;
use crate::error::{SceneError, SceneResult};
use crate::manipulation::{GestureOutcome, MIN_SIZE};
use crate::scene::{SceneComponent, SceneId};
use crate::snap::Guidelines;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// The selected component and the scene it belongs to.
#[derive(Debug, Clone)]
struct Selection {
    scene_id: SceneId,
    working_copy: SceneComponent,
}

/// Holds the working copy of the selected component and schedules commits.
#[derive(Debug, Clone)]
pub struct OverlayEditor {
    selection: Option<Selection>,
    debounce: Debounce,
    /// Guidelines applied to geometry updates; `None` disables snapping.
    guidelines: Option<Guidelines>,
    /// Bumped on every change to the working copy.
    revision: u64,
}

impl Default for OverlayEditor {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD, Some(Guidelines::default()))
    }
}

impl OverlayEditor {
    pub fn new(quiet_period: Duration, guidelines: Option<Guidelines>) -> Self {
        Self {
            selection: None,
            debounce: Debounce::new(quiet_period),
            guidelines,
            revision: 0,
        }
    }

    /// Id of the component whose overlay is shown.
    pub fn visible_overlay_id(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.working_copy.id())
    }

    /// The working copy, if a component is selected.
    pub fn overlay_object(&self) -> Option<&SceneComponent> {
        self.selection.as_ref().map(|s| &s.working_copy)
    }

    /// Scene of the selected component.
    pub fn scene_id(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.scene_id.as_str())
    }

    /// Monotonic counter that changes whenever the working copy is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether a commit is scheduled.
    pub fn has_pending_commit(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn set_guidelines(&mut self, guidelines: Option<Guidelines>) {
        self.guidelines = guidelines;
    }

    pub fn set_quiet_period(&mut self, quiet_period: Duration) {
        self.debounce.set_quiet_period(quiet_period);
    }

    /// Select a component, taking a deep copy of it. Any pending commit is discarded.
    pub fn select(&mut self, scene_id: impl Into<SceneId>, component: &SceneComponent) {
        if self.debounce.is_pending() {
            log::debug!("Discarding pending commit for {:?}", self.visible_overlay_id());
        }
        self.debounce.cancel();
        self.selection = Some(Selection {
            scene_id: scene_id.into(),
            working_copy: component.clone(),
        });
        self.revision += 1;
    }

    /// Drop the working copy. Pending edits are discarded, not flushed.
    pub fn deselect(&mut self) {
        if self.selection.take().is_some() {
            if self.debounce.is_pending() {
                log::debug!("Deselected with a pending commit; edits discarded");
            }
            self.debounce.cancel();
            self.revision += 1;
        }
    }

    /// Update one field of the working copy and re-arm the commit timer.
    ///
    /// Geometry values are snapped to the guidelines when snapping is enabled:
    /// `left`/`top` snap the leading edge, `width`/`height` the trailing edge.
    pub fn update_property(&mut self, property: ComponentProperty, now: Instant) -> SceneResult<()> {
        let selection = self.selection.as_ref().ok_or(SceneError::SelectionMismatch)?;
        let property = match &self.guidelines {
            Some(guidelines) => snap_property(property, &selection.working_copy, guidelines),
            None => property,
        };
        self.write(&[property], now)
    }

    /// Write the final geometry of a gesture into the working copy without re-snapping.
    pub fn apply_gesture(&mut self, outcome: &GestureOutcome, now: Instant) -> SceneResult<()> {
        match self.visible_overlay_id() {
            Some(id) if id == outcome.component_id => self.write(&outcome.updates(), now),
            _ => Err(SceneError::SelectionMismatch),
        }
    }

    /// Fire the commit intent once the quiet period has elapsed.
    pub fn poll_commit(&mut self, now: Instant) -> Option<CommitIntent> {
        if !self.debounce.poll(now) {
            return None;
        }
        self.selection.as_ref().map(|s| CommitIntent {
            scene_id: s.scene_id.clone(),
            component: s.working_copy.clone(),
        })
    }

    /// Apply `properties` as one replacement of the working copy.
    fn write(&mut self, properties: &[ComponentProperty], now: Instant) -> SceneResult<()> {
        let selection = self.selection.as_mut().ok_or(SceneError::SelectionMismatch)?;
        let mut next = selection.working_copy.clone();
        for property in properties {
            next = property.apply(&next).inspect_err(|e| {
                log::warn!("Rejected update of '{}' on {}: {}", property.key(), next.id(), e);
            })?;
        }
        selection.working_copy = next;
        self.revision += 1;
        self.debounce.arm(now);
        Ok(())
    }
}

/// Snap a geometry update against the guidelines, using the working copy for the fixed edge.
///
/// A size whose snapped trailing edge would collapse the box keeps the requested value.
fn snap_property(property: ComponentProperty, current: &SceneComponent, guidelines: &Guidelines) -> ComponentProperty {
    let base = current.base();
    let snap_size = |start: f64, size: f64, snap: &dyn Fn(f64) -> f64| {
        let snapped = snap(start + size) - start;
        if snapped < MIN_SIZE { size } else { snapped }
    };
    match property {
        ComponentProperty::Left(x) => ComponentProperty::Left(guidelines.snap_x(x)),
        ComponentProperty::Top(y) => ComponentProperty::Top(guidelines.snap_y(y)),
        ComponentProperty::Width(w) => {
            ComponentProperty::Width(snap_size(f64::from(base.left), w, &|x| guidelines.snap_x(x)))
        }
        ComponentProperty::Height(h) => {
            ComponentProperty::Height(snap_size(f64::from(base.top), h, &|y| guidelines.snap_y(y)))
        }
        other => other,
    }
}
