//! Direct manipulation: drag and resize gestures on the selected component.
//!
//! A [`ManipulationSession`] turns raw pointer deltas into live, snapped
//! rectangles while a gesture is in progress and produces the final geometry
//! when it ends. It never touches the working copy itself; the caller writes
//! the [`GestureOutcome`] through the overlay's property interface.

mod handles;

pub use handles::{
    Corner, Edge, GestureKind, HANDLE_HIT_TOLERANCE, Handle, ResizeHandle, handles, hit_test,
};

use crate::overlay::ComponentProperty;
use crate::scene::{ComponentId, SceneComponent};
use crate::snap::{Guidelines, SnapDirection, snap_rect};
use kurbo::{Rect, Vec2};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default minimum interval between live updates.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(1);

/// Smallest width/height a resize can produce, in pixels.
pub const MIN_SIZE: f64 = 1.0;

/// Coarse state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
    Resizing,
}

/// An in-progress gesture.
#[derive(Debug, Clone)]
struct ActiveGesture {
    component_id: ComponentId,
    kind: GestureKind,
    /// Bounds of the component when the gesture started.
    origin: Rect,
    /// Latest cumulative pointer delta; `None` until the first movement.
    last_delta: Option<Vec2>,
    /// Latest live rectangle (visual only).
    transient: Option<Rect>,
    /// When the last live rectangle was handed out for rendering.
    last_emit: Option<Instant>,
}

/// Final geometry of a completed gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureOutcome {
    pub component_id: ComponentId,
    pub kind: GestureKind,
    pub rect: Rect,
}

impl GestureOutcome {
    /// Property writes that apply this outcome to a working copy.
    ///
    /// For a resize the edges are truncated first and the size is derived from
    /// them, so the anchored edges land exactly where they started.
    pub fn updates(&self) -> Vec<ComponentProperty> {
        let left = self.rect.x0.trunc();
        let top = self.rect.y0.trunc();
        match self.kind {
            GestureKind::Drag => vec![ComponentProperty::Top(top), ComponentProperty::Left(left)],
            GestureKind::Resize(_) => vec![
                ComponentProperty::Width((self.rect.x1.trunc() - left).max(MIN_SIZE)),
                ComponentProperty::Height((self.rect.y1.trunc() - top).max(MIN_SIZE)),
                ComponentProperty::Top(top),
                ComponentProperty::Left(left),
            ],
        }
    }
}

/// Tracks one drag or resize gesture at a time.
#[derive(Debug, Clone)]
pub struct ManipulationSession {
    active: Option<ActiveGesture>,
    /// Guidelines to snap against; `None` disables snapping.
    guidelines: Option<Guidelines>,
    throttle: Duration,
}

impl Default for ManipulationSession {
    fn default() -> Self {
        Self::new(Some(Guidelines::default()), DEFAULT_THROTTLE)
    }
}

impl ManipulationSession {
    pub fn new(guidelines: Option<Guidelines>, throttle: Duration) -> Self {
        Self {
            active: None,
            guidelines,
            throttle,
        }
    }

    pub fn state(&self) -> GestureState {
        match &self.active {
            None => GestureState::Idle,
            Some(g) if g.kind == GestureKind::Drag => GestureState::Dragging,
            Some(_) => GestureState::Resizing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the component being manipulated.
    pub fn target(&self) -> Option<&str> {
        self.active.as_ref().map(|g| g.component_id.as_str())
    }

    /// Latest live rectangle of the gesture, for rendering.
    pub fn transient(&self) -> Option<Rect> {
        self.active.as_ref().and_then(|g| g.transient)
    }

    pub fn begin_drag(&mut self, component: &SceneComponent) {
        self.begin(component, GestureKind::Drag);
    }

    pub fn begin_resize(&mut self, component: &SceneComponent, handle: ResizeHandle) {
        self.begin(component, GestureKind::Resize(handle));
    }

    /// Start a gesture on `component`. An active gesture is cancelled first.
    pub fn begin(&mut self, component: &SceneComponent, kind: GestureKind) {
        if self.active.is_some() {
            self.cancel();
        }
        log::debug!("Gesture {:?} started on {}", kind, component.id());
        self.active = Some(ActiveGesture {
            component_id: component.id().to_string(),
            kind,
            origin: component.bounds(),
            last_delta: None,
            transient: None,
            last_emit: None,
        });
    }

    /// Record a movement tick. `delta` is the cumulative pointer offset since the gesture began.
    ///
    /// Returns the live rectangle when it should be re-rendered; ticks closer
    /// together than the throttle interval are coalesced.
    pub fn on_move(&mut self, delta: Vec2, now: Instant) -> Option<Rect> {
        let guidelines = self.guidelines.as_ref();
        let throttle = self.throttle;
        let gesture = self.active.as_mut()?;
        let rect = resolve(gesture.origin, gesture.kind, delta, guidelines);
        gesture.last_delta = Some(delta);
        gesture.transient = Some(rect);

        let due = gesture
            .last_emit
            .is_none_or(|last| now.saturating_duration_since(last) >= throttle);
        if !due {
            return None;
        }
        gesture.last_emit = Some(now);
        Some(rect)
    }

    /// Finish the gesture. Returns `None` if it never moved.
    pub fn end_gesture(&mut self) -> Option<GestureOutcome> {
        let gesture = self.active.take()?;
        let Some(delta) = gesture.last_delta else {
            log::debug!("Gesture on {} ended without movement", gesture.component_id);
            return None;
        };
        let rect = resolve(gesture.origin, gesture.kind, delta, self.guidelines.as_ref());
        log::debug!("Gesture {:?} on {} ended at {:?}", gesture.kind, gesture.component_id, rect);
        Some(GestureOutcome {
            component_id: gesture.component_id,
            kind: gesture.kind,
            rect,
        })
    }

    /// Abandon the gesture without producing an outcome.
    pub fn cancel(&mut self) {
        if let Some(gesture) = self.active.take() {
            log::debug!("Gesture on {} cancelled", gesture.component_id);
        }
    }

    pub fn set_guidelines(&mut self, guidelines: Option<Guidelines>) {
        self.guidelines = guidelines;
    }

    pub fn set_throttle(&mut self, throttle: Duration) {
        self.throttle = throttle;
    }
}

/// Apply a cumulative delta to the starting bounds and snap the result.
fn resolve(origin: Rect, kind: GestureKind, delta: Vec2, guidelines: Option<&Guidelines>) -> Rect {
    match kind {
        GestureKind::Drag => {
            let moved = origin + delta;
            match guidelines {
                Some(g) => snap_rect(moved, SnapDirection::Move, g).rect,
                None => moved,
            }
        }
        GestureKind::Resize(handle) => {
            let raw = apply_resize(origin, handle, delta);
            let Some(g) = guidelines else {
                return raw;
            };
            let mut snapped = snap_rect(raw, SnapDirection::Resize(handle), g).rect;
            // A snap must not collapse the box; fall back to the raw edges on that axis.
            if snapped.width() < MIN_SIZE {
                snapped.x0 = raw.x0;
                snapped.x1 = raw.x1;
            }
            if snapped.height() < MIN_SIZE {
                snapped.y0 = raw.y0;
                snapped.y1 = raw.y1;
            }
            snapped
        }
    }
}

/// Move the edges adjacent to `handle` by `delta`, keeping the opposite edges fixed.
fn apply_resize(origin: Rect, handle: ResizeHandle, delta: Vec2) -> Rect {
    let mut r = origin;
    if handle.moves_left() {
        r.x0 = (origin.x0 + delta.x).min(origin.x1 - MIN_SIZE);
    }
    if handle.moves_right() {
        r.x1 = (origin.x1 + delta.x).max(origin.x0 + MIN_SIZE);
    }
    if handle.moves_top() {
        r.y0 = (origin.y0 + delta.y).min(origin.y1 - MIN_SIZE);
    }
    if handle.moves_bottom() {
        r.y1 = (origin.y1 + delta.y).max(origin.y0 + MIN_SIZE);
    }
    r
}
