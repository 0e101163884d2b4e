//! Snap functionality for aligning component edges to canvas guidelines.

use crate::manipulation::ResizeHandle;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Logical canvas width in pixels.
pub const CANVAS_WIDTH: f64 = 1920.0;
/// Logical canvas height in pixels.
pub const CANVAS_HEIGHT: f64 = 1080.0;

/// Vertical guidelines (x positions): quarter divisions of the canvas width.
pub const VERTICAL_GUIDELINES: [f64; 5] = [0.0, 480.0, 960.0, 1440.0, 1920.0];
/// Horizontal guidelines (y positions): quarter divisions of the canvas height.
pub const HORIZONTAL_GUIDELINES: [f64; 5] = [0.0, 270.0, 540.0, 810.0, 1080.0];

/// Distance (inclusive) within which an edge snaps to a guideline.
pub const SNAP_TOLERANCE: f64 = 10.0;

/// A set of guidelines and the tolerance used to snap to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guidelines {
    /// x positions of vertical lines, ascending.
    pub vertical: Vec<f64>,
    /// y positions of horizontal lines, ascending.
    pub horizontal: Vec<f64>,
    pub tolerance: f64,
}

impl Default for Guidelines {
    fn default() -> Self {
        Self {
            vertical: VERTICAL_GUIDELINES.to_vec(),
            horizontal: HORIZONTAL_GUIDELINES.to_vec(),
            tolerance: SNAP_TOLERANCE,
        }
    }
}

impl Guidelines {
    pub fn new(vertical: Vec<f64>, horizontal: Vec<f64>, tolerance: f64) -> Self {
        Self { vertical, horizontal, tolerance }
    }

    /// Snap an x coordinate against the vertical lines.
    pub fn snap_x(&self, x: f64) -> f64 {
        snap_value(x, &self.vertical, self.tolerance)
    }

    /// Snap a y coordinate against the horizontal lines.
    pub fn snap_y(&self, y: f64) -> f64 {
        snap_value(y, &self.horizontal, self.tolerance)
    }
}

/// Which edges of a rectangle take part in snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapDirection {
    /// Whole-body drag: every edge is a candidate, size is preserved.
    Move,
    /// Resize: only the edges adjacent to the handle move.
    Resize(ResizeHandle),
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The corrected rectangle.
    pub rect: Rect,
    /// Whether an x edge was snapped.
    pub snapped_x: bool,
    /// Whether a y edge was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(rect: Rect) -> Self {
        Self {
            rect,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Nearest guideline within `tolerance` of `value`; equidistant lines resolve to the lower one.
pub fn nearest_guideline(value: f64, lines: &[f64], tolerance: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &line in lines {
        let dist = (value - line).abs();
        if dist > tolerance {
            continue;
        }
        best = match best {
            Some((best_dist, best_line)) if dist > best_dist || (dist == best_dist && line >= best_line) => {
                Some((best_dist, best_line))
            }
            _ => Some((dist, line)),
        };
    }
    best.map(|(_, line)| line)
}

/// Snap a single coordinate, returning it unchanged when no guideline is close enough.
pub fn snap_value(value: f64, lines: &[f64], tolerance: f64) -> f64 {
    nearest_guideline(value, lines, tolerance).unwrap_or(value)
}

/// Snap a rectangle's edges for the given gesture direction.
///
/// Axes are snapped independently. The input is never modified; for resizes
/// only the active edges move and the opposite edges stay fixed.
pub fn snap_rect(rect: Rect, direction: SnapDirection, guidelines: &Guidelines) -> SnapResult {
    let tolerance = guidelines.tolerance;
    match direction {
        SnapDirection::Move => {
            let (x0, x1, snapped_x) = snap_span(rect.x0, rect.x1, &guidelines.vertical, tolerance);
            let (y0, y1, snapped_y) = snap_span(rect.y0, rect.y1, &guidelines.horizontal, tolerance);
            SnapResult {
                rect: Rect::new(x0, y0, x1, y1),
                snapped_x,
                snapped_y,
            }
        }
        SnapDirection::Resize(handle) => {
            let mut out = rect;
            let mut snapped_x = false;
            let mut snapped_y = false;
            let snap_edge = |edge: &mut f64, active: bool, lines: &[f64], flag: &mut bool| {
                if !active {
                    return;
                }
                if let Some(line) = nearest_guideline(*edge, lines, tolerance) {
                    *flag |= line != *edge;
                    *edge = line;
                }
            };
            snap_edge(&mut out.x0, handle.moves_left(), &guidelines.vertical, &mut snapped_x);
            snap_edge(&mut out.x1, handle.moves_right(), &guidelines.vertical, &mut snapped_x);
            snap_edge(&mut out.y0, handle.moves_top(), &guidelines.horizontal, &mut snapped_y);
            snap_edge(&mut out.y1, handle.moves_bottom(), &guidelines.horizontal, &mut snapped_y);
            SnapResult {
                rect: out,
                snapped_x,
                snapped_y,
            }
        }
    }
}

/// Translate a span so its closest edge lands on a guideline, keeping its length.
fn snap_span(start: f64, end: f64, lines: &[f64], tolerance: f64) -> (f64, f64, bool) {
    let length = end - start;
    let candidate = |edge: f64| nearest_guideline(edge, lines, tolerance).map(|line| ((edge - line).abs(), line));

    let chosen = match (candidate(start), candidate(end)) {
        (Some(lead), Some(trail)) => {
            if trail.0 < lead.0 || (trail.0 == lead.0 && trail.1 < lead.1) {
                Some((trail, false))
            } else {
                Some((lead, true))
            }
        }
        (Some(lead), None) => Some((lead, true)),
        (None, Some(trail)) => Some((trail, false)),
        (None, None) => None,
    };

    match chosen {
        // Already on a guideline: leave the span exactly as it is.
        Some(((dist, _), _)) if dist == 0.0 => (start, end, false),
        Some(((_, line), true)) => (line, line + length, true),
        Some(((_, line), false)) => (line - length, line, true),
        None => (start, end, false),
    }
}
