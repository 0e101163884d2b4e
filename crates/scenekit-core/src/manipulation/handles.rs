//! Resize handles around a selected component.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle hit tolerance in canvas pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// One of the eight resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResizeHandle {
    Corner(Corner),
    Edge(Edge),
}

impl ResizeHandle {
    /// All handles in render order: `nw n ne w e sw s se`.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Corner(Corner::TopLeft),
        ResizeHandle::Edge(Edge::Top),
        ResizeHandle::Corner(Corner::TopRight),
        ResizeHandle::Edge(Edge::Left),
        ResizeHandle::Edge(Edge::Right),
        ResizeHandle::Corner(Corner::BottomLeft),
        ResizeHandle::Edge(Edge::Bottom),
        ResizeHandle::Corner(Corner::BottomRight),
    ];

    /// Compass token for the handle.
    pub fn token(&self) -> &'static str {
        match self {
            ResizeHandle::Corner(Corner::TopLeft) => "nw",
            ResizeHandle::Edge(Edge::Top) => "n",
            ResizeHandle::Corner(Corner::TopRight) => "ne",
            ResizeHandle::Edge(Edge::Left) => "w",
            ResizeHandle::Edge(Edge::Right) => "e",
            ResizeHandle::Corner(Corner::BottomLeft) => "sw",
            ResizeHandle::Edge(Edge::Bottom) => "s",
            ResizeHandle::Corner(Corner::BottomRight) => "se",
        }
    }

    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft | Corner::BottomLeft) | ResizeHandle::Edge(Edge::Left)
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopRight | Corner::BottomRight) | ResizeHandle::Edge(Edge::Right)
        )
    }

    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft | Corner::TopRight) | ResizeHandle::Edge(Edge::Top)
        )
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::BottomLeft | Corner::BottomRight) | ResizeHandle::Edge(Edge::Bottom)
        )
    }

    /// Position of this handle on a bounding box.
    pub fn position(&self, bounds: Rect) -> Point {
        let center = bounds.center();
        match self {
            ResizeHandle::Corner(Corner::TopLeft) => Point::new(bounds.x0, bounds.y0),
            ResizeHandle::Corner(Corner::TopRight) => Point::new(bounds.x1, bounds.y0),
            ResizeHandle::Corner(Corner::BottomLeft) => Point::new(bounds.x0, bounds.y1),
            ResizeHandle::Corner(Corner::BottomRight) => Point::new(bounds.x1, bounds.y1),
            ResizeHandle::Edge(Edge::Top) => Point::new(center.x, bounds.y0),
            ResizeHandle::Edge(Edge::Right) => Point::new(bounds.x1, center.y),
            ResizeHandle::Edge(Edge::Bottom) => Point::new(center.x, bounds.y1),
            ResizeHandle::Edge(Edge::Left) => Point::new(bounds.x0, center.y),
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ResizeHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|h| h.token() == s)
            .ok_or_else(|| format!("unknown resize handle '{s}'"))
    }
}

impl TryFrom<String> for ResizeHandle {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResizeHandle> for String {
    fn from(handle: ResizeHandle) -> Self {
        handle.token().to_string()
    }
}

/// What a pointer-down on a selected component starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Move the whole component.
    Drag,
    /// Resize from a handle.
    Resize(ResizeHandle),
}

/// A handle with its position on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub position: Point,
    pub kind: ResizeHandle,
}

impl Handle {
    /// Check if a canvas point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// All resize handles of a bounding box.
pub fn handles(bounds: Rect) -> Vec<Handle> {
    ResizeHandle::ALL
        .into_iter()
        .map(|kind| Handle { position: kind.position(bounds), kind })
        .collect()
}

/// Route a pointer-down: handles win over the body.
pub fn hit_test(bounds: Rect, point: Point, tolerance: f64) -> Option<GestureKind> {
    if let Some(handle) = handles(bounds).into_iter().find(|h| h.hit_test(point, tolerance)) {
        return Some(GestureKind::Resize(handle.kind));
    }
    bounds.contains(point).then_some(GestureKind::Drag)
}
