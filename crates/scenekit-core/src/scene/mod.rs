//! Scene object model: scenes and their positioned text/media components.
//!
//! This layer is pure data. Component order is z-order (later = on top) and
//! no coordinate transforms happen here; all geometry is in canvas pixels.

mod media;
mod text;

pub use media::{MediaFit, MediaType, SceneMedia};
pub use text::{
    FontStyle, FontWeight, SceneText, TextAlign, TextAlignVertical, TextDecoration, TextTransform,
};

use crate::error::{SceneError, SceneResult};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a component, unique within its scene.
pub type ComponentId = String;

/// Identifier of a scene.
pub type SceneId = String;

/// Generate a fresh component or scene identifier.
pub fn new_component_id() -> ComponentId {
    Uuid::new_v4().to_string()
}

/// Fields shared by every scene component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneBase {
    pub id: ComponentId,
    /// First frame on which the component is shown.
    pub from: u32,
    /// Last frame on which the component is shown (inclusive).
    pub to: u32,
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
    /// Animation name tokens, applied in order.
    #[serde(default)]
    pub animations: Vec<String>,
}

impl SceneBase {
    /// Create a base spanning frames `0..=to` at the given canvas rectangle.
    pub fn new(id: impl Into<ComponentId>, left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            id: id.into(),
            from: 0,
            to: 0,
            top,
            left,
            width,
            height,
            animations: Vec::new(),
        }
    }

    /// Set the frame range.
    pub fn with_frames(mut self, from: u32, to: u32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Canvas-space bounding box.
    pub fn bounds(&self) -> Rect {
        let left = f64::from(self.left);
        let top = f64::from(self.top);
        Rect::new(left, top, left + f64::from(self.width), top + f64::from(self.height))
    }

    /// Check the size, extent and frame-range invariants.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SceneError::InvalidGeometry(format!(
                "component {} has size {}x{}",
                self.id, self.width, self.height
            )));
        }
        if self.left.checked_add(self.width).is_none() || self.top.checked_add(self.height).is_none() {
            return Err(SceneError::InvalidGeometry(format!(
                "component {} extends past the coordinate range",
                self.id
            )));
        }
        if self.from > self.to {
            return Err(SceneError::InvalidGeometry(format!(
                "component {} has frame range {}..{}",
                self.id, self.from, self.to
            )));
        }
        Ok(())
    }
}

/// Kind of a scene component, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Text,
    Media,
}

impl ComponentKind {
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Text => "text",
            ComponentKind::Media => "media",
        }
    }
}

/// A positioned object in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneComponent {
    #[serde(rename = "scene-text")]
    Text(SceneText),
    #[serde(rename = "scene-media")]
    Media(SceneMedia),
}

impl SceneComponent {
    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn base(&self) -> &SceneBase {
        match self {
            SceneComponent::Text(t) => &t.base,
            SceneComponent::Media(m) => &m.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut SceneBase {
        match self {
            SceneComponent::Text(t) => &mut t.base,
            SceneComponent::Media(m) => &mut m.base,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            SceneComponent::Text(_) => ComponentKind::Text,
            SceneComponent::Media(_) => ComponentKind::Media,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.base().bounds()
    }

    /// Whether the component is shown on `frame`.
    pub fn is_visible_at(&self, frame: u32) -> bool {
        let base = self.base();
        base.from <= frame && frame <= base.to
    }

    /// Check every invariant of the component.
    pub fn validate(&self) -> SceneResult<()> {
        self.base().validate()?;
        match self {
            SceneComponent::Text(t) => t.validate(),
            SceneComponent::Media(_) => Ok(()),
        }
    }

    pub fn as_text(&self) -> Option<&SceneText> {
        match self {
            SceneComponent::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_media(&self) -> Option<&SceneMedia> {
        match self {
            SceneComponent::Media(m) => Some(m),
            _ => None,
        }
    }
}

impl From<SceneText> for SceneComponent {
    fn from(text: SceneText) -> Self {
        SceneComponent::Text(text)
    }
}

impl From<SceneMedia> for SceneComponent {
    fn from(media: SceneMedia) -> Self {
        SceneComponent::Media(media)
    }
}

/// A timed collection of components rendered together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: SceneId,
    pub duration_in_frames: u32,
    pub title: String,
    pub selected: bool,
    /// Components in z-order (back to front).
    pub components: Vec<SceneComponent>,
}

impl Scene {
    /// Create an empty scene. Fails when `duration_in_frames` is zero.
    pub fn new(title: impl Into<String>, duration_in_frames: u32) -> SceneResult<Self> {
        if duration_in_frames == 0 {
            return Err(SceneError::InvalidGeometry(
                "scene duration must be at least one frame".to_string(),
            ));
        }
        Ok(Self {
            id: new_component_id(),
            duration_in_frames,
            title: title.into(),
            selected: false,
            components: Vec::new(),
        })
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<SceneId>) -> Self {
        self.id = id.into();
        self
    }

    /// Check the duration, every component, and that component ids are unique.
    pub fn validate(&self) -> SceneResult<()> {
        if self.duration_in_frames == 0 {
            return Err(SceneError::InvalidGeometry(format!("scene {} has no frames", self.id)));
        }
        for (index, component) in self.components.iter().enumerate() {
            component.validate()?;
            if self.components[..index].iter().any(|c| c.id() == component.id()) {
                return Err(SceneError::InvalidGeometry(format!(
                    "duplicate component id {} in scene {}",
                    component.id(),
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// Append a component on top of the z-order.
    pub fn insert(&mut self, component: impl Into<SceneComponent>) -> SceneResult<()> {
        let component = component.into();
        component.validate()?;
        if self.position(component.id()).is_some() {
            return Err(SceneError::InvalidGeometry(format!(
                "duplicate component id {}",
                component.id()
            )));
        }
        self.components.push(component);
        Ok(())
    }

    /// Remove a component, returning it.
    pub fn remove(&mut self, id: &str) -> SceneResult<SceneComponent> {
        let index = self
            .position(id)
            .ok_or_else(|| SceneError::NotFound(id.to_string()))?;
        Ok(self.components.remove(index))
    }

    pub fn find(&self, id: &str) -> Option<&SceneComponent> {
        self.components.iter().find(|c| c.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut SceneComponent> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    /// Index of a component in the z-order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    /// Overwrite the component with the same id, keeping its z-order slot.
    /// Returns the previous value.
    pub fn replace(&mut self, component: SceneComponent) -> SceneResult<SceneComponent> {
        let slot = self
            .find_mut(component.id())
            .ok_or_else(|| SceneError::NotFound(component.id().to_string()))?;
        Ok(std::mem::replace(slot, component))
    }

    pub fn component_ids(&self) -> Vec<&str> {
        self.components.iter().map(SceneComponent::id).collect()
    }

    /// Components shown on `frame`, back to front.
    pub fn components_at(&self, frame: u32) -> impl Iterator<Item = &SceneComponent> {
        self.components.iter().filter(move |c| c.is_visible_at(frame))
    }

    /// Topmost component whose bounds contain `point`.
    pub fn hit_test(&self, point: Point) -> Option<&SceneComponent> {
        self.components.iter().rev().find(|c| c.bounds().contains(point))
    }

    /// Move a component to the top of the z-order.
    pub fn bring_to_front(&mut self, id: &str) -> SceneResult<()> {
        let component = self.remove(id)?;
        self.components.push(component);
        Ok(())
    }

    /// Move a component to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: &str) -> SceneResult<()> {
        let component = self.remove(id)?;
        self.components.insert(0, component);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str, left: i32, top: i32) -> SceneComponent {
        SceneText::new(SceneBase::new(id, left, top, 200, 100).with_frames(0, 90), "Hello").into()
    }

    fn scene() -> Scene {
        let mut scene = Scene::new("Intro", 150).unwrap().with_id("s1");
        scene.insert(text("t1", 100, 100)).unwrap();
        scene.insert(text("t2", 150, 150)).unwrap();
        scene.insert(text("t3", 800, 600)).unwrap();
        scene
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(matches!(Scene::new("Empty", 0), Err(SceneError::InvalidGeometry(_))));
    }

    #[test]
    fn test_extent_past_coordinate_range_rejected() {
        let base = SceneBase::new("far", i32::MAX - 10, 0, 300, 100);
        assert!(matches!(base.validate(), Err(SceneError::InvalidGeometry(_))));
        let edge = SceneBase::new("edge", i32::MAX - 300, i32::MIN, 300, 100);
        edge.validate().unwrap();
        assert_eq!(edge.bounds().x1, f64::from(i32::MAX));
    }

    #[test]
    fn test_validate_scene() {
        let mut scene = scene();
        scene.validate().unwrap();
        scene.components.push(text("t1", 0, 0));
        assert!(matches!(scene.validate(), Err(SceneError::InvalidGeometry(_))));
        scene.components.pop();
        scene.components[0].base_mut().width = 0;
        assert!(scene.validate().is_err());
        scene.components[0].base_mut().width = 10;
        scene.duration_in_frames = 0;
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_insert_appends() {
        let scene = scene();
        assert_eq!(scene.component_ids(), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_insert_rejects_invalid_and_duplicates() {
        let mut scene = scene();
        let bad = SceneText::new(SceneBase::new("bad", 0, 0, 0, 10), "x");
        assert!(matches!(scene.insert(bad), Err(SceneError::InvalidGeometry(_))));
        assert!(scene.insert(text("t1", 0, 0)).is_err());
        assert_eq!(scene.components.len(), 3);
    }

    #[test]
    fn test_remove_and_find() {
        let mut scene = scene();
        let removed = scene.remove("t2").unwrap();
        assert_eq!(removed.id(), "t2");
        assert!(scene.find("t2").is_none());
        assert_eq!(scene.component_ids(), vec!["t1", "t3"]);
        assert!(matches!(scene.remove("t2"), Err(SceneError::NotFound(_))));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut scene = scene();
        let mut updated = scene.find("t2").unwrap().clone();
        updated.base_mut().left = 480;
        let previous = scene.replace(updated).unwrap();
        assert_eq!(previous.base().left, 150);
        assert_eq!(scene.position("t2"), Some(1));
        assert_eq!(scene.find("t2").unwrap().base().left, 480);
    }

    #[test]
    fn test_replace_missing_is_not_found() {
        let mut scene = scene();
        let before = scene.clone();
        let result = scene.replace(text("ghost", 0, 0));
        assert!(matches!(result, Err(SceneError::NotFound(id)) if id == "ghost"));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let scene = scene();
        // t1 spans 100..300, t2 spans 150..350; both contain (200, 200).
        assert_eq!(scene.hit_test(Point::new(200.0, 200.0)).unwrap().id(), "t2");
        assert_eq!(scene.hit_test(Point::new(110.0, 110.0)).unwrap().id(), "t1");
        assert!(scene.hit_test(Point::new(1900.0, 10.0)).is_none());
    }

    #[test]
    fn test_z_order_moves() {
        let mut scene = scene();
        scene.bring_to_front("t1").unwrap();
        assert_eq!(scene.component_ids(), vec!["t2", "t3", "t1"]);
        scene.send_to_back("t3").unwrap();
        assert_eq!(scene.component_ids(), vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_visibility_by_frame() {
        let mut scene = scene();
        scene.find_mut("t3").unwrap().base_mut().from = 100;
        scene.find_mut("t3").unwrap().base_mut().to = 140;
        let at_50: Vec<_> = scene.components_at(50).map(SceneComponent::id).collect();
        assert_eq!(at_50, vec!["t1", "t2"]);
        let at_120: Vec<_> = scene.components_at(120).map(SceneComponent::id).collect();
        assert_eq!(at_120, vec!["t3"]);
    }

    #[test]
    fn test_json_shape() {
        let scene = scene();
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["durationInFrames"], 150);
        assert_eq!(json["components"][0]["type"], "scene-text");
        assert_eq!(json["components"][0]["textAlignVertical"], "center");
        let back: Scene = serde_json::from_value(json).unwrap();
        assert_eq!(back, scene);
    }
}
