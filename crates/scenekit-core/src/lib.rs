//! SceneKit Core Library
//!
//! Scene object model and direct-manipulation engine: timed scenes of text and
//! media components on a 1920x1080 canvas, drag/resize gestures with guideline
//! snapping, and a debounced working-copy edit buffer that commits back into
//! the scene store.

pub mod color;
pub mod commit;
pub mod config;
pub mod editor;
pub mod error;
pub mod manipulation;
pub mod overlay;
pub mod scene;
pub mod snap;
pub mod store;
pub mod templates;

pub use color::RgbaColor;
pub use commit::{CommitIntent, CommitOutcome, commit};
pub use config::EditorConfig;
pub use editor::SceneEditor;
pub use error::{SceneError, SceneResult};
pub use manipulation::{GestureKind, GestureOutcome, GestureState, ManipulationSession, ResizeHandle};
pub use overlay::{ComponentProperty, OverlayEditor};
pub use scene::{ComponentKind, Scene, SceneBase, SceneComponent, SceneMedia, SceneText};
pub use snap::{Guidelines, SnapDirection, SnapResult, snap_rect};
pub use store::SceneStore;
pub use templates::SceneTemplate;
