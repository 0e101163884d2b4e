//! Starter layouts for new scenes.

use crate::error::SceneError;
use crate::scene::{
    FontWeight, MediaType, Scene, SceneBase, SceneComponent, SceneMedia, SceneText, TextAlign,
    TextAlignVertical, new_component_id,
};
use std::fmt;
use std::str::FromStr;

/// Length of a freshly created scene: five seconds at 30 fps.
pub const DEFAULT_SCENE_FRAMES: u32 = 150;

/// The layouts offered when adding a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTemplate {
    Title,
    TitleAndContent,
    SectionTitle,
    TitleAndTwoImages,
    TitleAndVideo,
}

impl SceneTemplate {
    pub const ALL: [SceneTemplate; 5] = [
        SceneTemplate::Title,
        SceneTemplate::TitleAndContent,
        SceneTemplate::SectionTitle,
        SceneTemplate::TitleAndTwoImages,
        SceneTemplate::TitleAndVideo,
    ];

    /// Identifier used on the command line and in scripts.
    pub fn name(&self) -> &'static str {
        match self {
            SceneTemplate::Title => "title",
            SceneTemplate::TitleAndContent => "titleAndContent",
            SceneTemplate::SectionTitle => "sectionTitle",
            SceneTemplate::TitleAndTwoImages => "titleAndTwoImages",
            SceneTemplate::TitleAndVideo => "titleAndVideo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SceneTemplate::Title => "Title",
            SceneTemplate::TitleAndContent => "Title and Content",
            SceneTemplate::SectionTitle => "Section Title",
            SceneTemplate::TitleAndTwoImages => "Title and Two Images",
            SceneTemplate::TitleAndVideo => "Title and Video",
        }
    }

    /// Build a new scene with this layout. Every edge sits on a canvas guideline.
    pub fn create(&self) -> Scene {
        let components = match self {
            SceneTemplate::Title => vec![heading(0, 270, 1920, 540, "Title", 96.0)],
            SceneTemplate::TitleAndContent => vec![
                heading(0, 0, 1920, 270, "Title", 72.0),
                SceneText::new(frames(SceneBase::new(new_component_id(), 0, 270, 1920, 810)), "Content")
                    .with_font_size(40.0)
                    .with_align(TextAlign::Left, TextAlignVertical::Top)
                    .into(),
            ],
            SceneTemplate::SectionTitle => vec![
                heading(0, 270, 1920, 270, "Section Title", 96.0),
                SceneText::new(frames(SceneBase::new(new_component_id(), 0, 540, 1920, 270)), "Subtitle")
                    .with_align(TextAlign::Center, TextAlignVertical::Top)
                    .into(),
            ],
            SceneTemplate::TitleAndTwoImages => vec![
                heading(0, 0, 1920, 270, "Title", 72.0),
                media(0, 270, 960, 810, MediaType::Image),
                media(960, 270, 960, 810, MediaType::Image),
            ],
            SceneTemplate::TitleAndVideo => vec![
                heading(0, 0, 1920, 270, "Title", 72.0),
                media(480, 270, 960, 540, MediaType::Video),
            ],
        };
        Scene {
            id: new_component_id(),
            duration_in_frames: DEFAULT_SCENE_FRAMES,
            title: self.label().to_string(),
            selected: false,
            components,
        }
    }
}

impl fmt::Display for SceneTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneTemplate {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SceneError::InvalidConfig(format!("unknown template '{s}'")))
    }
}

fn frames(base: SceneBase) -> SceneBase {
    base.with_frames(0, DEFAULT_SCENE_FRAMES)
}

fn heading(left: i32, top: i32, width: i32, height: i32, text: &str, font_size: f64) -> SceneComponent {
    SceneText::new(frames(SceneBase::new(new_component_id(), left, top, width, height)), text)
        .with_font_size(font_size)
        .with_font_weight(FontWeight::Bold)
        .into()
}

fn media(left: i32, top: i32, width: i32, height: i32, media_type: MediaType) -> SceneComponent {
    SceneMedia::new(frames(SceneBase::new(new_component_id(), left, top, width, height)), media_type, "")
        .into()
}
