//! Media component (image, video or audio).

use super::SceneBase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaType {
    Image,
    Video,
    Audio,
}

impl MediaType {
    /// Guess the media type from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "webp" | "gif" | "svg" => Some(MediaType::Image),
            "mp4" | "webm" | "mov" | "mkv" => Some(MediaType::Video),
            "mp3" | "wav" | "ogg" | "aac" | "flac" => Some(MediaType::Audio),
            _ => None,
        }
    }

    /// Guess the media type from the extension at the end of a URI.
    pub fn from_src(src: &str) -> Option<Self> {
        let path = src.split(['?', '#']).next().unwrap_or(src);
        let file = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file.rsplit_once('.')?;
        Self::from_extension(ext)
    }
}

/// How media content fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

/// An image, video or audio clip placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMedia {
    #[serde(flatten)]
    pub base: SceneBase,
    pub media_type: MediaType,
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub fit: MediaFit,
}

impl SceneMedia {
    pub fn new(base: SceneBase, media_type: MediaType, src: impl Into<String>) -> Self {
        Self {
            base,
            media_type,
            src: src.into(),
            alt: String::new(),
            fit: MediaFit::default(),
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    pub fn with_fit(mut self, fit: MediaFit) -> Self {
        self.fit = fit;
        self
    }
}
