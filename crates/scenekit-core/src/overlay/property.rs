//! Editable component properties.

use crate::color::RgbaColor;
use crate::error::{SceneError, SceneResult};
use crate::scene::{
    FontStyle, FontWeight, MediaFit, MediaType, SceneComponent, TextAlign, TextAlignVertical,
    TextDecoration, TextTransform,
};
use serde::{Deserialize, Serialize};

/// A single field update for a component, keyed like the JSON model.
///
/// Geometry values are real-valued and are truncated to whole pixels when written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum ComponentProperty {
    Top(f64),
    Left(f64),
    Width(f64),
    Height(f64),
    From(u32),
    To(u32),
    Animations(Vec<String>),
    // Text only.
    Text(String),
    FontSize(f64),
    FontFamily(String),
    Color(RgbaColor),
    BackgroundColor(RgbaColor),
    TextAlign(TextAlign),
    TextAlignVertical(TextAlignVertical),
    FontWeight(FontWeight),
    FontStyle(FontStyle),
    TextDecoration(TextDecoration),
    TextTransform(TextTransform),
    // Media only.
    MediaType(MediaType),
    Src(String),
    Alt(String),
    Fit(MediaFit),
}

impl ComponentProperty {
    /// The JSON key of the property.
    pub fn key(&self) -> &'static str {
        match self {
            ComponentProperty::Top(_) => "top",
            ComponentProperty::Left(_) => "left",
            ComponentProperty::Width(_) => "width",
            ComponentProperty::Height(_) => "height",
            ComponentProperty::From(_) => "from",
            ComponentProperty::To(_) => "to",
            ComponentProperty::Animations(_) => "animations",
            ComponentProperty::Text(_) => "text",
            ComponentProperty::FontSize(_) => "fontSize",
            ComponentProperty::FontFamily(_) => "fontFamily",
            ComponentProperty::Color(_) => "color",
            ComponentProperty::BackgroundColor(_) => "backgroundColor",
            ComponentProperty::TextAlign(_) => "textAlign",
            ComponentProperty::TextAlignVertical(_) => "textAlignVertical",
            ComponentProperty::FontWeight(_) => "fontWeight",
            ComponentProperty::FontStyle(_) => "fontStyle",
            ComponentProperty::TextDecoration(_) => "textDecoration",
            ComponentProperty::TextTransform(_) => "textTransform",
            ComponentProperty::MediaType(_) => "mediaType",
            ComponentProperty::Src(_) => "src",
            ComponentProperty::Alt(_) => "alt",
            ComponentProperty::Fit(_) => "fit",
        }
    }

    /// Whether the property is one of the four canvas geometry fields.
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            ComponentProperty::Top(_)
                | ComponentProperty::Left(_)
                | ComponentProperty::Width(_)
                | ComponentProperty::Height(_)
        )
    }

    /// Write the property into `component`, returning the updated copy.
    ///
    /// The input is left untouched, so a rejected update keeps the prior value.
    pub fn apply(&self, component: &SceneComponent) -> SceneResult<SceneComponent> {
        let mut next = component.clone();
        self.write(&mut next)?;
        next.validate()?;
        Ok(next)
    }

    fn write(&self, component: &mut SceneComponent) -> SceneResult<()> {
        let unsupported = SceneError::UnsupportedProperty {
            property: self.key(),
            kind: component.kind().name(),
        };
        match self {
            ComponentProperty::Top(v) => component.base_mut().top = to_pixels(*v, "top")?,
            ComponentProperty::Left(v) => component.base_mut().left = to_pixels(*v, "left")?,
            ComponentProperty::Width(v) => component.base_mut().width = to_pixels(*v, "width")?,
            ComponentProperty::Height(v) => component.base_mut().height = to_pixels(*v, "height")?,
            ComponentProperty::From(v) => component.base_mut().from = *v,
            ComponentProperty::To(v) => component.base_mut().to = *v,
            ComponentProperty::Animations(v) => component.base_mut().animations = v.clone(),
            _ => match component {
                SceneComponent::Text(text) => match self {
                    ComponentProperty::Text(v) => text.text = v.clone(),
                    ComponentProperty::FontSize(v) => text.font_size = *v,
                    ComponentProperty::FontFamily(v) => text.font_family = v.clone(),
                    ComponentProperty::Color(v) => text.color = *v,
                    ComponentProperty::BackgroundColor(v) => text.background_color = *v,
                    ComponentProperty::TextAlign(v) => text.text_align = *v,
                    ComponentProperty::TextAlignVertical(v) => text.text_align_vertical = *v,
                    ComponentProperty::FontWeight(v) => text.font_weight = *v,
                    ComponentProperty::FontStyle(v) => text.font_style = *v,
                    ComponentProperty::TextDecoration(v) => text.text_decoration = *v,
                    ComponentProperty::TextTransform(v) => text.text_transform = *v,
                    _ => return Err(unsupported),
                },
                SceneComponent::Media(media) => match self {
                    ComponentProperty::MediaType(v) => media.media_type = *v,
                    ComponentProperty::Src(v) => media.src = v.clone(),
                    ComponentProperty::Alt(v) => media.alt = v.clone(),
                    ComponentProperty::Fit(v) => media.fit = *v,
                    _ => return Err(unsupported),
                },
            },
        }
        Ok(())
    }
}

/// Truncate a real-valued coordinate to whole pixels.
fn to_pixels(value: f64, field: &str) -> SceneResult<i32> {
    let pixels = value.trunc();
    if !pixels.is_finite() || pixels < f64::from(i32::MIN) || pixels > f64::from(i32::MAX) {
        return Err(SceneError::InvalidGeometry(format!("{field} is {value}")));
    }
    Ok(pixels as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneBase, SceneMedia, SceneText};

    fn text() -> SceneComponent {
        SceneText::new(SceneBase::new("t1", 100, 100, 300, 80).with_frames(0, 60), "Hi").into()
    }

    fn media() -> SceneComponent {
        SceneMedia::new(SceneBase::new("m1", 0, 0, 640, 360), MediaType::Image, "a.png").into()
    }

    #[test]
    fn test_geometry_truncates() {
        let out = ComponentProperty::Left(205.9).apply(&text()).unwrap();
        assert_eq!(out.base().left, 205);
        let out = ComponentProperty::Top(-3.7).apply(&text()).unwrap();
        assert_eq!(out.base().top, -3);
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let original = text();
        for prop in [
            ComponentProperty::Width(0.0),
            ComponentProperty::Height(-5.0),
            ComponentProperty::Width(0.6),
            ComponentProperty::FontSize(0.0),
            ComponentProperty::Left(f64::NAN),
        ] {
            assert!(
                matches!(prop.apply(&original), Err(SceneError::InvalidGeometry(_))),
                "{prop:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        for prop in [
            ComponentProperty::Left(3.0e9),
            ComponentProperty::Top(-3.0e9),
            ComponentProperty::Width(f64::from(i32::MAX) + 1.0),
            // In range on its own, but the right edge overflows.
            ComponentProperty::Left(f64::from(i32::MAX) - 10.0),
        ] {
            assert!(
                matches!(prop.apply(&text()), Err(SceneError::InvalidGeometry(_))),
                "{prop:?} should be rejected"
            );
        }
        let out = ComponentProperty::Left(f64::from(i32::MIN)).apply(&text()).unwrap();
        assert_eq!(out.base().left, i32::MIN);
    }

    #[test]
    fn test_inverted_frame_range_rejected() {
        assert!(matches!(
            ComponentProperty::From(61).apply(&text()),
            Err(SceneError::InvalidGeometry(_))
        ));
        assert_eq!(ComponentProperty::To(90).apply(&text()).unwrap().base().to, 90);
    }

    #[test]
    fn test_kind_specific_properties() {
        let out = ComponentProperty::FontWeight(FontWeight::Bold).apply(&text()).unwrap();
        assert_eq!(out.as_text().unwrap().font_weight, FontWeight::Bold);

        let out = ComponentProperty::Fit(MediaFit::Contain).apply(&media()).unwrap();
        assert_eq!(out.as_media().unwrap().fit, MediaFit::Contain);

        let err = ComponentProperty::FontSize(20.0).apply(&media()).unwrap_err();
        assert_eq!(err, SceneError::UnsupportedProperty { property: "fontSize", kind: "media" });
        let err = ComponentProperty::Src("b.png".into()).apply(&text()).unwrap_err();
        assert_eq!(err, SceneError::UnsupportedProperty { property: "src", kind: "text" });
    }

    #[test]
    fn test_json_key_value_form() {
        let prop: ComponentProperty = serde_json::from_str(r#"{"key":"left","value":205}"#).unwrap();
        assert_eq!(prop, ComponentProperty::Left(205.0));
        let prop: ComponentProperty =
            serde_json::from_str(r#"{"key":"textAlignVertical","value":"bottom"}"#).unwrap();
        assert_eq!(prop.key(), "textAlignVertical");
        assert!(!prop.is_geometry());
    }
}
