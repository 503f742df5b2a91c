use gpu::{PointPalette, RenderDevice, Rgba};
use scene::SceneState;
use serde::{Deserialize, Serialize};

/// Colors for the globe and its overlay cards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub land_color: Rgba,
    pub ocean_color: Rgba,
    pub marker_color: Rgba,
    pub card_background: Rgba,
    pub card_border: Rgba,
    pub text_color: Rgba,
    pub muted_text_color: Rgba,
    pub star_color: Rgba,
}

impl Theme {
    pub const fn light() -> Self {
        Self {
            land_color: Rgba::rgb(0x1a, 0x1a, 0x2e),
            ocean_color: Rgba::rgb(0xa0, 0xb8, 0xd0),
            marker_color: Rgba::rgb(0x63, 0x66, 0xf1),
            card_background: Rgba::rgba(0xff, 0xff, 0xff, 0xeb),
            card_border: Rgba::rgba(0x63, 0x66, 0xf1, 0x4d),
            text_color: Rgba::rgb(0x1e, 0x29, 0x3b),
            muted_text_color: Rgba::rgb(0x64, 0x74, 0x8b),
            star_color: Rgba::rgb(0xf5, 0x9e, 0x0b),
        }
    }

    pub const fn dark() -> Self {
        Self {
            land_color: Rgba::rgb(0xff, 0xff, 0xff),
            ocean_color: Rgba::rgb(0x3a, 0x4a, 0x6b),
            marker_color: Rgba::rgb(0x8b, 0x5c, 0xf6),
            card_background: Rgba::rgba(0x0f, 0x0f, 0x1e, 0xe0),
            card_border: Rgba::rgba(0x8b, 0x5c, 0xf6, 0x66),
            text_color: Rgba::rgb(0xe2, 0xe8, 0xf0),
            muted_text_color: Rgba::rgb(0x94, 0xa3, 0xb8),
            star_color: Rgba::rgb(0xf5, 0x9e, 0x0b),
        }
    }

    pub const fn for_dark_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    pub fn palette(&self) -> PointPalette {
        PointPalette {
            land: self.land_color,
            ocean: self.ocean_color,
            marker: self.marker_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Push a theme's point colors into an existing scene. Geometry is untouched.
pub fn apply_theme(scene: &SceneState, device: &mut dyn RenderDevice, theme: &Theme) -> usize {
    let updated = scene.recolor(device, &theme.palette());
    tracing::debug!(updated, "applied theme");
    updated
}

#[cfg(test)]
mod tests {
    use super::Theme;
    use pretty_assertions::assert_eq;

    #[test]
    fn presets_differ_in_every_point_color() {
        let (light, dark) = (Theme::light().palette(), Theme::dark().palette());
        assert_ne!(light.land, dark.land);
        assert_ne!(light.ocean, dark.ocean);
        assert_ne!(light.marker, dark.marker);
        assert_eq!(Theme::for_dark_mode(true), Theme::dark());
    }

    #[test]
    fn theme_json_uses_hex_strings() {
        let json = serde_json::to_value(Theme::dark()).unwrap();
        assert_eq!(json["marker_color"], "#8b5cf6");
        assert_eq!(json["card_background"], "#0f0f1ee0");
        let back: Theme = serde_json::from_value(json).unwrap();
        assert_eq!(back, Theme::dark());
    }
}
