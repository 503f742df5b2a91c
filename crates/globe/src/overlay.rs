use gpu::Rgba;
use scene::RankedVisibleMarker;
use serde::Serialize;

use crate::theme::Theme;

/// Presentation of one card, derived from its depth factor.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStyle {
    pub opacity: f64,
    pub scale: f64,
    pub z_index: i32,
    pub filled_stars: u8,
}

impl CardStyle {
    pub fn for_marker(marker: &RankedVisibleMarker) -> Self {
        let d = marker.depth_factor.clamp(0.0, 1.0);
        Self {
            opacity: 0.9 + d * 0.1,
            scale: 0.88 + d * 0.12,
            z_index: (d * 10.0).round() as i32,
            filled_stars: marker.rating.round().clamp(0.0, 5.0) as u8,
        }
    }
}

/// Everything a host needs to draw the cards for one frame.
///
/// `cards[i]` styles `markers[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayFrame {
    pub markers: Vec<RankedVisibleMarker>,
    pub cards: Vec<CardStyle>,
    pub card_background: Rgba,
    pub card_border: Rgba,
    pub text_color: Rgba,
    pub muted_text_color: Rgba,
    pub star_color: Rgba,
}

impl OverlayFrame {
    pub fn new(markers: Vec<RankedVisibleMarker>, theme: &Theme) -> Self {
        let cards = markers.iter().map(CardStyle::for_marker).collect();
        Self {
            markers,
            cards,
            card_background: theme.card_background,
            card_border: theme.card_border,
            text_color: theme.text_color,
            muted_text_color: theme.muted_text_color,
            star_color: theme.star_color,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{CardStyle, OverlayFrame};
    use crate::theme::Theme;
    use pretty_assertions::assert_eq;
    use scene::RankedVisibleMarker;

    fn ranked(depth_factor: f64, rating: f64) -> RankedVisibleMarker {
        RankedVisibleMarker {
            name: "Bar Luce".into(),
            location: "Milan, Italy".into(),
            description: "Wes Anderson café".into(),
            rating,
            screen_x: 10.0,
            screen_y: 20.0,
            depth_factor,
        }
    }

    #[test]
    fn nearer_cards_are_larger_and_on_top() {
        let near = CardStyle::for_marker(&ranked(1.0, 4.6));
        let far = CardStyle::for_marker(&ranked(0.5, 4.4));
        assert_eq!(near.z_index, 10);
        assert_eq!(far.z_index, 5);
        assert!(near.scale > far.scale);
        assert!((near.opacity - 1.0).abs() < 1e-12);
        assert_eq!((near.filled_stars, far.filled_stars), (5, 4));
    }

    #[test]
    fn serializes_for_hosts() {
        let frame = OverlayFrame::new(vec![ranked(0.9, 4.6)], &Theme::light());
        let json: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();
        assert_eq!(json["markers"][0]["screenX"], 10.0);
        assert_eq!(json["markers"][0]["depthFactor"], 0.9);
        assert_eq!(json["cards"][0]["zIndex"], 9);
        assert_eq!(json["cardBackground"], "#ffffffeb");
    }
}
