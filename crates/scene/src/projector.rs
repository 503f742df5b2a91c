use foundation::math::{Vec3, lat_lng_to_3d};
use gpu::View;
use serde::{Deserialize, Serialize};

use crate::camera::Viewport;
use crate::marker::{Marker, RankedVisibleMarker};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    pub globe_radius: f64,
    /// Height of the marker glyph above the surface.
    pub glyph_lift: f64,
    /// Height of the card anchor above the surface.
    pub anchor_lift: f64,
    /// Minimum world z (toward the camera) for a marker to count as facing.
    pub facing_margin: f64,
    pub max_cards: usize,
    pub card_size: [f64; 2],
    /// Card top-left relative to the projected anchor.
    pub card_offset: [f64; 2],
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            globe_radius: 260.0,
            glyph_lift: 3.0,
            anchor_lift: 8.0,
            facing_margin: 20.0,
            max_cards: 4,
            card_size: [174.0, 90.0],
            card_offset: [14.0, -20.0],
        }
    }
}

/// Full per-marker projection result. Never stored across frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerProjection {
    /// Projected anchor in CSS pixels, before the card offset and clamping.
    pub screen_x: f64,
    pub screen_y: f64,
    pub depth_factor: f64,
    pub visible: bool,
    /// Camera-space z; larger is nearer.
    pub camera_z: f64,
    /// Rotated anchor position.
    pub world: Vec3,
}

fn clamp_card(value: f64, limit: f64) -> f64 {
    value.min(limit).max(0.0)
}

pub fn project_marker(marker: &Marker, view: &View, viewport: Viewport, config: &ProjectorConfig) -> MarkerProjection {
    let geo = marker.position();
    let radius = config.globe_radius;
    let world = view
        .rotation
        .transform(lat_lng_to_3d(geo.lat_deg, geo.lng_deg, radius + config.anchor_lift));
    let camera_z = view.camera.to_camera_space(world).z;
    let depth_factor = ((world.z + radius) / (2.0 * radius)).clamp(0.0, 1.0);

    let ndc = view.camera.project(world);
    let visible = world.z > config.facing_margin && ndc.is_some();
    let (screen_x, screen_y) = match ndc {
        Some(ndc) => {
            let s = ndc.to_screen(viewport.width(), viewport.height());
            (s.x, s.y)
        }
        None => (f64::NAN, f64::NAN),
    };
    MarkerProjection {
        screen_x,
        screen_y,
        depth_factor,
        visible,
        camera_z,
        world,
    }
}

/// Overlay cards for the current frame.
///
/// Ordering contract:
/// - Visible markers only, nearest first (descending camera-space z).
/// - Equal depths keep input order.
/// - At most `config.max_cards` entries.
///
/// Card corners are clamped to `[0, W - card_w] x [0, H - card_h]`.
pub fn project(markers: &[Marker], view: &View, viewport: Viewport, config: &ProjectorConfig) -> Vec<RankedVisibleMarker> {
    let mut visible: Vec<(&Marker, MarkerProjection)> = markers
        .iter()
        .map(|m| (m, project_marker(m, view, viewport, config)))
        .filter(|(_, p)| p.visible && p.screen_x.is_finite() && p.screen_y.is_finite())
        .collect();
    visible.sort_by(|a, b| b.1.camera_z.total_cmp(&a.1.camera_z));
    visible.truncate(config.max_cards);

    let [card_w, card_h] = config.card_size;
    let [off_x, off_y] = config.card_offset;
    visible
        .into_iter()
        .map(|(marker, p)| RankedVisibleMarker {
            name: marker.name.clone(),
            location: marker.location.clone(),
            description: marker.description.clone(),
            rating: marker.clamped_rating(),
            screen_x: clamp_card(p.screen_x + off_x, viewport.width() - card_w),
            screen_y: clamp_card(p.screen_y + off_y, viewport.height() - card_h),
            depth_factor: p.depth_factor,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ProjectorConfig, project, project_marker};
    use crate::camera::{CameraConfig, CameraState, Viewport};
    use crate::marker::Marker;
    use gpu::View;

    fn view_at(camera: &CameraState, viewport: Viewport) -> View {
        camera.view(viewport, &CameraConfig::default()).unwrap()
    }

    fn square() -> Viewport {
        Viewport::new(700.0, 700.0).unwrap()
    }

    fn at(name: &str, lat: f64, lng: f64) -> Marker {
        Marker::new(name, "", 4.5, "", lat, lng)
    }

    #[test]
    fn paris_at_rest_is_front_facing_and_unclamped() {
        let camera = CameraState::new(&CameraConfig::default());
        let view = view_at(&camera, square());
        let config = ProjectorConfig::default();
        let paris = Marker::new("Café de Flore", "Paris", 4.8, "Iconic literary café since 1887", 48.854, 2.333);

        let p = project_marker(&paris, &view, square(), &config);
        assert!(p.visible);
        assert!((p.screen_x - 350.0).abs() < 50.0, "screen_x {}", p.screen_x);
        assert!(p.screen_y > 0.0 && p.screen_y < 350.0, "screen_y {}", p.screen_y);

        let cards = project(&[paris], &view, square(), &config);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].screen_x, p.screen_x + 14.0);
        assert_eq!(cards[0].screen_y, p.screen_y - 20.0);
        assert!(cards[0].depth_factor > 0.8);
    }

    #[test]
    fn back_hemisphere_is_hidden() {
        let camera = CameraState::new(&CameraConfig::default());
        let view = view_at(&camera, square());
        let config = ProjectorConfig::default();
        // The antipode of the front meridian, and a point on the limb.
        let behind = project_marker(&at("back", 0.0, 180.0), &view, square(), &config);
        assert!(!behind.visible);
        assert!(behind.depth_factor < 0.05);
        let limb = project_marker(&at("limb", 0.0, 90.0), &view, square(), &config);
        assert!(!limb.visible);
    }

    #[test]
    fn caps_and_orders_nearest_first() {
        let camera = CameraState::new(&CameraConfig::default());
        let view = view_at(&camera, square());
        let markers: Vec<_> = [40.0, 0.0, 30.0, 10.0, 50.0, 20.0]
            .iter()
            .map(|lng: &f64| at(&format!("m{lng}"), 0.0, *lng))
            .collect();
        let cards = project(&markers, &view, square(), &ProjectorConfig::default());
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["m0", "m10", "m20", "m30"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let camera = CameraState::new(&CameraConfig::default());
        let view = view_at(&camera, square());
        let markers = [at("a", 0.0, 0.0), at("b", 0.0, 0.0), at("c", 0.0, 0.0)];
        let cards = project(&markers, &view, square(), &ProjectorConfig::default());
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn card_corners_stay_inside_viewport() {
        let config = ProjectorConfig::default();
        let viewport = Viewport::new(420.0, 300.0).unwrap();
        let mut camera = CameraState::new(&CameraConfig::default());
        camera.current_zoom = 400.0;
        let markers: Vec<_> = (0..36)
            .flat_map(|i| [-60.0, -30.0, 0.0, 30.0, 60.0].map(|lat| at("m", lat, i as f64 * 10.0 - 180.0)))
            .collect();
        for step in 0..24 {
            camera.rotate_by(0.26, 0.05, 0.6);
            let view = view_at(&camera, viewport);
            let cards = project(&markers, &view, viewport, &config);
            assert!(cards.len() <= config.max_cards, "step {step}");
            for card in cards {
                assert!((0.0..=420.0 - 174.0).contains(&card.screen_x), "x {}", card.screen_x);
                assert!((0.0..=300.0 - 90.0).contains(&card.screen_y), "y {}", card.screen_y);
                assert!((0.0..=1.0).contains(&card.depth_factor));
            }
        }
    }

    #[test]
    fn invalid_coordinates_do_not_produce_nan() {
        let camera = CameraState::new(&CameraConfig::default());
        let view = view_at(&camera, square());
        let weird = Marker::new("nan", "", f64::NAN, "", f64::NAN, 400.0);
        let p = project_marker(&weird, &view, square(), &ProjectorConfig::default());
        assert!(p.depth_factor.is_finite());
        for card in project(&[weird], &view, square(), &ProjectorConfig::default()) {
            assert!(card.screen_x.is_finite() && card.screen_y.is_finite());
            assert_eq!(card.rating, 0.0);
        }
    }
}
