use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::outlines::WORLD_OUTLINES;
use crate::polygon::GeoPolygon;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRule {
    /// A cell is land when the outline winds around it at least once.
    #[default]
    NonZero,
    /// A cell is land when an odd number of edges lie to its left.
    EvenOdd,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandMaskConfig {
    pub width: u32,
    pub height: u32,
    pub fill_rule: FillRule,
}

impl Default for LandMaskConfig {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 720,
            fill_rule: FillRule::NonZero,
        }
    }
}

/// Equirectangular land/ocean bitmap covering the whole globe.
///
/// Column 0 starts at longitude -180, row 0 at latitude +90.
#[derive(Clone, PartialEq, Eq)]
pub struct LandMask {
    width: u32,
    height: u32,
    bits: Vec<u64>,
    skipped_polygons: usize,
}

impl std::fmt::Debug for LandMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("land_cells", &self.land_cells())
            .field("skipped_polygons", &self.skipped_polygons)
            .finish()
    }
}

impl LandMask {
    fn empty(width: u32, height: u32) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            bits: vec![0; cells.div_ceil(64)],
            skipped_polygons: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Outlines left out of the build because they were malformed.
    pub fn skipped_polygons(&self) -> usize {
        self.skipped_polygons
    }

    pub fn land_cells(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn cell(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = y as usize * self.width as usize + x as usize;
        self.bits[i / 64] & (1 << (i % 64)) != 0
    }

    fn set(&mut self, x: u32, y: u32) {
        let i = y as usize * self.width as usize + x as usize;
        self.bits[i / 64] |= 1 << (i % 64);
    }

    /// Grid cell containing a coordinate. Longitude wraps, latitude clamps.
    pub fn cell_for(&self, lat_deg: f64, lng_deg: f64) -> Option<(u32, u32)> {
        if !lat_deg.is_finite() || !lng_deg.is_finite() {
            return None;
        }
        let w = self.width as i64;
        let h = self.height as i64;
        let px = (((lng_deg + 180.0) / 360.0) * w as f64).floor() as i64;
        let py = (((90.0 - lat_deg) / 180.0) * h as f64).floor() as i64;
        Some((px.rem_euclid(w) as u32, py.clamp(0, h - 1) as u32))
    }

    pub fn is_land(&self, lat_deg: f64, lng_deg: f64) -> bool {
        self.cell_for(lat_deg, lng_deg)
            .is_some_and(|(x, y)| self.cell(x, y))
    }

    /// Fill the row cells whose centers fall in `[x0, x1)` (pixel units).
    fn fill_span(&mut self, y: u32, x0: f64, x1: f64) {
        let start = (x0 - 0.5).ceil().max(0.0) as u32;
        let end = ((x1 - 0.5).ceil().max(0.0) as u32).min(self.width);
        for x in start..end {
            self.set(x, y);
        }
    }

    fn fill_polygon(&mut self, polygon: &GeoPolygon, rule: FillRule) {
        let w = self.width as f64;
        let h = self.height as f64;
        let to_px = |[lng, lat]: [f64; 2]| [(lng + 180.0) / 360.0 * w, (90.0 - lat) / 180.0 * h];

        let (min_y, max_y) = polygon
            .vertices()
            .iter()
            .map(|v| to_px(*v)[1])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
        let first_row = (min_y - 0.5).ceil().max(0.0) as u32;
        let end_row = ((max_y - 0.5).ceil().max(0.0) as u32).min(self.height);

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in first_row..end_row {
            let yc = y as f64 + 0.5;
            crossings.clear();
            for (a, b) in polygon.edges() {
                let (a, b) = (to_px(a), to_px(b));
                // Half-open test so a vertex exactly on the scanline counts once.
                if (a[1] <= yc) == (b[1] <= yc) {
                    continue;
                }
                let t = (yc - a[1]) / (b[1] - a[1]);
                let x = a[0] + t * (b[0] - a[0]);
                let dir = if b[1] > a[1] { 1 } else { -1 };
                crossings.push((x, dir));
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0i32;
            for pair in crossings.windows(2) {
                winding += match rule {
                    FillRule::NonZero => pair[0].1,
                    FillRule::EvenOdd => 1,
                };
                let inside = match rule {
                    FillRule::NonZero => winding != 0,
                    FillRule::EvenOdd => winding % 2 == 1,
                };
                if inside {
                    self.fill_span(y, pair[0].0, pair[1].0);
                }
            }
        }
    }
}

/// Rasterize closed `(lng, lat)` outlines into a land mask.
///
/// Every outline is filled independently and the results are unioned.
/// Malformed outlines are skipped and counted; they never abort the build.
pub fn build_land_mask<O: AsRef<[[f64; 2]]>>(outlines: &[O], config: &LandMaskConfig) -> LandMask {
    let mut mask = LandMask::empty(config.width.max(1), config.height.max(1));
    for (i, outline) in outlines.iter().enumerate() {
        match GeoPolygon::new(outline.as_ref()) {
            Ok(polygon) => mask.fill_polygon(&polygon, config.fill_rule),
            Err(err) => {
                tracing::warn!(outline = i, %err, "skipping malformed outline");
                mask.skipped_polygons += 1;
            }
        }
    }
    mask
}

/// Owned, lazily built land mask.
///
/// The host constructs one of these and lends it to every globe it creates,
/// so the rasterization runs once no matter how many globes are mounted.
#[derive(Debug)]
pub struct LandMaskResource {
    outlines: Vec<Vec<[f64; 2]>>,
    config: LandMaskConfig,
    mask: OnceCell<LandMask>,
}

impl LandMaskResource {
    pub fn new(outlines: Vec<Vec<[f64; 2]>>, config: LandMaskConfig) -> Self {
        Self {
            outlines,
            config,
            mask: OnceCell::new(),
        }
    }

    /// Resource over the bundled simplified world coastlines.
    pub fn world(config: LandMaskConfig) -> Self {
        Self::new(WORLD_OUTLINES.iter().map(|o| o.to_vec()).collect(), config)
    }

    pub fn config(&self) -> &LandMaskConfig {
        &self.config
    }

    /// The mask, built on first access.
    pub fn get(&self) -> &LandMask {
        self.mask.get_or_init(|| {
            let mask = build_land_mask(&self.outlines, &self.config);
            tracing::debug!(
                width = mask.width(),
                height = mask.height(),
                land_cells = mask.land_cells(),
                skipped = mask.skipped_polygons(),
                "built land mask"
            );
            mask
        })
    }

    pub fn is_built(&self) -> bool {
        self.mask.get().is_some()
    }

    /// Drop the cached mask. Returns whether one was built.
    pub fn release(&mut self) -> bool {
        self.mask.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{FillRule, LandMaskConfig, LandMaskResource, build_land_mask};
    use pretty_assertions::assert_eq;

    fn small(fill_rule: FillRule) -> LandMaskConfig {
        LandMaskConfig {
            width: 360,
            height: 180,
            fill_rule,
        }
    }

    fn equator_block() -> Vec<[f64; 2]> {
        vec![[-20.0, -20.0], [20.0, -20.0], [20.0, 20.0], [-20.0, 20.0]]
    }

    #[test]
    fn reference_points() {
        let mask = build_land_mask(&[equator_block()], &LandMaskConfig::default());
        assert!(mask.is_land(0.0, 0.0));
        assert!(!mask.is_land(0.0, -140.0));
        assert!(!mask.is_land(45.0, 0.0));
    }

    #[test]
    fn fills_expected_area() {
        let mask = build_land_mask(&[equator_block()], &small(FillRule::NonZero));
        // One cell per degree: a 40x40 degree block.
        assert_eq!(mask.land_cells(), 40 * 40);
        assert!(mask.cell(160, 70));
        assert!(!mask.cell(159, 70));
        assert!(mask.cell(199, 109));
        assert!(!mask.cell(200, 109));
    }

    #[test]
    fn skips_malformed_outlines() {
        let outlines = vec![
            vec![[0.0, 0.0], [1.0, 1.0]],
            equator_block(),
            vec![[0.0, 0.0], [500.0, 0.0], [0.0, 5.0]],
        ];
        let mask = build_land_mask(&outlines, &small(FillRule::NonZero));
        assert_eq!(mask.skipped_polygons(), 2);
        assert_eq!(mask.land_cells(), 40 * 40);
    }

    #[test]
    fn fill_rules_differ_on_self_overlap() {
        // The same square traced twice: winding 2 everywhere inside.
        let mut twice = equator_block();
        twice.extend(equator_block());
        let nonzero = build_land_mask(&[twice.clone()], &small(FillRule::NonZero));
        let even_odd = build_land_mask(&[twice], &small(FillRule::EvenOdd));
        assert_eq!(nonzero.land_cells(), 40 * 40);
        assert_eq!(even_odd.land_cells(), 0);
    }

    #[test]
    fn sampling_wraps_longitude_and_clamps_latitude() {
        let mask = build_land_mask(&[equator_block()], &small(FillRule::NonZero));
        assert_eq!(mask.cell_for(0.0, 180.0), Some((0, 90)));
        assert_eq!(mask.cell_for(-90.0, 0.0), Some((180, 179)));
        assert_eq!(mask.cell_for(90.0, -180.0), Some((0, 0)));
        assert_eq!(mask.cell_for(f64::NAN, 0.0), None);
        assert!(!mask.is_land(f64::NAN, 0.0));
    }

    #[test]
    fn world_outlines_classify_known_places() {
        let resource = LandMaskResource::world(LandMaskConfig::default());
        let mask = resource.get();
        assert_eq!(mask.skipped_polygons(), 0);
        assert!(mask.is_land(48.854, 2.333), "Paris");
        assert!(mask.is_land(10.0, 20.0), "central Africa");
        assert!(mask.is_land(-25.0, 134.0), "central Australia");
        assert!(!mask.is_land(0.0, -140.0), "central Pacific");
        assert!(!mask.is_land(-30.0, -20.0), "south Atlantic");
    }

    #[test]
    fn resource_builds_once_and_releases() {
        let mut resource = LandMaskResource::new(vec![equator_block()], small(FillRule::NonZero));
        assert!(!resource.is_built());
        let first = resource.get() as *const _;
        let second = resource.get() as *const _;
        assert_eq!(first, second);
        assert!(resource.is_built());
        assert!(resource.release());
        assert!(!resource.is_built());
        assert!(!resource.release());
    }
}
