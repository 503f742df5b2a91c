use foundation::math::{Vec3, unit_to_lat_lng};
use serde::{Deserialize, Serialize};

use crate::land_mask::LandMask;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotFieldConfig {
    /// Number of points spread over the sphere.
    pub count: usize,
    /// Sphere radius in world units.
    pub radius: f64,
}

impl Default for DotFieldConfig {
    fn default() -> Self {
        Self {
            count: 8500,
            radius: 260.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpherePoint {
    pub unit_position: Vec3,
    pub is_land: bool,
}

/// Static globe geometry: dot positions already scaled to the sphere radius.
#[derive(Debug, Clone, PartialEq)]
pub struct DotField {
    pub radius: f64,
    pub land: Vec<Vec3>,
    pub ocean: Vec<Vec3>,
}

impl DotField {
    pub fn len(&self) -> usize {
        self.land.len() + self.ocean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn land_fraction(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.land.len() as f64 / self.len() as f64
        }
    }
}

/// `π (3 - √5)`, the angle between successive points of the spiral.
pub fn golden_angle() -> f64 {
    std::f64::consts::PI * (3.0 - 5f64.sqrt())
}

/// The `i`-th of `count` points of the Fibonacci spiral, from the north pole down.
pub fn fibonacci_point(i: usize, count: usize) -> Vec3 {
    let y = if count > 1 {
        1.0 - (i as f64 / (count - 1) as f64) * 2.0
    } else {
        1.0
    };
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle() * i as f64;
    Vec3::new(theta.cos() * r, y, theta.sin() * r)
}

pub fn fibonacci_sphere(count: usize) -> impl Iterator<Item = Vec3> {
    (0..count).map(move |i| fibonacci_point(i, count))
}

/// Classify the unit Fibonacci points against `mask`.
pub fn classify_points(count: usize, mask: &LandMask) -> impl Iterator<Item = SpherePoint> + '_ {
    fibonacci_sphere(count).map(move |p| {
        let geo = unit_to_lat_lng(p);
        SpherePoint {
            unit_position: p,
            is_land: mask.is_land(geo.lat_deg, geo.lng_deg),
        }
    })
}

/// Deterministically distribute `count` dots over a sphere of `radius` and
/// split them by the land mask. Output order follows the spiral index.
pub fn generate_dots(count: usize, radius: f64, mask: &LandMask) -> DotField {
    let mut field = DotField {
        radius,
        land: Vec::new(),
        ocean: Vec::new(),
    };
    for point in classify_points(count, mask) {
        let position = point.unit_position.scale(radius);
        if point.is_land {
            field.land.push(position);
        } else {
            field.ocean.push(position);
        }
    }
    tracing::debug!(
        count,
        land = field.land.len(),
        ocean = field.ocean.len(),
        "generated dot field"
    );
    field
}

#[cfg(test)]
mod tests {
    use super::{DotField, classify_points, fibonacci_point, fibonacci_sphere, generate_dots};
    use crate::land_mask::{LandMaskConfig, LandMaskResource, build_land_mask};
    use foundation::math::{Vec3, lat_lng_to_3d, unit_to_lat_lng};

    fn bits(field: &DotField) -> Vec<[u64; 3]> {
        field
            .land
            .iter()
            .chain(field.ocean.iter())
            .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
            .collect()
    }

    #[test]
    fn generation_is_bitwise_deterministic() {
        let resource = LandMaskResource::world(LandMaskConfig::default());
        let a = generate_dots(2000, 260.0, resource.get());
        let b = generate_dots(2000, 260.0, resource.get());
        assert_eq!(a.land.len(), b.land.len());
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn points_lie_on_the_sphere() {
        for p in fibonacci_sphere(500) {
            assert!((p.length() - 1.0).abs() < 1e-9);
        }
        assert_eq!(fibonacci_point(0, 500), Vec3::new(0.0, 1.0, 0.0));
        assert!((fibonacci_point(499, 500).y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn tiny_counts_do_not_produce_nan() {
        let mask = build_land_mask::<Vec<[f64; 2]>>(&[], &LandMaskConfig::default());
        assert!(generate_dots(0, 1.0, &mask).is_empty());
        let one = generate_dots(1, 2.0, &mask);
        assert_eq!(one.ocean, vec![Vec3::new(0.0, 2.0, 0.0)]);
    }

    #[test]
    fn partitions_every_point() {
        let resource = LandMaskResource::world(LandMaskConfig::default());
        let field = generate_dots(8500, 260.0, resource.get());
        assert_eq!(field.len(), 8500);
        let fraction = field.land_fraction();
        assert!((0.1..0.45).contains(&fraction), "land fraction {fraction}");
    }

    #[test]
    fn classification_agrees_with_marker_placement() {
        // A position produced by the marker mapping must classify the same way
        // as the mask sample at that coordinate.
        let resource = LandMaskResource::world(LandMaskConfig::default());
        let mask = resource.get();
        for &(lat, lng) in &[(10.13, 20.07), (0.37, -140.21), (-25.11, 134.03), (48.854, 2.333)] {
            let geo = unit_to_lat_lng(lat_lng_to_3d(lat, lng, 1.0));
            assert_eq!(mask.is_land(geo.lat_deg, geo.lng_deg), mask.is_land(lat, lng));
        }
        let land: Vec<_> = classify_points(3000, mask).filter(|p| p.is_land).collect();
        assert!(!land.is_empty());
    }
}
