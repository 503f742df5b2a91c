use super::Vec3;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl LatLng {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }

    pub fn is_valid(self) -> bool {
        self.lat_deg.is_finite()
            && self.lng_deg.is_finite()
            && (-90.0..=90.0).contains(&self.lat_deg)
            && (-180.0..=180.0).contains(&self.lng_deg)
    }

    /// Clamp into `[-90, 90] x [-180, 180]`. Non-finite components become 0.
    pub fn clamped(self) -> Self {
        let fix = |v: f64, lim: f64| if v.is_finite() { v.clamp(-lim, lim) } else { 0.0 };
        Self::new(fix(self.lat_deg, 90.0), fix(self.lng_deg, 180.0))
    }
}

/// Place a geographic coordinate on a sphere centered at the origin.
///
/// `+y` is the north pole. Longitude 0 lands on `-x` and longitude -90 on `+z`;
/// [`unit_to_lat_lng`] is the exact inverse and must be used wherever a sphere
/// position is turned back into a coordinate.
pub fn lat_lng_to_3d(lat_deg: f64, lng_deg: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lng_deg + 180.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    )
}

/// Inverse of [`lat_lng_to_3d`] for a point on the unit sphere.
pub fn unit_to_lat_lng(p: Vec3) -> LatLng {
    let lat = p.y.clamp(-1.0, 1.0).asin().to_degrees();
    let lng = wrap_lng_deg(p.z.atan2(p.x).to_degrees() - 180.0);
    LatLng::new(lat, lng)
}

/// Wrap a longitude into `[-180, 180)`.
pub fn wrap_lng_deg(lng_deg: f64) -> f64 {
    (lng_deg + 180.0).rem_euclid(360.0) - 180.0
}
