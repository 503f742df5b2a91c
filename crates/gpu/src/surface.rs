/// Backing-store scale is capped here regardless of the display.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Color target size in device pixels, derived from a CSS size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

fn effective_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

impl SurfaceSize {
    /// `None` when the CSS size is zero, negative or not finite.
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Option<Self> {
        let usable = css_width.is_finite() && css_height.is_finite() && css_width > 0.0 && css_height > 0.0;
        if !usable {
            return None;
        }
        let pixel_ratio = effective_ratio(device_pixel_ratio);
        Some(Self {
            width: (css_width * pixel_ratio).round().max(1.0) as u32,
            height: (css_height * pixel_ratio).round().max(1.0) as u32,
            pixel_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SurfaceSize;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_unusable_sizes() {
        assert!(SurfaceSize::new(0.0, 700.0, 1.0).is_none());
        assert!(SurfaceSize::new(700.0, f64::NAN, 1.0).is_none());
        assert!(SurfaceSize::new(-1.0, 10.0, 1.0).is_none());
    }

    #[test]
    fn caps_pixel_ratio() {
        let s = SurfaceSize::new(700.0, 700.0, 3.0).unwrap();
        assert_eq!((s.width, s.height, s.pixel_ratio), (1400, 1400, 2.0));
        let s = SurfaceSize::new(700.0, 350.0, f64::NAN).unwrap();
        assert_eq!((s.width, s.height, s.pixel_ratio), (700, 350, 1.0));
        let s = SurfaceSize::new(0.2, 0.2, 1.0).unwrap();
        assert_eq!((s.width, s.height), (1, 1));
    }
}
