use foundation::math::LatLng;
use serde::{Deserialize, Serialize};

pub const MAX_RATING: f64 = 5.0;

/// A labeled location on the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
}

impl Marker {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        rating: f64,
        description: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            rating,
            description: description.into(),
            latitude,
            longitude,
        }
    }

    /// Coordinates safe to project: clamped, with non-finite parts zeroed.
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude).clamped()
    }

    pub fn clamped_rating(&self) -> f64 {
        if self.rating.is_finite() {
            self.rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        }
    }
}

/// One overlay card for the current frame.
///
/// `screen_x`/`screen_y` are the card's top-left corner in CSS pixels,
/// already clamped so the card stays inside the viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedVisibleMarker {
    pub name: String,
    pub location: String,
    pub description: String,
    pub rating: f64,
    pub screen_x: f64,
    pub screen_y: f64,
    pub depth_factor: f64,
}

#[cfg(test)]
mod tests {
    use super::Marker;
    use foundation::math::LatLng;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_short_field_names() {
        let json = r#"{"name":"Café de Flore","location":"Paris","rating":4.8,
            "desc":"Iconic literary café since 1887","lat":48.854,"lng":2.333}"#;
        let marker: Marker = serde_json::from_str(json).unwrap();
        assert_eq!(
            marker,
            Marker::new(
                "Café de Flore",
                "Paris",
                4.8,
                "Iconic literary café since 1887",
                48.854,
                2.333
            )
        );
    }

    #[test]
    fn optional_fields_default() {
        let marker: Marker = serde_json::from_str(r#"{"name":"x","latitude":1,"longitude":2}"#).unwrap();
        assert_eq!(marker.description, "");
        assert_eq!(marker.rating, 0.0);
        assert!(serde_json::from_str::<Marker>(r#"{"name":"x"}"#).is_err());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let marker = Marker::new("x", "", 9.0, "", 120.0, f64::NAN);
        assert_eq!(marker.position(), LatLng::new(90.0, 0.0));
        assert_eq!(marker.clamped_rating(), 5.0);
    }
}
