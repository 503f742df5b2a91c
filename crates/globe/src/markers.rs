use foundation::math::LatLng;
use scene::Marker;

use crate::error::GlobeError;

/// Parse a JSON array of markers. Entries may use `lat`/`lng`/`desc` or the
/// long field names.
pub fn markers_from_json(json: &str) -> Result<Vec<Marker>, GlobeError> {
    let markers: Vec<Marker> = serde_json::from_str(json).map_err(GlobeError::Markers)?;
    let out_of_range = markers
        .iter()
        .filter(|m| !LatLng::new(m.latitude, m.longitude).is_valid())
        .count();
    if out_of_range > 0 {
        tracing::warn!(out_of_range, "markers with invalid coordinates will be clamped");
    }
    Ok(markers)
}

/// Built-in demo set of twelve well-known places.
pub fn showcase_markers() -> Vec<Marker> {
    [
        ("Café de Flore", "Paris, France", 4.8, 48.854, 2.333, "Iconic literary café since 1887"),
        ("Ichiran Ramen", "Tokyo, Japan", 4.9, 35.693, 139.703, "Solo ramen dining experience"),
        ("Taquería Los Cocuyos", "Mexico City", 4.8, 19.432, -99.133, "Legendary late-night tacos"),
        ("City Lights Books", "San Francisco", 4.8, 37.798, -122.407, "Beat Generation bookshop"),
        ("Warung Babi Guling", "Bali, Indonesia", 4.7, -8.506, 115.262, "Famous roast suckling pig"),
        ("Tim Ho Wan", "Hong Kong", 4.8, 22.319, 114.170, "Cheapest Michelin star"),
        ("Pieminister", "London, UK", 4.5, 51.524, -0.072, "Gourmet British pies"),
        ("Schwartz's Deli", "Montreal, Canada", 4.7, 45.518, -73.577, "Smoked meat since 1928"),
        ("Lune Croissanterie", "Melbourne, AU", 4.9, -37.810, 144.939, "World's best croissants"),
        ("Bo-Kaap Kombuis", "Cape Town, SA", 4.6, -33.921, 18.414, "Cape Malay cuisine"),
        ("Bar Luce", "Milan, Italy", 4.6, 45.463, 9.176, "Wes Anderson café"),
        ("Boulangerie Poilâne", "Paris, France", 4.9, 48.851, 2.328, "Famous sourdough bread"),
    ]
    .into_iter()
    .map(|(name, location, rating, lat, lng, desc)| Marker::new(name, location, rating, desc, lat, lng))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{markers_from_json, showcase_markers};
    use crate::error::GlobeError;

    #[test]
    fn showcase_set_is_valid() {
        let markers = showcase_markers();
        assert_eq!(markers.len(), 12);
        for m in &markers {
            assert!(m.position().is_valid(), "{}", m.name);
            assert!((0.0..=5.0).contains(&m.rating));
        }
    }

    #[test]
    fn parses_both_field_spellings() {
        let json = r#"[
            {"name":"A","lat":1.5,"lng":2.5,"desc":"short"},
            {"name":"B","location":"X","rating":3,"latitude":-10,"longitude":170,"description":"long"}
        ]"#;
        let markers = markers_from_json(json).unwrap();
        assert_eq!(markers[0].description, "short");
        assert_eq!(markers[1].longitude, 170.0);
        assert!(matches!(markers_from_json("{}"), Err(GlobeError::Markers(_))));
    }
}
