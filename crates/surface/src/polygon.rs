/// Closed lat/lng outline, stored as `(longitude, latitude)` pairs in degrees.
///
/// The closing edge from the last vertex back to the first is implicit; an
/// explicit repeat of the first vertex is dropped on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPolygon {
    vertices: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolygonError {
    TooFewVertices(usize),
    OutOfRange { index: usize, lng: f64, lat: f64 },
}

impl std::fmt::Display for PolygonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolygonError::TooFewVertices(n) => {
                write!(f, "polygon needs at least 3 vertices, got {n}")
            }
            PolygonError::OutOfRange { index, lng, lat } => {
                write!(f, "vertex {index} out of range: lng={lng} lat={lat}")
            }
        }
    }
}

impl std::error::Error for PolygonError {}

impl GeoPolygon {
    pub fn new(vertices: &[[f64; 2]]) -> Result<Self, PolygonError> {
        let mut vertices = vertices.to_vec();
        drop_closing_duplicate(&mut vertices);
        if vertices.len() < 3 {
            return Err(PolygonError::TooFewVertices(vertices.len()));
        }
        for (index, &[lng, lat]) in vertices.iter().enumerate() {
            let in_range = lng.is_finite()
                && lat.is_finite()
                && (-180.0..=180.0).contains(&lng)
                && (-90.0..=90.0).contains(&lat);
            if !in_range {
                return Err(PolygonError::OutOfRange { index, lng, lat });
            }
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    /// Edges as `(from, to)` pairs, including the implicit closing edge.
    pub fn edges(&self) -> impl Iterator<Item = ([f64; 2], [f64; 2])> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

fn drop_closing_duplicate(points: &mut Vec<[f64; 2]>) {
    if points.len() >= 2 {
        let first = points[0];
        let last = points[points.len() - 1];
        if (first[0] - last[0]).abs() < 1e-9 && (first[1] - last[1]).abs() < 1e-9 {
            points.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoPolygon, PolygonError};

    #[test]
    fn rejects_degenerate_outlines() {
        assert_eq!(
            GeoPolygon::new(&[[0.0, 0.0], [1.0, 1.0]]),
            Err(PolygonError::TooFewVertices(2))
        );
        // A closed triangle written with its first vertex repeated is only 2 distinct points.
        assert_eq!(
            GeoPolygon::new(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]),
            Err(PolygonError::TooFewVertices(2))
        );
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let err = GeoPolygon::new(&[[0.0, 0.0], [190.0, 1.0], [2.0, 2.0]]).unwrap_err();
        assert!(matches!(err, PolygonError::OutOfRange { index: 1, .. }));
        assert!(GeoPolygon::new(&[[0.0, f64::NAN], [1.0, 1.0], [2.0, 2.0]]).is_err());
    }

    #[test]
    fn edges_close_the_ring() {
        let p = GeoPolygon::new(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]]).unwrap();
        let edges: Vec<_> = p.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], ([10.0, 10.0], [0.0, 0.0]));
    }
}
