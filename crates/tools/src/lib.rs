//! Headless helpers behind the `globe` command-line tool.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use globe::{GlobeConfig, GlobeError, markers_from_json, showcase_markers};
use gpu::{RenderError, Rgba};
use scene::Marker;
use serde::Serialize;
use surface::{DotField, LandMask};

#[derive(Debug)]
pub enum ToolError {
    Io { path: String, source: io::Error },
    Globe(GlobeError),
    Render(RenderError),
    /// The requested size cannot back a render surface.
    BadSize { width: f64, height: f64 },
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::Io { path, source } => write!(f, "{path}: {source}"),
            ToolError::Globe(err) => write!(f, "{err}"),
            ToolError::Render(err) => write!(f, "{err}"),
            ToolError::BadSize { width, height } => write!(f, "unusable surface size {width}x{height}"),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<RenderError> for ToolError {
    fn from(err: RenderError) -> Self {
        ToolError::Render(err)
    }
}

impl From<GlobeError> for ToolError {
    fn from(err: GlobeError) -> Self {
        ToolError::Globe(err)
    }
}

fn read(path: &Path) -> Result<String, ToolError> {
    fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_config(path: Option<&Path>) -> Result<GlobeConfig, ToolError> {
    match path {
        Some(path) => Ok(GlobeConfig::from_json_str(&read(path)?).map_err(GlobeError::from)?),
        None => Ok(GlobeConfig::default()),
    }
}

/// Markers from a JSON file, or the built-in showcase set.
pub fn load_markers(path: Option<&Path>) -> Result<Vec<Marker>, ToolError> {
    match path {
        Some(path) => Ok(markers_from_json(&read(path)?)?),
        None => Ok(showcase_markers()),
    }
}

/// Page color the transparent globe surface is composited onto.
pub fn backdrop(dark: bool) -> Rgba {
    if dark {
        Rgba::rgb(0x0b, 0x0b, 0x14)
    } else {
        Rgba::rgb(0xff, 0xff, 0xff)
    }
}

/// Binary PPM (P6) of premultiplied RGBA pixels over an opaque backdrop.
pub fn write_ppm<W: Write>(out: &mut W, width: u32, height: u32, rgba: &[u8], backdrop: Rgba) -> io::Result<()> {
    write!(out, "P6\n{width} {height}\n255\n")?;
    let mut row = Vec::with_capacity(width as usize * 3);
    for line in rgba.chunks(width as usize * 4) {
        row.clear();
        for px in line.chunks_exact(4) {
            let a = px[3] as f32 / 255.0;
            for (c, b) in px[..3].iter().zip([backdrop.r, backdrop.g, backdrop.b]) {
                row.push((*c as f32 + b as f32 * (1.0 - a)).round().min(255.0) as u8);
            }
        }
        out.write_all(&row)?;
    }
    Ok(())
}

/// Binary PGM (P5): land white, ocean black.
pub fn write_pgm<W: Write>(out: &mut W, mask: &LandMask) -> io::Result<()> {
    write!(out, "P5\n{} {}\n255\n", mask.width(), mask.height())?;
    let mut row = vec![0u8; mask.width() as usize];
    for y in 0..mask.height() {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = if mask.cell(x as u32, y) { 255 } else { 0 };
        }
        out.write_all(&row)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotSummary {
    pub count: usize,
    pub land: usize,
    pub ocean: usize,
    pub land_fraction: f64,
    pub radius: f64,
}

impl DotSummary {
    pub fn of(field: &DotField) -> Self {
        Self {
            count: field.len(),
            land: field.land.len(),
            ocean: field.ocean.len(),
            land_fraction: field.land_fraction(),
            radius: field.radius,
        }
    }
}

/// `x,y,z,land` rows, land points first.
pub fn write_dots_csv<W: Write>(out: &mut W, field: &DotField) -> io::Result<()> {
    writeln!(out, "x,y,z,land")?;
    let rows = field
        .land
        .iter()
        .map(|p| (p, 1))
        .chain(field.ocean.iter().map(|p| (p, 0)));
    for (p, land) in rows {
        writeln!(out, "{:.4},{:.4},{:.4},{land}", p.x, p.y, p.z)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DotSummary, write_dots_csv, write_pgm, write_ppm};
    use foundation::math::Vec3;
    use gpu::Rgba;
    use pretty_assertions::assert_eq;
    use surface::{DotField, LandMaskConfig, build_land_mask};

    #[test]
    fn ppm_composites_over_backdrop() {
        // Opaque red, transparent, then half-covering premultiplied blue.
        let rgba = [255, 0, 0, 255, 0, 0, 0, 0, 0, 0, 100, 102];
        let mut out = Vec::new();
        write_ppm(&mut out, 3, 1, &rgba, Rgba::rgb(10, 20, 200)).unwrap();
        assert_eq!(&out[..11], b"P6\n3 1\n255\n");
        assert_eq!(&out[11..], &[255, 0, 0, 10, 20, 200, 6, 12, 220]);
    }

    #[test]
    fn pgm_marks_land_cells() {
        let block = vec![[-20.0, -20.0], [20.0, -20.0], [20.0, 20.0], [-20.0, 20.0]];
        let config = LandMaskConfig {
            width: 36,
            height: 18,
            ..LandMaskConfig::default()
        };
        let mask = build_land_mask(&[block], &config);
        let mut out = Vec::new();
        write_pgm(&mut out, &mask).unwrap();
        let header = b"P5\n36 18\n255\n";
        assert_eq!(&out[..header.len()], header);
        let body = &out[header.len()..];
        assert_eq!(body.len(), 36 * 18);
        assert_eq!(body.iter().filter(|b| **b == 255).count(), mask.land_cells());
        assert_eq!(body[9 * 36 + 18], 255);
    }

    #[test]
    fn dots_csv_and_summary() {
        let field = DotField {
            radius: 1.0,
            land: vec![Vec3::new(0.0, 1.0, 0.0)],
            ocean: vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)],
        };
        let mut out = Vec::new();
        write_dots_csv(&mut out, &field).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "x,y,z,land");
        assert_eq!(lines[1], "0.0000,1.0000,0.0000,1");
        assert_eq!(lines.len(), 4);
        let summary = DotSummary::of(&field);
        assert_eq!((summary.count, summary.land, summary.ocean), (3, 1, 2));
    }
}
