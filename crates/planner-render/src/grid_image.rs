//! Graph paper raster, cached on disk
//!
//! The file name encodes every input of the raster, so a cached file is
//! reused only when it was produced from the same settings.

use crate::types::*;
use image::{ImageFormat, Rgb, RgbImage};
use planner_layout::constants::{cm_to_px, grayscale_channel};
use planner_layout::{GraphPaperConfig, PageGeometry};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Everything that determines the grid raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    pub grid_percent: u8,
    pub border_percent: u8,
    pub width_px: u32,
    pub height_px: u32,
}

impl GridSpec {
    /// Grid filling the content area at print density
    pub fn new(config: &GraphPaperConfig, geometry: &PageGeometry) -> Self {
        Self {
            columns: config.columns.max(1),
            rows: config.rows.max(1),
            grid_percent: config.grid_color_percent,
            border_percent: config.border_color_percent,
            width_px: cm_to_px(geometry.content_width(true)),
            height_px: cm_to_px(geometry.content_height()),
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "graph_paper_{}x{}_{}_{}_{}x{}px.png",
            self.columns,
            self.rows,
            self.grid_percent,
            self.border_percent,
            self.width_px,
            self.height_px
        )
    }
}

fn gray(percent: u8) -> Rgb<u8> {
    let v = grayscale_channel(percent);
    Rgb([v, v, v])
}

/// Draw the grid: 1px interior lines and a 2px outer border on white
pub fn render_grid(spec: &GridSpec) -> RgbImage {
    let (w, h) = (spec.width_px.max(4), spec.height_px.max(4));
    let mut img = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
    let grid = gray(spec.grid_percent);
    let border = gray(spec.border_percent);

    for i in 1..spec.columns {
        let x = (u64::from(i) * u64::from(w) / u64::from(spec.columns)) as u32;
        for y in 0..h {
            img.put_pixel(x, y, grid);
        }
    }
    for i in 1..spec.rows {
        let y = (u64::from(i) * u64::from(h) / u64::from(spec.rows)) as u32;
        for x in 0..w {
            img.put_pixel(x, y, grid);
        }
    }

    for x in 0..w {
        for y in [0, 1, h - 2, h - 1] {
            img.put_pixel(x, y, border);
        }
    }
    for y in 0..h {
        for x in [0, 1, w - 2, w - 1] {
            img.put_pixel(x, y, border);
        }
    }

    img
}

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Return the cached grid image for `spec`, rendering it first if missing
pub async fn ensure_grid_image(dir: impl AsRef<Path>, spec: GridSpec) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let path = dir.join(spec.file_name());

    if tokio::fs::try_exists(&path).await? {
        log::debug!("Grid image cache hit: {}", path.display());
        return Ok(path);
    }

    tokio::fs::create_dir_all(dir).await?;

    // Rasterizing is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || encode_png(&render_grid(&spec))).await??;

    tokio::fs::write(&path, &bytes).await?;
    log::info!(
        "Generated grid image {} ({}x{} px)",
        path.display(),
        spec.width_px,
        spec.height_px
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GridSpec {
        GridSpec {
            columns: 4,
            rows: 5,
            grid_percent: 15,
            border_percent: 100,
            width_px: 40,
            height_px: 50,
        }
    }

    #[test]
    fn test_file_name_encodes_settings() {
        let geometry = PageGeometry::from_config(&planner_layout::PageConfig::default());
        let spec = GridSpec::new(&GraphPaperConfig::default(), &geometry);
        assert_eq!(spec.width_px, 2125);
        assert_eq!(spec.height_px, 3212);
        assert_eq!(spec.file_name(), "graph_paper_37x56_15_100_2125x3212px.png");
    }

    #[test]
    fn test_grid_lines() {
        let img = render_grid(&small());
        let white = Rgb([255, 255, 255]);
        let line = gray(15);
        let border = gray(100);

        assert_eq!(*img.get_pixel(0, 20), border);
        assert_eq!(*img.get_pixel(1, 20), border);
        assert_eq!(*img.get_pixel(39, 20), border);
        // Interior vertical line at int(1 * 40 / 4)
        assert_eq!(*img.get_pixel(10, 15), line);
        // Interior horizontal line at int(1 * 50 / 5)
        assert_eq!(*img.get_pixel(15, 10), line);
        assert_eq!(*img.get_pixel(15, 15), white);
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = encode_png(&render_grid(&small())).unwrap();
        let b = encode_png(&render_grid(&small())).unwrap();
        assert_eq!(a, b);
    }
}
