//! Images placed in the planner

use crate::grid_image::{ensure_grid_image, GridSpec};
use crate::model::StoredImage;
use crate::types::*;
use image::ImageReader;
use planner_layout::{PageGeometry, PlannerConfig};
use std::io::Cursor;
use std::path::Path;

/// File name of the instructions page image inside `assets.image_dir`
pub const INSTRUCTIONS_IMAGE: &str = "instructions.png";

impl StoredImage {
    /// Wrap PNG bytes, reading only the header for the pixel size
    pub fn from_png(png: Vec<u8>) -> Result<Self> {
        let (width_px, height_px) = ImageReader::new(Cursor::new(&png))
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(Self {
            png,
            width_px,
            height_px,
        })
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let png = tokio::fs::read(path.as_ref()).await?;
        Self::from_png(png)
    }
}

#[derive(Debug, Clone)]
pub struct Assets {
    /// `None` when the instructions image is missing
    pub instructions: Option<StoredImage>,
    pub grid: StoredImage,
}

impl Assets {
    /// Load the instructions image and the (cached) graph paper grid
    pub async fn load(config: &PlannerConfig) -> Result<Self> {
        let dir = &config.assets.image_dir;
        let instructions_path = dir.join(INSTRUCTIONS_IMAGE);

        let instructions = if tokio::fs::try_exists(&instructions_path).await? {
            Some(StoredImage::load(&instructions_path).await?)
        } else {
            log::warn!(
                "Instructions image not found: {}",
                instructions_path.display()
            );
            None
        };

        let geometry = PageGeometry::from_config(&config.page);
        let spec = GridSpec::new(&config.graph_paper, &geometry);
        let grid_path = ensure_grid_image(dir, spec).await?;
        let grid = StoredImage::load(&grid_path).await?;

        Ok(Self { instructions, grid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_image::{encode_png, render_grid};

    #[test]
    fn test_from_png_reads_dimensions() {
        let spec = GridSpec {
            columns: 2,
            rows: 2,
            grid_percent: 15,
            border_percent: 100,
            width_px: 30,
            height_px: 20,
        };
        let png = encode_png(&render_grid(&spec)).unwrap();
        let image = StoredImage::from_png(png).unwrap();
        assert_eq!((image.width_px, image.height_px), (30, 20));
    }

    #[test]
    fn test_from_png_rejects_garbage() {
        assert!(StoredImage::from_png(b"not an image".to_vec()).is_err());
    }

    #[tokio::test]
    async fn test_missing_instructions_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PlannerConfig::default();
        config.assets.image_dir = dir.path().to_path_buf();
        config.graph_paper.columns = 4;
        config.graph_paper.rows = 4;

        let assets = Assets::load(&config).await.unwrap();
        assert!(assets.instructions.is_none());
        assert!(assets.grid.width_px > 0);
    }
}
