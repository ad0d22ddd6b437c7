//! Year planner rendering: document model, section drivers and the DOCX
//! and PDF writers.
//!
//! The async functions here are the pipeline stages the CLI drives. Each
//! runs its CPU-bound part on the blocking pool and does file I/O with
//! `tokio::fs`.

pub mod assets;
pub mod convert;
pub mod docx;
pub mod grid_image;
pub mod io;
pub mod model;
pub mod overlay;
pub mod pdf;
pub mod sections;
pub mod style;
mod types;

pub use assets::Assets;
pub use convert::{convert_to_pdf, PdfEngine};
pub use docx::write_docx;
pub use model::*;
pub use pdf::{render_pdf, render_pdf_with_extents, RenderedPdf, SideExtent};
pub use sections::build_document;
pub use types::*;

use planner_layout::{DocumentPlan, PlannerConfig};
use std::path::Path;
use std::sync::Arc;

/// Validate `config`, load the images and assemble the whole planner.
///
/// `progress` is called with the name of each section as it starts.
pub async fn build_planner(
    config: &PlannerConfig,
    progress: impl FnMut(&str) + Send + 'static,
) -> Result<PlannerDocument> {
    config.validate()?;
    let assets = Assets::load(config).await?;
    let config = config.clone();

    // Layout is CPU-bound, spawn blocking
    tokio::task::spawn_blocking(move || {
        let plan = DocumentPlan::new(&config)?;
        build_document(&config, &plan, assets, progress)
    })
    .await?
}

/// Serialize `doc` as `.docx` and write it to `path`
pub async fn save_docx(
    doc: Arc<PlannerDocument>,
    generator: &str,
    path: impl AsRef<Path>,
) -> Result<()> {
    let generator = generator.to_owned();
    let bytes = tokio::task::spawn_blocking(move || write_docx(&doc, &generator)).await??;
    io::save(path, &bytes).await
}
