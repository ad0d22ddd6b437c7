use planner_layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("PDF converter not found: {0}")]
    ConverterMissing(String),
    #[error("PDF conversion failed: {0}")]
    ConversionFailed(String),
    #[error("Rendered {actual} pages but the plan expects {expected}")]
    PageCount { expected: usize, actual: usize },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
