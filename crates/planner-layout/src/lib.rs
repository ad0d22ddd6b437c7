pub mod calendar;
mod config;
pub mod constants;
mod geometry;
pub mod pagination;
mod plan;
pub mod rows;
mod stats;
pub mod toc;
mod types;

pub use config::*;
pub use geometry::PageGeometry;
pub use pagination::{PageSide, PageTracker, SectionKind, SectionPlan};
pub use plan::*;
pub use rows::{validate_row_height, RowHeightCheck, RowHeightSpec};
pub use stats::calculate_statistics;
pub use toc::TocEntry;
pub use types::*;
