use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Shading applied to a table row for visual grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Plain row
    #[default]
    None,
    /// First page of a section (month covers, first backlog page, ...)
    SectionHeader,
    /// Marker row inside a section (first week of a month, weekend days)
    FirstItem,
}

/// Page count summary for a planner
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerStatistics {
    /// Year the planner covers
    pub year: i32,
    /// ISO weeks in that year (52 or 53)
    pub iso_weeks: u32,
    /// Pages of the table of contents, padding included
    pub toc_pages: usize,
    /// Pages before page numbering starts (cover, instructions, calendar, TOC)
    pub front_matter_pages: usize,
    /// Pages carrying a page number (Goals through Graph Paper)
    pub numbered_pages: usize,
    /// Pages after the numbered section (rear cover)
    pub back_matter_pages: usize,
    /// Physical page sides in the whole document
    pub total_pages: usize,
    /// Duplex sheets needed to print the document
    pub sheets: usize,
    /// Blank versos inserted to keep sections starting on a recto
    pub blank_pages_added: usize,
    /// Entries listed in the table of contents
    pub toc_entries: usize,
}
