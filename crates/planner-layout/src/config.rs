use crate::types::*;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete planner configuration.
///
/// `document`, `page`, `table` and `cover` are required in a configuration
/// file; every other section falls back to its `Default`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannerConfig {
    pub document: DocumentConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub document_generator: GeneratorConfig,
    pub page: PageConfig,
    pub table: TableConfig,
    pub cover: CoverConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub debug: DebugConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config_info_overlay: OverlayConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub toc: TocConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub calendar: CalendarConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub week_planner: WeekPlannerConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub goals: GoalsConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub backlog: BacklogConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub daily_spread: DailySpreadConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub terms_definitions: TermsConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub graph_paper: GraphPaperConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assets: AssetsConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            document: DocumentConfig::default(),
            document_generator: GeneratorConfig::default(),
            page: PageConfig::default(),
            table: TableConfig::default(),
            cover: CoverConfig::default(),
            debug: DebugConfig::default(),
            config_info_overlay: OverlayConfig::default(),
            toc: TocConfig::default(),
            calendar: CalendarConfig::default(),
            week_planner: WeekPlannerConfig::default(),
            goals: GoalsConfig::default(),
            backlog: BacklogConfig::default(),
            daily_spread: DailySpreadConfig::default(),
            terms_definitions: TermsConfig::default(),
            graph_paper: GraphPaperConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocumentConfig {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::string_or_number"))]
    pub version: String,
    pub year: i32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Year Planner".to_string(),
            version: "1.0".to_string(),
            year: 2026,
        }
    }
}

/// Metadata printed in the generator's banner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GeneratorConfig {
    pub program: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::string_or_number"))]
    pub version: String,
    pub release: String,
    pub author: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "Year Planner Generator".to_string(),
            version: "1.0".to_string(),
            release: "Unknown".to_string(),
            author: "Unknown".to_string(),
        }
    }
}

/// Page size and margins, all in centimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub gutter_size: f64,
    /// Footer distance from the bottom edge
    pub page_number_position: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        // A4 portrait
        Self {
            width: 21.0,
            height: 29.7,
            margin_top: 1.0,
            margin_bottom: 1.5,
            margin_left: 1.0,
            margin_right: 1.0,
            gutter_size: 1.0,
            page_number_position: 0.8,
        }
    }
}

// =============================================================================
// Table Styling
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BorderConfig {
    /// Line thickness in points
    pub thickness: f64,
    /// 0 = white, 100 = black
    pub grayscale: u8,
}

/// Styling shared by title and header rows
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowStyleConfig {
    /// Row height in points
    pub height: f64,
    pub background_grayscale: u8,
    /// Font size in points
    pub font_size: f64,
    pub font_grayscale: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentRowConfig {
    pub font_size: f64,
    pub font_grayscale: u8,
    pub font_italic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableConfig {
    pub border: BorderConfig,
    pub title_row: RowStyleConfig,
    pub header_row: RowStyleConfig,
    pub content_row: ContentRowConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            border: BorderConfig {
                thickness: 0.5,
                grayscale: 100,
            },
            title_row: RowStyleConfig {
                height: 18.0,
                background_grayscale: 25,
                font_size: 12.0,
                font_grayscale: 100,
            },
            header_row: RowStyleConfig {
                height: 14.0,
                background_grayscale: 10,
                font_size: 10.0,
                font_grayscale: 100,
            },
            content_row: ContentRowConfig {
                font_size: 9.0,
                font_grayscale: 60,
                font_italic: true,
            },
        }
    }
}

impl TableConfig {
    pub fn title_row_twips(&self) -> i64 {
        crate::constants::pt_to_twips(self.title_row.height)
    }

    pub fn header_row_twips(&self) -> i64 {
        crate::constants::pt_to_twips(self.header_row.height)
    }
}

// =============================================================================
// Cover
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverConfig {
    pub contact_fields: Vec<String>,
    pub contact_table: ContactTableConfig,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            contact_fields: ["Name", "Phone", "Email", "Address"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            contact_table: ContactTableConfig::default(),
        }
    }
}

/// Contact table on the inside cover; lengths in centimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactTableConfig {
    pub row_height: f64,
    pub label_width: f64,
    pub value_width: f64,
    #[cfg_attr(feature = "serde", serde(default = "de::label_grayscale"))]
    pub label_grayscale: u8,
}

impl Default for ContactTableConfig {
    fn default() -> Self {
        Self {
            row_height: 1.2,
            label_width: 3.0,
            value_width: 10.0,
            label_grayscale: 5,
        }
    }
}

// =============================================================================
// Debugging Aids
// =============================================================================

/// Debug switches.
///
/// Accepts the old boolean form (`debug: true`) as well as a map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(from = "de::DebugRepr"))]
pub struct DebugConfig {
    /// Draw content-area, gutter and margin guides on every page
    pub enabled: bool,
    /// Print the configuration in a box on every page
    pub config_info_overlay: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct OverlayConfig {
    /// Distance from the bottom edge in cm
    pub bottom: f64,
    /// Distance from the right edge on rectos in cm
    pub right: f64,
    /// Distance from the left edge on versos in cm
    pub left: f64,
    pub width: f64,
    pub title: String,
    pub title_font_size: f64,
    pub data_font_size: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            bottom: 1.5,
            right: 1.5,
            left: 1.5,
            width: 6.0,
            title: "Config Info".to_string(),
            title_font_size: 7.0,
            data_font_size: 5.0,
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TocConfig {
    pub rows_per_page: usize,
    pub section_grayscale: u8,
    pub first_item_grayscale: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 40,
            section_grayscale: 15,
            first_item_grayscale: 5,
        }
    }
}

/// Year calendars; sizes in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CalendarConfig {
    pub day_row_height: f64,
    pub month_name_gap: f64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            day_row_height: 18.0,
            month_name_gap: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WeekPlannerConfig {
    pub rows_per_page: usize,
    pub first_week_grayscale: u8,
}

impl Default for WeekPlannerConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 14,
            first_week_grayscale: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GoalsConfig {
    pub columns: usize,
    pub rows: usize,
    pub headers: Vec<String>,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 12,
            headers: vec!["Goal".to_string(), "Notes".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BacklogConfig {
    pub page_count: usize,
    pub row_count: usize,
}

impl Default for BacklogConfig {
    fn default() -> Self {
        Self {
            page_count: 4,
            row_count: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DailySpreadConfig {
    pub rows: usize,
    pub subject_width_percent: u8,
    /// Gap between the two day tables of a side, in cm
    pub table_gap: f64,
}

impl Default for DailySpreadConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            subject_width_percent: 25,
            table_gap: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TermsConfig {
    pub page_count: usize,
    pub row_count: usize,
    pub term_width_percent: u8,
}

impl Default for TermsConfig {
    fn default() -> Self {
        Self {
            page_count: 4,
            row_count: 16,
            term_width_percent: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GraphPaperConfig {
    pub page_count: usize,
    pub columns: u32,
    pub rows: u32,
    pub grid_color_percent: u8,
    pub border_color_percent: u8,
}

impl Default for GraphPaperConfig {
    fn default() -> Self {
        Self {
            page_count: 8,
            columns: 37,
            rows: 56,
            grid_color_percent: 15,
            border_color_percent: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AssetsConfig {
    /// Directory holding the instructions image and the graph paper cache
    pub image_dir: std::path::PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image_dir: "assets/images".into(),
        }
    }
}

// =============================================================================
// Loading and Validation
// =============================================================================

#[cfg(feature = "serde")]
fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl PlannerConfig {
    /// Load a configuration file. `.json` files are read as JSON, anything
    /// else as YAML.
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LayoutError::ConfigNotFound(path.to_owned()),
            _ => LayoutError::Io(e),
        })?;
        let config = if is_json(path) {
            serde_json::from_slice(&bytes)
                .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            serde_yaml::from_slice(&bytes)
                .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?
        };
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save the configuration in the format implied by the file extension
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = if is_json(path) {
            serde_json::to_string_pretty(self)
                .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?
        } else {
            serde_yaml::to_string(self)
                .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?
        };
        tokio::fs::write(path, text).await?;
        Ok(())
    }

    /// Reject configurations that cannot describe a planner.
    ///
    /// Geometry that merely leaves rows too small is not rejected here; the
    /// row-height validator reports it while rendering.
    pub fn validate(&self) -> Result<()> {
        if !(1..=9998).contains(&self.document.year) {
            return Err(LayoutError::Config(format!(
                "Year {} is outside 1..=9998",
                self.document.year
            )));
        }

        let page = &self.page;
        if page.width <= 0.0 || page.height <= 0.0 {
            return Err(LayoutError::Config(
                "Page width and height must be positive".to_string(),
            ));
        }
        let margins = [
            ("margin_top", page.margin_top),
            ("margin_bottom", page.margin_bottom),
            ("margin_left", page.margin_left),
            ("margin_right", page.margin_right),
            ("gutter_size", page.gutter_size),
            ("page_number_position", page.page_number_position),
        ];
        for (name, value) in margins {
            if value < 0.0 {
                return Err(LayoutError::Config(format!("page.{} must not be negative", name)));
            }
        }
        if page.width - page.margin_left - page.margin_right - page.gutter_size <= 0.0 {
            return Err(LayoutError::Config(
                "Margins and gutter leave no content width".to_string(),
            ));
        }
        if page.height - page.margin_top - page.margin_bottom <= 0.0 {
            return Err(LayoutError::Config(
                "Margins leave no content height".to_string(),
            ));
        }

        let counts = [
            ("toc.rows_per_page", self.toc.rows_per_page),
            ("week_planner.rows_per_page", self.week_planner.rows_per_page),
            ("goals.columns", self.goals.columns),
            ("goals.rows", self.goals.rows),
            ("backlog.page_count", self.backlog.page_count),
            ("backlog.row_count", self.backlog.row_count),
            ("daily_spread.rows", self.daily_spread.rows),
            ("terms_definitions.page_count", self.terms_definitions.page_count),
            ("terms_definitions.row_count", self.terms_definitions.row_count),
            ("graph_paper.page_count", self.graph_paper.page_count),
            ("graph_paper.columns", self.graph_paper.columns as usize),
            ("graph_paper.rows", self.graph_paper.rows as usize),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(LayoutError::Config(format!("{} must be at least 1", name)));
            }
        }

        let table = &self.table;
        let percents = [
            ("table.border.grayscale", table.border.grayscale),
            ("table.title_row.background_grayscale", table.title_row.background_grayscale),
            ("table.title_row.font_grayscale", table.title_row.font_grayscale),
            ("table.header_row.background_grayscale", table.header_row.background_grayscale),
            ("table.header_row.font_grayscale", table.header_row.font_grayscale),
            ("table.content_row.font_grayscale", table.content_row.font_grayscale),
            ("cover.contact_table.label_grayscale", self.cover.contact_table.label_grayscale),
            ("toc.section_grayscale", self.toc.section_grayscale),
            ("toc.first_item_grayscale", self.toc.first_item_grayscale),
            ("week_planner.first_week_grayscale", self.week_planner.first_week_grayscale),
            ("daily_spread.subject_width_percent", self.daily_spread.subject_width_percent),
            ("terms_definitions.term_width_percent", self.terms_definitions.term_width_percent),
            ("graph_paper.grid_color_percent", self.graph_paper.grid_color_percent),
            ("graph_paper.border_color_percent", self.graph_paper.border_color_percent),
        ];
        for (name, value) in percents {
            if value > 100 {
                return Err(LayoutError::Config(format!(
                    "{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }

        if self.goals.headers.len() != self.goals.columns {
            return Err(LayoutError::Config(format!(
                "goals.headers has {} entries but goals.columns is {}",
                self.goals.headers.len(),
                self.goals.columns
            )));
        }

        if self.daily_spread.table_gap < 0.0 {
            return Err(LayoutError::Config(
                "daily_spread.table_gap must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
mod de {
    use super::DebugConfig;
    use serde::{Deserialize, Deserializer};

    pub(super) fn label_grayscale() -> u8 {
        5
    }

    /// Accept `version: 1.0` as well as `version: "1.0"`.
    ///
    /// A bare number has already lost its trailing zeros when it reaches us
    /// (`1.10` reads as `1.1`), so quote versions that need them.
    pub(super) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Version {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Version::deserialize(deserializer)? {
            Version::Text(s) => s,
            Version::Int(i) => i.to_string(),
            Version::Float(f) => {
                let version = format!("{:?}", f);
                log::warn!(
                    "Numeric version read as {}; quote it to keep trailing zeros",
                    version
                );
                version
            }
        })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum DebugRepr {
        Flag(bool),
        Settings {
            #[serde(default)]
            enabled: bool,
            #[serde(default)]
            config_info_overlay: bool,
        },
    }

    impl From<DebugRepr> for DebugConfig {
        fn from(repr: DebugRepr) -> Self {
            match repr {
                DebugRepr::Flag(enabled) => DebugConfig {
                    enabled,
                    config_info_overlay: false,
                },
                DebugRepr::Settings {
                    enabled,
                    config_info_overlay,
                } => DebugConfig {
                    enabled,
                    config_info_overlay,
                },
            }
        }
    }
}
