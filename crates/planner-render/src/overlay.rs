//! Page decorations: the config info box and the layout guides

use crate::model::*;
use planner_layout::constants::PT_PER_CM;
use planner_layout::{PageGeometry, PageSide, PlannerConfig};

/// Top and bottom text inset of an overlay box (45720 EMU)
pub const OVERLAY_INSET_CM: f64 = 0.127;

/// Left and right text inset of an overlay box (91440 EMU)
pub const OVERLAY_SIDE_INSET_CM: f64 = 0.254;

const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// `key: value` lines describing the configuration; blank strings separate groups
pub fn config_info_lines(config: &PlannerConfig) -> Vec<String> {
    let doc = &config.document;
    let page = &config.page;
    let table = &config.table;
    let overlay = &config.config_info_overlay;
    let toc = &config.toc;
    let cal = &config.calendar;
    let wp = &config.week_planner;
    let goals = &config.goals;
    let backlog = &config.backlog;
    let ds = &config.daily_spread;
    let gp = &config.graph_paper;

    vec![
        format!("document.title: {}", doc.title),
        format!("document.version: {}", doc.version),
        format!("document.year: {}", doc.year),
        String::new(),
        format!("page.width: {:?} cm", page.width),
        format!("page.height: {:?} cm", page.height),
        format!("page.margin_top: {:?} cm", page.margin_top),
        format!("page.margin_bottom: {:?} cm", page.margin_bottom),
        format!("page.margin_left: {:?} cm", page.margin_left),
        format!("page.margin_right: {:?} cm", page.margin_right),
        format!("page.gutter_size: {:?} cm", page.gutter_size),
        format!("page.page_number_position: {:?} cm", page.page_number_position),
        String::new(),
        format!("table.border.thickness: {:?} pt", table.border.thickness),
        format!("table.border.grayscale: {}", table.border.grayscale),
        String::new(),
        format!("table.title_row.height: {:?} pt", table.title_row.height),
        format!("table.title_row.background_grayscale: {}", table.title_row.background_grayscale),
        format!("table.title_row.font_size: {:?} pt", table.title_row.font_size),
        format!("table.title_row.font_grayscale: {}", table.title_row.font_grayscale),
        String::new(),
        format!("table.header_row.height: {:?} pt", table.header_row.height),
        format!("table.header_row.background_grayscale: {}", table.header_row.background_grayscale),
        format!("table.header_row.font_size: {:?} pt", table.header_row.font_size),
        format!("table.header_row.font_grayscale: {}", table.header_row.font_grayscale),
        String::new(),
        format!("table.content_row.font_size: {:?} pt", table.content_row.font_size),
        format!("table.content_row.font_grayscale: {}", table.content_row.font_grayscale),
        format!("table.content_row.font_italic: {}", table.content_row.font_italic),
        String::new(),
        format!("config_info_overlay.bottom: {:?} cm", overlay.bottom),
        format!("config_info_overlay.right: {:?} cm", overlay.right),
        format!("config_info_overlay.left: {:?} cm", overlay.left),
        format!("config_info_overlay.width: {:?} cm", overlay.width),
        format!("config_info_overlay.title_font_size: {:?} pt", overlay.title_font_size),
        format!("config_info_overlay.data_font_size: {:?} pt", overlay.data_font_size),
        String::new(),
        format!("cover.contact_table.label_grayscale: {}", config.cover.contact_table.label_grayscale),
        String::new(),
        format!("toc.rows_per_page: {}", toc.rows_per_page),
        format!("toc.section_grayscale: {}", toc.section_grayscale),
        format!("toc.first_item_grayscale: {}", toc.first_item_grayscale),
        String::new(),
        format!("calendar.day_row_height: {:?} pt", cal.day_row_height),
        format!("calendar.month_name_gap: {:?} pt", cal.month_name_gap),
        String::new(),
        format!("week_planner.rows_per_page: {}", wp.rows_per_page),
        format!("week_planner.first_week_grayscale: {}", wp.first_week_grayscale),
        String::new(),
        format!("goals.columns: {}", goals.columns),
        format!("goals.rows: {}", goals.rows),
        String::new(),
        format!("backlog.page_count: {}", backlog.page_count),
        format!("backlog.row_count: {}", backlog.row_count),
        String::new(),
        format!("daily_spread.rows: {}", ds.rows),
        format!("daily_spread.subject_width_percent: {}%", ds.subject_width_percent),
        format!("daily_spread.table_gap: {:?} cm", ds.table_gap),
        String::new(),
        format!("graph_paper.page_count: {}", gp.page_count),
        format!("graph_paper.columns: {}", gp.columns),
        format!("graph_paper.rows: {}", gp.rows),
        format!("graph_paper.grid_color_percent: {}", gp.grid_color_percent),
        format!("graph_paper.border_color_percent: {}", gp.border_color_percent),
    ]
}

/// Split a `key: value` line into a bold key and a plain value
fn data_line(text: &str, size: f64) -> Vec<TextRun> {
    let run = |t: String| TextRun::new(t).font(Font::Sans).size(size);
    match text.split_once(':') {
        Some((key, value)) => vec![
            run(format!("{}:", key)).bold(),
            run(format!("  {}", value.trim_start())),
        ],
        None => vec![run(text.to_string())],
    }
}

/// Framed config info box for pages on `side`
pub fn config_info_overlay(config: &PlannerConfig, side: PageSide) -> Overlay {
    let settings = &config.config_info_overlay;
    let title_size = settings.title_font_size;
    let data_size = settings.data_font_size;
    let title_line = title_size * LINE_HEIGHT_FACTOR;
    let data_line_height = data_size * LINE_HEIGHT_FACTOR;

    let mut lines = vec![OverlayLine {
        runs: vec![
            TextRun::new(settings.title.clone())
                .font(Font::Sans)
                .size(title_size)
                .bold(),
        ],
        line_height_pt: title_line,
        align: Align::Left,
    }];
    let data = std::iter::once(String::new()).chain(config_info_lines(config));
    for text in data {
        lines.push(OverlayLine {
            runs: data_line(&text, data_size),
            line_height_pt: data_line_height,
            align: Align::Left,
        });
    }

    let text_height_pt = title_line + data_line_height * (lines.len() - 1) as f64;
    let height_cm = text_height_pt / PT_PER_CM + 2.0 * OVERLAY_INSET_CM;
    let width_cm = settings.width;
    let x_cm = match side {
        PageSide::Recto => config.page.width - settings.right - width_cm,
        PageSide::Verso => settings.left,
    };

    Overlay {
        name: "ConfigInfo".to_string(),
        x_cm,
        y_cm: config.page.height - settings.bottom - height_cm,
        width_cm,
        height_cm,
        lines,
        framed: true,
    }
}

/// Transparent centered title over a full-page image
pub fn title_overlay(geometry: &PageGeometry, side: PageSide, title: &str) -> Overlay {
    const WIDTH_CM: f64 = 10.0;
    const HEIGHT_CM: f64 = 1.2;
    const SIZE_PT: f64 = 18.0;

    let left = geometry.content_left(side);
    Overlay {
        name: format!("{}Title", title.replace(' ', "")),
        x_cm: left + (geometry.content_width(true) - WIDTH_CM) / 2.0,
        y_cm: geometry.margin_top,
        width_cm: WIDTH_CM,
        height_cm: HEIGHT_CM,
        lines: vec![OverlayLine {
            runs: vec![TextRun::new(title).size(SIZE_PT).bold()],
            line_height_pt: SIZE_PT * LINE_HEIGHT_FACTOR,
            align: Align::Center,
        }],
        framed: false,
    }
}

/// Content area, gutter and margin guides, mirrored for versos
pub fn guides(geometry: &PageGeometry, side: PageSide) -> Guides {
    Guides {
        content: RectCm {
            x: geometry.content_left(side),
            y: geometry.margin_top,
            width: geometry.content_width(true),
            height: geometry.content_height(),
        },
        gutter_x: geometry.gutter_line(side),
        top_y: geometry.margin_top,
        footer_y: geometry.page_height - geometry.footer_distance,
        page_width: geometry.page_width,
        page_height: geometry.page_height,
    }
}

/// Decorations requested by the `debug` switches
pub fn decorations(config: &PlannerConfig, geometry: &PageGeometry) -> Decorations {
    let side = |side: PageSide| SideDecorations {
        overlay: config
            .debug
            .config_info_overlay
            .then(|| config_info_overlay(config, side)),
        guides: config.debug.enabled.then(|| guides(geometry, side)),
    };
    Decorations {
        recto: side(PageSide::Recto),
        verso: side(PageSide::Verso),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_placement() {
        let config = PlannerConfig::default();
        let recto = config_info_overlay(&config, PageSide::Recto);
        let verso = config_info_overlay(&config, PageSide::Verso);

        assert!((recto.x_cm - (21.0 - 1.5 - 6.0)).abs() < 1e-9);
        assert!((verso.x_cm - 1.5).abs() < 1e-9);
        assert!((recto.y_cm + recto.height_cm - (29.7 - 1.5)).abs() < 1e-9);
        assert!(recto.framed);
        // Title, blank line, then every config line
        assert_eq!(recto.lines.len(), 2 + config_info_lines(&config).len());
    }

    #[test]
    fn test_key_is_bold() {
        let runs = data_line("page.width: 21.0 cm", 5.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "page.width:");
        assert!(runs[0].bold);
        assert_eq!(runs[1].text, "  21.0 cm");
        assert!(!runs[1].bold);
    }

    #[test]
    fn test_decorations_follow_debug_switches() {
        let mut config = PlannerConfig::default();
        let geometry = PageGeometry::from_config(&config.page);
        assert!(decorations(&config, &geometry).is_empty());

        config.debug.enabled = true;
        let d = decorations(&config, &geometry);
        assert!(d.recto.overlay.is_none());
        let recto = d.recto.guides.unwrap();
        let verso = d.verso.guides.unwrap();
        assert!((recto.gutter_x - 1.0).abs() < 1e-9);
        assert!((verso.gutter_x - 20.0).abs() < 1e-9);
        assert!((recto.content.x - 2.0).abs() < 1e-9);
        assert!((verso.content.x - 1.0).abs() < 1e-9);
    }
}
