use planner_layout::{DocumentPlan, PlannerConfig};
use planner_render::grid_image::{ensure_grid_image, GridSpec};
use planner_render::*;
use std::io::Read;
use std::sync::Arc;

fn config_in(dir: &tempfile::TempDir) -> PlannerConfig {
    let mut config = PlannerConfig::default();
    config.assets.image_dir = dir.path().join("images");
    config
}

async fn build(config: &PlannerConfig) -> PlannerDocument {
    build_planner(config, |_| {}).await.unwrap()
}

fn section_sides(section: &DocumentSection) -> usize {
    1 + section
        .blocks
        .iter()
        .filter(|b| matches!(b, Block::PageBreak { .. }))
        .count()
}

fn zip_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    text
}

#[tokio::test]
async fn test_document_matches_plan() {
    let dir = tempfile::tempdir().unwrap();
    for year in [2025, 2026, 2028] {
        let mut config = config_in(&dir);
        config.document.year = year;
        let plan = DocumentPlan::new(&config).unwrap();
        let doc = build(&config).await;

        assert_eq!(doc.page_count(), plan.total_sides(), "{year}");
        assert_eq!(doc.page_count() % 2, 0);
        assert_eq!(doc.sections.len(), 4);
    }
}

#[tokio::test]
async fn test_toc_matches_numbered_pages() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let plan = DocumentPlan::new(&config).unwrap();
    let doc = build(&config).await;

    let numbered = &doc.sections[2];
    assert_eq!(numbered.numbering, PageNumbering::Numbered { start: 1 });
    let last = plan.toc_entries.last().unwrap();
    assert_eq!(section_sides(numbered), last.page_number);

    assert_eq!(doc.sections[3].numbering, PageNumbering::Suppressed);
    assert_eq!(section_sides(&doc.sections[3]), 2);
}

#[tokio::test]
async fn test_progress_reports_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    build_planner(&config, move |stage| sink.lock().unwrap().push(stage.to_string()))
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.first().map(String::as_str), Some("cover page"));
    assert_eq!(seen.last().map(String::as_str), Some("rear cover"));
    assert_eq!(seen.len(), 11);
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(&dir);
    config.document.year = 0;

    let result = build_planner(&config, |_| {}).await;
    assert!(matches!(result, Err(RenderError::Layout(_))));
    // Nothing was cached either
    assert!(!config.assets.image_dir.exists());
}

#[tokio::test]
async fn test_docx_package() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(&dir);
    config.debug.enabled = true;
    let doc = build(&config).await;
    let bytes = write_docx(&doc, "Year Planner Generator 1.0").unwrap();

    let archive = zip::ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for part in [
        "[Content_Types].xml",
        "word/document.xml",
        "word/styles.xml",
        "word/settings.xml",
        "word/footer1.xml",
        "word/header1.xml",
        "word/media/image1.png",
    ] {
        assert!(names.contains(&part), "missing {part}");
    }

    let document = zip_entry(&bytes, "word/document.xml");
    assert!(document.contains("Table of Contents"));
    assert!(document.contains("Week Planner"));
    assert!(document.contains(r#"<w:pgNumType w:start="1"/>"#));
    assert!(document.contains(r#"<w:tblLayout w:type="fixed"/>"#));

    let settings = zip_entry(&bytes, "word/settings.xml");
    assert!(settings.contains("w:mirrorMargins"));
    assert!(settings.contains("w:evenAndOddHeaders"));
}

#[tokio::test]
async fn test_docx_without_decorations_has_no_headers() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let doc = build(&config).await;
    let bytes = write_docx(&doc, "test").unwrap();

    let archive = zip::ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();
    assert!(!archive.file_names().any(|n| n.starts_with("word/header")));
}

#[tokio::test]
async fn test_native_pdf_page_count() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let plan = DocumentPlan::new(&config).unwrap();
    let doc = Arc::new(build(&config).await);

    let docx_path = dir.path().join("out/planner.docx");
    let pdf_path = docx_path.with_extension("pdf");
    save_docx(Arc::clone(&doc), "test", &docx_path).await.unwrap();
    convert_to_pdf(PdfEngine::Native, doc, &docx_path, &pdf_path)
        .await
        .unwrap();

    let pdf = lopdf::Document::load(&pdf_path).unwrap();
    assert_eq!(pdf.get_pages().len(), plan.total_sides());
}

#[tokio::test]
async fn test_no_side_runs_past_bottom_margin() {
    let dir = tempfile::tempdir().unwrap();
    for year in [2025, 2026, 2028] {
        let mut config = config_in(&dir);
        config.document.year = year;
        let plan = DocumentPlan::new(&config).unwrap();
        let doc = build(&config).await;

        let rendered = render_pdf_with_extents(&doc).unwrap();
        assert_eq!(rendered.sides.len(), plan.total_sides(), "{year}");
        assert_eq!(rendered.overflowing_sides(), Vec::<usize>::new(), "{year}");
        // Solved tables fill their sides
        assert!(rendered.sides.iter().any(|s| s.used_pt > s.available_pt * 0.9));
    }

    // US Letter
    let mut config = config_in(&dir);
    config.page.width = 21.59;
    config.page.height = 27.94;
    let doc = build(&config).await;
    let rendered = render_pdf_with_extents(&doc).unwrap();
    assert_eq!(rendered.overflowing_sides(), Vec::<usize>::new());
}

#[tokio::test]
async fn test_grid_cache_is_reused() {
    let dir = tempfile::tempdir().unwrap();
    let spec = GridSpec {
        columns: 5,
        rows: 5,
        grid_percent: 15,
        border_percent: 100,
        width_px: 60,
        height_px: 80,
    };

    let path = ensure_grid_image(dir.path(), spec).await.unwrap();
    let first = std::fs::metadata(&path).unwrap().modified().unwrap();
    let bytes = std::fs::read(&path).unwrap();

    let again = ensure_grid_image(dir.path(), spec).await.unwrap();
    assert_eq!(again, path);
    assert_eq!(std::fs::metadata(&again).unwrap().modified().unwrap(), first);

    std::fs::remove_file(&path).unwrap();
    ensure_grid_image(dir.path(), spec).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}
