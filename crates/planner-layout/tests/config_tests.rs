use planner_layout::*;

#[test]
fn test_default_config_is_valid() {
    let config = PlannerConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_year_out_of_range() {
    let mut config = PlannerConfig::default();
    config.document.year = 0;
    match config.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("Year 0")),
        _ => panic!("Expected Config error"),
    }

    config.document.year = 9999;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_margins_consume_page() {
    let mut config = PlannerConfig::default();
    config.page.margin_left = 10.0;
    config.page.margin_right = 10.0;
    match config.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("content width")),
        _ => panic!("Expected Config error"),
    }

    let mut config = PlannerConfig::default();
    config.page.margin_top = -0.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_zero_counts() {
    let mut config = PlannerConfig::default();
    config.backlog.row_count = 0;
    match config.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("backlog.row_count")),
        _ => panic!("Expected Config error"),
    }

    let mut config = PlannerConfig::default();
    config.toc.rows_per_page = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_percentages() {
    let mut config = PlannerConfig::default();
    config.table.header_row.background_grayscale = 101;
    assert!(config.validate().is_err());

    let mut config = PlannerConfig::default();
    config.daily_spread.subject_width_percent = 100;
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_goal_headers_match_columns() {
    let mut config = PlannerConfig::default();
    config.goals.columns = 3;
    match config.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("goals.headers")),
        _ => panic!("Expected Config error"),
    }

    config.goals.headers.push("Due".to_string());
    assert!(config.validate().is_ok());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yaml");

    match PlannerConfig::load(&path).await {
        Err(LayoutError::ConfigNotFound(p)) => assert_eq!(p, path),
        other => panic!("Expected ConfigNotFound, got {:?}", other),
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_minimal_yaml_fills_defaults() {
    let yaml = r#"
document:
  title: "My Planner"
  version: 2.1
  year: 2025
page:
  width: 21.0
  height: 29.7
  margin_top: 1.0
  margin_bottom: 1.5
  margin_left: 1.0
  margin_right: 1.0
  gutter_size: 1.0
  page_number_position: 0.8
table:
  border: { thickness: 0.5, grayscale: 100 }
  title_row: { height: 18, background_grayscale: 25, font_size: 12, font_grayscale: 100 }
  header_row: { height: 14, background_grayscale: 10, font_size: 10, font_grayscale: 100 }
  content_row: { font_size: 9, font_grayscale: 60, font_italic: true }
cover:
  contact_fields: [Name, Phone]
  contact_table: { row_height: 1.2, label_width: 3.0, value_width: 10.0 }
debug: true
"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, yaml).unwrap();

    let config = PlannerConfig::load(&path).await.unwrap();
    assert_eq!(config.document.title, "My Planner");
    assert_eq!(config.document.version, "2.1");
    assert_eq!(config.document.year, 2025);
    assert_eq!(config.cover.contact_fields, vec!["Name", "Phone"]);
    assert_eq!(config.cover.contact_table.label_grayscale, 5);
    assert_eq!(config.table.title_row_twips(), 360);

    // Boolean debug form turns on the guides only
    assert!(config.debug.enabled);
    assert!(!config.debug.config_info_overlay);

    // Omitted sections take their defaults
    assert_eq!(config.toc, TocConfig::default());
    assert_eq!(config.graph_paper, GraphPaperConfig::default());
    assert!(config.validate().is_ok());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_missing_required_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "document: { title: x, version: '1', year: 2026 }\n").unwrap();

    match PlannerConfig::load(&path).await {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_json() {
    let mut config = PlannerConfig::default();
    config.document.year = 2030;
    config.debug = DebugConfig {
        enabled: true,
        config_info_overlay: true,
    };
    config.daily_spread.rows = 10;

    let temp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    config.save(temp.path()).await.unwrap();

    let text = std::fs::read_to_string(temp.path()).unwrap();
    assert!(text.trim_start().starts_with('{'));

    let loaded = PlannerConfig::load(temp.path()).await.unwrap();
    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_yaml() {
    let config = PlannerConfig::default();
    let temp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();

    config.save(temp.path()).await.unwrap();
    let loaded = PlannerConfig::load(temp.path()).await.unwrap();

    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_shipped_config_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/config.yaml");
    let config = PlannerConfig::load(&path).await.unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config, PlannerConfig::default());
}

#[cfg(feature = "serde")]
#[test]
fn test_version_forms() {
    let quoted: DocumentConfig =
        serde_yaml::from_str("{ title: x, version: \"1.10\", year: 2026 }").unwrap();
    assert_eq!(quoted.version, "1.10");

    let integer: DocumentConfig = serde_yaml::from_str("{ title: x, version: 3, year: 2026 }").unwrap();
    assert_eq!(integer.version, "3");

    // A bare float keeps one decimal but not trailing zeros
    let float: DocumentConfig = serde_yaml::from_str("{ title: x, version: 1.0, year: 2026 }").unwrap();
    assert_eq!(float.version, "1.0");
    let float: DocumentConfig = serde_yaml::from_str("{ title: x, version: 1.10, year: 2026 }").unwrap();
    assert_eq!(float.version, "1.1");
}
