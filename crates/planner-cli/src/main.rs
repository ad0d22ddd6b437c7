use anyhow::Result;
use clap::{Parser, ValueEnum};
use planner_layout::{calculate_statistics, DocumentPlan, GeneratorConfig, PlannerConfig};
use planner_render::PdfEngine;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "year-planner", about = "Generate a printable year planner", version)]
struct Cli {
    /// YAML or JSON configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    config: PathBuf,

    /// Output path for the generated document
    #[arg(short, long, default_value = "output/year_planner.docx")]
    output: PathBuf,

    /// How the PDF is produced
    #[arg(long, default_value = "native", value_enum)]
    pdf_engine: EngineArg,

    /// Write only the .docx
    #[arg(long)]
    no_pdf: bool,

    /// Show page statistics only, don't generate anything
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EngineArg {
    Native,
    LibreOffice,
}

impl From<EngineArg> for PdfEngine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Native => Self::Native,
            EngineArg::LibreOffice => Self::LibreOffice,
        }
    }
}

const BOX_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 8;

fn print_header(generator: &GeneratorConfig) {
    let label_width = LABEL_WIDTH;
    let value_width = BOX_WIDTH - LABEL_WIDTH - 2;
    println!("┌{}┐", "─".repeat(BOX_WIDTH));
    for (label, value) in [
        ("Program:", &generator.program),
        ("Version:", &generator.version),
        ("Release:", &generator.release),
        ("Author:", &generator.author),
    ] {
        println!("│ {:<label_width$} {:<value_width$}│", label, value);
    }
    println!("└{}┘", "─".repeat(BOX_WIDTH));
    println!();
}

fn print_statistics(config: &PlannerConfig) -> Result<()> {
    config.validate()?;
    let plan = DocumentPlan::new(config)?;
    let stats = calculate_statistics(&plan)?;

    println!("Planner Statistics:");
    println!("  Year: {} ({} ISO weeks)", stats.year, stats.iso_weeks);
    for section in plan.sections() {
        println!(
            "  {}: {} pages{}",
            section.kind.name(),
            section.total_sides(),
            if section.padding_sides > 0 { " (incl. blank verso)" } else { "" }
        );
    }
    println!("  Table of contents: {} pages, {} entries", stats.toc_pages, stats.toc_entries);
    println!("  Front matter pages: {}", stats.front_matter_pages);
    println!("  Numbered pages: {}", stats.numbered_pages);
    println!("  Back matter pages: {}", stats.back_matter_pages);
    println!("  Physical pages: {}", stats.total_pages);
    println!("  Blank pages added: {}", stats.blank_pages_added);
    println!("  Sheets: {}", stats.sheets);
    Ok(())
}

async fn generate(config: &PlannerConfig, output: &Path, engine: Option<PdfEngine>) -> Result<()> {
    println!("Creating Year Planner for {}...", config.document.year);

    let doc = planner_render::build_planner(config, |stage| {
        println!("  Generating {}...", stage);
    })
    .await?;
    println!();

    if let Some(backup) = planner_render::io::backup_existing(output).await? {
        println!("  Backed up existing file to: {}", backup.display());
    }

    let doc = Arc::new(doc);
    let generator = &config.document_generator;
    let generator = format!("{} {}", generator.program, generator.version);
    planner_render::save_docx(Arc::clone(&doc), &generator, output).await?;
    println!("Year Planner saved to: {}", output.display());

    if let Some(engine) = engine {
        let pdf_path = output.with_extension("pdf");
        println!("Converting to PDF...");
        planner_render::convert_to_pdf(engine, doc, output, &pdf_path).await?;
        println!("PDF saved to: {}", pdf_path.display());
        println!();
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = PlannerConfig::load(&cli.config).await?;

    print_header(&config.document_generator);
    println!("Loading configuration from: {}", cli.config.display());
    println!("  ├─ Title:   {}", config.document.title);
    println!("  ├─ Year:    {}", config.document.year);
    println!("  └─ Version: {}", config.document.version);
    println!();

    if cli.stats_only {
        return print_statistics(&config);
    }

    let engine = (!cli.no_pdf).then(|| cli.pdf_engine.into());
    generate(&config, &cli.output, engine).await?;

    println!("Done!");
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
