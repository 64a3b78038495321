//! pptx2html CLI - PowerPoint to HTML conversion tool
//!
//! Converts a PPTX presentation into a single HTML page with an `images/`
//! directory next to it.

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use pptx2html::render::{to_json, JsonFormat, DEFAULT_CANVAS_HEIGHT_EMU, DEFAULT_CANVAS_WIDTH_EMU};
use pptx2html::{Canvas, ConversionReport, ConvertOptions, ProgressEvent};
use std::fs;
use std::path::PathBuf;

/// Convert PowerPoint (PPTX) to HTML
#[derive(Parser)]
#[command(
    name = "pptx2html",
    author = "iyulab",
    version,
    about = "Convert PowerPoint (PPTX) to HTML",
    long_about = "pptx2html - Convert PowerPoint presentations to HTML.\n\n\
                  Shapes are positioned relative to the slide canvas and embedded\n\
                  images are written as PNG files into an images/ directory\n\
                  next to the output file."
)]
struct Cli {
    /// Input PPTX file
    input: PathBuf,

    /// Output HTML file
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Ignore image export (for development)
    #[arg(short, long)]
    ignore_images: bool,

    /// Canvas width in EMUs
    #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH_EMU)]
    canvas_width: i64,

    /// Canvas height in EMUs
    #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT_EMU)]
    canvas_height: i64,

    /// Number of rendering workers (default: available cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Page title (default: document title, then file name)
    #[arg(long)]
    title: Option<String>,

    /// Also write the extracted slide records as JSON to this path
    #[arg(long, value_name = "PATH")]
    dump_ir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ConvertOptions::new()
        .with_canvas(Canvas::new(cli.canvas_width, cli.canvas_height)?)
        .with_materialize_images(!cli.ignore_images);
    if let Some(jobs) = cli.jobs {
        options = options.with_workers(jobs);
    }
    if let Some(title) = cli.title {
        options = options.with_title(title);
    }

    if let Some(path) = &cli.dump_ir {
        let extraction = pptx2html::extract_file(&cli.input)?;
        fs::write(path, to_json(&extraction.slides, JsonFormat::Pretty)?)?;
        println!(
            "{} Wrote slide records: {}",
            "✓".green().bold(),
            path.display()
        );
    }

    let pb = create_spinner("Extracting slide data...");
    let report =
        pptx2html::convert_file_with_progress(&cli.input, &cli.output, &options, |event| {
            match event {
                ProgressEvent::Extracted { slides } => {
                    pb.set_style(bar_style());
                    pb.set_length(slides as u64);
                    pb.set_position(0);
                    pb.set_message("Processing slides");
                }
                ProgressEvent::SlideRendered { .. } => pb.inc(1),
            }
        });
    pb.finish_and_clear();

    print_summary(&report?, &cli.output);
    Ok(())
}

fn print_summary(report: &ConversionReport, output: &std::path::Path) {
    println!(
        "{} Converted {}/{} slides: {}",
        "✓".green().bold(),
        report.slides_rendered,
        report.slides_total,
        output.display()
    );
    println!(
        "  {}: {}  {}: {}",
        "Shapes".bold(),
        report.shapes_rendered,
        "Images".bold(),
        report.images_written
    );

    if report.extraction_warnings > 0 {
        println!(
            "{} {} formatting or media problems recovered during extraction",
            "!".yellow().bold(),
            report.extraction_warnings
        );
    }
    if !report.shape_failures.is_empty() {
        println!(
            "{} {} shape failures",
            "!".yellow().bold(),
            report.shape_failures.len()
        );
        for failure in &report.shape_failures {
            println!("  - {}", failure);
        }
    }
    for index in &report.failed_slides {
        println!("{} Slide {} failed and was left empty", "✗".red().bold(), index + 1);
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
