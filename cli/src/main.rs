//! docdiff CLI - multi-modal document comparison tool
//!
//! Compares two pre-extracted artifact directories (extraction.json +
//! rendered page PNGs) and writes JSON/HTML reports with visual assets.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docdiff::{
    compare_extractions, ArtifactProvider, CompareOptions, ComparisonReport, JsonFormat,
    ReportOptions,
};

#[derive(Parser)]
#[command(name = "docdiff")]
#[command(version)]
#[command(about = "Compare two document extractions and report the differences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two artifact directories and write a report
    Compare {
        /// Source artifact directory (extraction.json + pages/)
        #[arg(value_name = "SOURCE_DIR")]
        source: PathBuf,

        /// Target artifact directory
        #[arg(value_name = "TARGET_DIR")]
        target: PathBuf,

        /// Output directory for the report
        #[arg(short, long, value_name = "DIR", default_value = "./report")]
        output: PathBuf,

        /// Pixel intensity threshold (0-255) for the change mask
        #[arg(long, default_value = "30")]
        threshold: u8,

        /// Compare tables by position instead of as a row multiset
        #[arg(long)]
        aligned_tables: bool,

        /// Disable parallel page comparison
        #[arg(long)]
        sequential: bool,

        /// Skip visual comparison and assets entirely
        #[arg(long)]
        no_images: bool,

        /// Report format
        #[arg(long, value_enum, default_value = "both")]
        format: ReportFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show a summary of one artifact directory
    Info {
        /// Artifact directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Json,
    Html,
    Both,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            source,
            target,
            output,
            threshold,
            aligned_tables,
            sequential,
            no_images,
            format,
            compact,
        } => run_compare(
            source,
            target,
            output,
            threshold,
            aligned_tables,
            sequential,
            no_images,
            format,
            compact,
        ),
        Commands::Info { dir, json } => run_info(dir, json),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            process::exit(2);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_compare(
    source: PathBuf,
    target: PathBuf,
    output: PathBuf,
    threshold: u8,
    aligned_tables: bool,
    sequential: bool,
    no_images: bool,
    format: ReportFormat,
    compact: bool,
) -> docdiff::Result<i32> {
    let spinner = spinner("Loading extractions...");
    let provider = ArtifactProvider::new();
    let mut src = provider.load_dir(&source)?;
    let mut trg = provider.load_dir(&target)?;
    if no_images {
        src.page_images.clear();
        trg.page_images.clear();
    }
    spinner.finish_and_clear();
    log::info!(
        "loaded {} ({} pages) and {} ({} pages)",
        source.display(),
        src.page_count(),
        target.display(),
        trg.page_count()
    );

    let mut options = CompareOptions::new().with_pixel_threshold(threshold);
    if aligned_tables {
        options = options.aligned_tables();
    }
    if sequential {
        options = options.sequential();
    }

    let spinner = self::spinner("Comparing...");
    let report = compare_extractions(&src, &trg, &options);
    spinner.finish_and_clear();

    print_summary(&report);

    let json_format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let report_options = ReportOptions::new()
        .with_json(matches!(format, ReportFormat::Json | ReportFormat::Both))
        .with_html(matches!(format, ReportFormat::Html | ReportFormat::Both))
        .with_json_format(json_format)
        .with_assets(!no_images);

    let paths = docdiff::write_report(&report, &output, &report_options, None)?;
    if let Some(path) = &paths.json {
        println!("  {} {}", "json:".cyan(), path.display());
    }
    if let Some(path) = &paths.html {
        println!("  {} {}", "html:".cyan(), path.display());
    }
    if let Some(dir) = &paths.assets_dir {
        println!("  {} {}", "assets:".cyan(), dir.display());
    }

    // Like diff(1): exit 1 when differences were found
    Ok(if report.has_differences() { 1 } else { 0 })
}

fn run_info(dir: PathBuf, json: bool) -> docdiff::Result<i32> {
    let provider = ArtifactProvider::new();
    let extraction = provider.load_dir(&dir)?;

    if json {
        let summary = serde_json::json!({
            "pages": extraction.page_count(),
            "lines": extraction.line_count(),
            "tables": extraction.tables.len(),
            "rows": extraction.row_count(),
            "images": extraction.page_images.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(0);
    }

    println!("{}", "Extraction summary".bold());
    println!("  pages:  {}", extraction.page_count());
    println!("  lines:  {}", extraction.line_count());
    println!("  tables: {}", extraction.tables.len());
    println!("  rows:   {}", extraction.row_count());
    println!("  images: {}", extraction.page_images.len());
    if extraction.is_empty() {
        println!("{}", "warning: extraction is empty".yellow());
    }
    Ok(0)
}

fn print_summary(report: &ComparisonReport) {
    let s = &report.summary;
    println!("{}", "Comparison summary".bold());
    println!("  pages:       {} vs {}", s.pages_source, s.pages_target);
    println!("  text diffs:  {}", colorize_count(s.text_diffs));
    println!("  table diffs: {}", colorize_count(s.table_diffs));
    println!("  image diffs: {}", colorize_count(s.image_diffs));

    if report.has_differences() {
        println!("{}", "Documents differ.".red().bold());
    } else {
        println!("{}", "Documents match.".green().bold());
    }
}

fn colorize_count(count: usize) -> String {
    if count == 0 {
        count.to_string().green().to_string()
    } else {
        count.to_string().red().to_string()
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
