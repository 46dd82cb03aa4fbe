//! pdfoutline CLI - PDF title and outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{self, BatchOptions};
use pdfoutline::render::{to_json, to_markdown};
use pdfoutline::{
    JsonFormat, LayoutJsonSource, OutlineConfig, PageSelection, ParseOptions, PdfOutline,
    SourceRegistry,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract a title and H1-H3 outline from PDF files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write <base>.json for every PDF in a directory
    Batch {
        /// Directory holding the PDFs
        #[arg(value_name = "INPUT_DIR", default_value = "input")]
        input: PathBuf,

        /// Directory receiving the JSON files
        #[arg(value_name = "OUTPUT_DIR", default_value = "output")]
        output: PathBuf,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,

        /// Also read layout dumps (.json) from the input directory
        #[arg(long)]
        layout_dumps: bool,

        #[command(flatten)]
        parse: ParseArgs,

        #[command(flatten)]
        heuristics: HeuristicArgs,
    },

    /// Extract the outline of a single file
    Extract {
        /// Input PDF (or layout dump)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Render a Markdown table of contents instead of JSON
        #[arg(long, conflicts_with = "compact")]
        markdown: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        parse: ParseArgs,

        #[command(flatten)]
        heuristics: HeuristicArgs,
    },

    /// Dump the rendered span layout of a PDF as JSON
    Layout {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct ParseArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Fail on the first unreadable page instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl ParseArgs {
    fn to_options(&self) -> pdfoutline::Result<ParseOptions> {
        let mut options = ParseOptions::new();
        if !self.strict {
            options = options.lenient();
        }
        if let Some(ref pages) = self.pages {
            options = options.with_pages(PageSelection::parse(pages)?);
        }
        Ok(options)
    }
}

/// Heuristic thresholds; each falls back to a PDFOUTLINE_* variable.
#[derive(Args, Clone)]
struct HeuristicArgs {
    /// Most lines a heading may span
    #[arg(long, env = "PDFOUTLINE_MAX_HEADING_LINES", default_value_t = 3)]
    max_heading_lines: usize,

    /// Most lines a non-bold numbered heading may span
    #[arg(long, env = "PDFOUTLINE_MAX_NUMBERED_LINES", default_value_t = 2)]
    max_numbered_lines: usize,

    /// Longest heading or title part, in characters
    #[arg(long, env = "PDFOUTLINE_MAX_TEXT_LEN", default_value_t = 300)]
    max_text_len: usize,

    /// Line length at or below which a line counts as short
    #[arg(long, env = "PDFOUTLINE_SHORT_LINE_LEN", default_value_t = 15)]
    short_line_len: usize,

    /// Font-size tolerance when assembling the title
    #[arg(long, env = "PDFOUTLINE_SIZE_TOLERANCE", default_value_t = 0.5)]
    size_tolerance: f32,

    /// Number of font-size tiers mapped to H1..H3
    #[arg(long, env = "PDFOUTLINE_TIER_COUNT", default_value_t = 3)]
    tier_count: usize,
}

impl From<HeuristicArgs> for OutlineConfig {
    fn from(args: HeuristicArgs) -> Self {
        OutlineConfig::new()
            .with_max_heading_lines(args.max_heading_lines)
            .with_max_numbered_lines(args.max_numbered_lines)
            .with_max_text_len(args.max_text_len)
            .with_short_line_len(args.short_line_len)
            .with_size_tolerance(args.size_tolerance)
            .with_tier_count(args.tier_count)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            compact,
            sequential,
            layout_dumps,
            parse,
            heuristics,
        }) => cmd_batch(
            &input,
            &output,
            BatchFlags {
                compact,
                sequential,
                layout_dumps,
            },
            &parse,
            heuristics.into(),
        ),
        Some(Commands::Extract {
            input,
            output,
            markdown,
            compact,
            parse,
            heuristics,
        }) => cmd_extract(
            &input,
            output.as_deref(),
            markdown,
            compact,
            &parse,
            heuristics.into(),
        ),
        Some(Commands::Layout {
            input,
            output,
            compact,
            parse,
        }) => cmd_layout(&input, output.as_deref(), compact, &parse),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        // Default behavior: batch over ./input into ./output
        None => cmd_batch(
            Path::new("input"),
            Path::new("output"),
            BatchFlags::default(),
            &ParseArgs::default(),
            OutlineConfig::default(),
        ),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[derive(Default)]
struct BatchFlags {
    compact: bool,
    sequential: bool,
    layout_dumps: bool,
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    flags: BatchFlags,
    parse: &ParseArgs,
    config: OutlineConfig,
) -> CliResult {
    let mut registry = SourceRegistry::with_defaults();
    if flags.layout_dumps {
        registry.register(std::sync::Arc::new(LayoutJsonSource::new()));
    }

    let inputs = batch::discover_inputs(input, &registry)?;
    if inputs.is_empty() {
        println!(
            "{} {}",
            "No input files found in".yellow(),
            input.display()
        );
        return Ok(());
    }

    let options = BatchOptions::new(input, output)
        .with_format(json_format(flags.compact))
        .with_parallel(!flags.sequential)
        .with_config(config)
        .with_parse_options(parse.to_options()?)
        .with_registry(registry);

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = batch::run_with_progress(&options, |outcome| {
        if let Some(name) = outcome.input.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(summary) => println!(
                "  {} {} {} ({} entries)",
                "✓".green(),
                outcome.input.display(),
                "→".dimmed(),
                summary.entries
            ),
            Err(message) => println!(
                "  {} {}: {}",
                "✗".red(),
                outcome.input.display(),
                message
            ),
        }
    }

    println!(
        "\n{} {} written, {} failed, output in {}",
        "Done!".green().bold(),
        report.succeeded(),
        report.failed(),
        output.display()
    );

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    markdown: bool,
    compact: bool,
    parse: &ParseArgs,
    config: OutlineConfig,
) -> CliResult {
    let result = PdfOutline::new()
        .with_parse_options(parse.to_options()?)
        .with_config(config)
        .with_layout_dumps()
        .extract(input)?;

    let content = if markdown {
        to_markdown(&result)
    } else {
        to_json(&result, json_format(compact))?
    };

    write_output(output, &content)
}

fn cmd_layout(input: &Path, output: Option<&Path>, compact: bool, parse: &ParseArgs) -> CliResult {
    let layout = SourceRegistry::with_defaults().load(input, &parse.to_options()?)?;

    let json = if compact {
        serde_json::to_string(&layout)?
    } else {
        serde_json::to_string_pretty(&layout)?
    };

    write_output(output, &json)
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and outline extraction tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/pdfoutline".dimmed()
    );
    println!("License: MIT");
}
