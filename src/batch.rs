//! Directory batch processing.
//!
//! Every supported file in the input directory yields `<base>.json` in the
//! output directory. Documents are independent: one failure is logged,
//! recorded in the [`BatchReport`], and the rest of the batch continues.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::outline::{OutlineConfig, OutlineExtractor};
use crate::parser::ParseOptions;
use crate::render::{to_json, JsonFormat};
use crate::source::SourceRegistry;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for inputs (not recursive)
    pub input_dir: PathBuf,
    /// Directory receiving one JSON file per input
    pub output_dir: PathBuf,
    /// JSON layout of the written files
    pub format: JsonFormat,
    /// Process documents on the rayon thread pool
    pub parallel: bool,
    /// Heuristic thresholds
    pub config: OutlineConfig,
    /// Options passed to every source
    pub parse: ParseOptions,
    /// Sources by extension
    pub registry: SourceRegistry,
}

impl BatchOptions {
    /// Create options with defaults: pretty JSON, parallel, PDF inputs only.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            format: JsonFormat::Pretty,
            parallel: true,
            config: OutlineConfig::default(),
            parse: ParseOptions::default(),
            registry: SourceRegistry::with_defaults(),
        }
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set heuristic thresholds.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the source registry.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Summary of a successfully processed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub title: String,
    pub entries: usize,
}

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Summary, or the error message of a failed document
    pub result: std::result::Result<DocumentSummary, String>,
}

impl DocumentOutcome {
    /// Check if the document was written.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Check if no input was found.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of documents written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}

/// List the supported files of `dir`, sorted by name.
///
/// A missing directory yields no inputs.
pub fn discover_inputs(dir: &Path, registry: &SourceRegistry) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::warn!("input directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && registry.supports_path(&path) {
            inputs.push(path);
        }
    }
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

/// Output file for an input: `<output_dir>/<base>.json`.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let base = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = base.to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Run a batch.
pub fn run(options: &BatchOptions) -> Result<BatchReport> {
    run_with_progress(options, |_| {})
}

/// Run a batch, calling `on_done` as each document finishes.
///
/// `on_done` may be called from several threads when the run is parallel.
pub fn run_with_progress<F>(options: &BatchOptions, on_done: F) -> Result<BatchReport>
where
    F: Fn(&DocumentOutcome) + Sync,
{
    let extractor = OutlineExtractor::with_config(options.config.clone())?;
    let inputs = discover_inputs(&options.input_dir, &options.registry)?;
    if inputs.is_empty() {
        return Ok(BatchReport::default());
    }

    fs::create_dir_all(&options.output_dir)?;
    log::debug!(
        "processing {} input(s) into {}",
        inputs.len(),
        options.output_dir.display()
    );

    let process = |input: &PathBuf| {
        let outcome = process_document(input, options, &extractor);
        on_done(&outcome);
        outcome
    };
    let outcomes = if options.parallel {
        inputs.par_iter().map(process).collect()
    } else {
        inputs.iter().map(process).collect()
    };

    Ok(BatchReport { outcomes })
}

fn process_document(
    input: &Path,
    options: &BatchOptions,
    extractor: &OutlineExtractor,
) -> DocumentOutcome {
    let output = output_path(&options.output_dir, input);
    // A panic inside a source fails this document only.
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
        write_outline(input, &output, options, extractor)
    }));
    let result = attempt
        .unwrap_or_else(|payload| Err(Error::Other(panic_message(payload.as_ref()))))
        .map_err(|e| {
            log::error!("Failed to process {}: {}", input.display(), e);
            e.to_string()
        });

    DocumentOutcome {
        input: input.to_path_buf(),
        output,
        result,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("panic while processing: {}", detail)
}

fn write_outline(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
    extractor: &OutlineExtractor,
) -> Result<DocumentSummary> {
    if output.exists() && fs::canonicalize(input)? == fs::canonicalize(output)? {
        return Err(Error::Other(format!(
            "output {} would overwrite its input",
            output.display()
        )));
    }

    let layout = options.registry.load(input, &options.parse)?;
    let result = extractor.extract(&layout);
    fs::write(output, to_json(&result, options.format)?)?;

    Ok(DocumentSummary {
        entries: result.outline.len(),
        title: result.title,
    })
}
