//! End-to-end run: parse the three sources, combine, export.

use anyhow::{Context, Result};
use review_config::Config;
use review_sources::{parse_meta_json_with_stats, parse_review_json_with_stats, parse_text_dump_with_stats};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::combine::combine;
use crate::export::{export, ExportFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub txt: PathBuf,
    pub json_reviews: PathBuf,
    pub json_meta: PathBuf,
    pub output: PathBuf,
    /// Export format name, parsed case-insensitively
    pub format: String,
    /// Target number of combined rows; 0 disables every cap
    pub samples: usize,
}

impl PipelineOptions {
    /// Cap for each parser: a third of `samples`.
    ///
    /// `None` when sampling is off or the third rounds down to zero, in which
    /// case only the overall cap limits the output.
    pub fn per_source_limit(&self) -> Option<usize> {
        Some(self.samples / 3).filter(|limit| *limit > 0)
    }

    /// Cap on the combined dataset.
    pub fn total_limit(&self) -> Option<usize> {
        Some(self.samples).filter(|limit| *limit > 0)
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            txt: config.inputs.txt.clone(),
            json_reviews: config.inputs.json_reviews.clone(),
            json_meta: config.inputs.json_meta.clone(),
            output: config.output.path.clone(),
            format: config.output.format.clone(),
            samples: config.sampling.samples,
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    TextDump,
    ReviewJson,
    MetaJson,
}

/// Progress events emitted by [`run_pipeline`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage<'a> {
    Parsing { source: SourceKind, path: &'a Path },
    Parsed { source: SourceKind, records: usize },
    Combining,
    Combined { records: usize },
    Saving { path: &'a Path },
    Done,
}

impl fmt::Display for Stage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Parsing { path, .. } => write!(f, "Parsing {} file...", path.display()),
            Stage::Parsed { source, records } => match source {
                SourceKind::TextDump => write!(f, "Extracted {} reviews from text file", records),
                SourceKind::ReviewJson => write!(f, "Extracted {} reviews from review JSON", records),
                SourceKind::MetaJson => write!(f, "Extracted {} items from meta JSON", records),
            },
            Stage::Combining => write!(f, "Combining datasets and processing..."),
            Stage::Combined { records } => write!(f, "Combined dataset has {} unique reviews", records),
            Stage::Saving { path } => write!(f, "Saving to {}...", path.display()),
            Stage::Done => write!(f, "Done!"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub text_dump: usize,
    pub review_json: usize,
    pub meta_json: usize,
    /// Input units (blocks, lines, review lines) each parser could not use
    pub text_dump_skipped: usize,
    pub review_json_skipped: usize,
    pub meta_json_skipped: usize,
    /// Rows written to the output
    pub combined: usize,
    /// Rows dropped as duplicates after the overall cap
    pub duplicates_removed: usize,
}

/// Run the whole conversion, reporting each stage to `on_stage`.
///
/// The output format is checked before any input is read; an unknown format
/// aborts with nothing written.
pub fn run_pipeline(options: &PipelineOptions, on_stage: &mut dyn FnMut(&Stage<'_>)) -> Result<RunSummary> {
    let format: ExportFormat = options.format.parse()?;
    let per_source = options.per_source_limit();
    let total = options.total_limit();
    info!(?per_source, ?total, %format, "Starting conversion");

    on_stage(&Stage::Parsing { source: SourceKind::TextDump, path: &options.txt });
    let (text_dump, text_dump_stats) = parse_text_dump_with_stats(&options.txt, per_source)
        .with_context(|| format!("Failed to parse text dump {}", options.txt.display()))?;
    on_stage(&Stage::Parsed { source: SourceKind::TextDump, records: text_dump.len() });

    on_stage(&Stage::Parsing { source: SourceKind::ReviewJson, path: &options.json_reviews });
    let (review_json, review_json_stats) = parse_review_json_with_stats(&options.json_reviews, per_source)
        .with_context(|| format!("Failed to parse review JSON {}", options.json_reviews.display()))?;
    on_stage(&Stage::Parsed { source: SourceKind::ReviewJson, records: review_json.len() });

    on_stage(&Stage::Parsing { source: SourceKind::MetaJson, path: &options.json_meta });
    let (meta_json, meta_json_stats) = parse_meta_json_with_stats(&options.json_meta, per_source)
        .with_context(|| format!("Failed to parse metadata JSON {}", options.json_meta.display()))?;
    on_stage(&Stage::Parsed { source: SourceKind::MetaJson, records: meta_json.len() });

    let mut summary = RunSummary {
        text_dump: text_dump.len(),
        review_json: review_json.len(),
        meta_json: meta_json.len(),
        text_dump_skipped: text_dump_stats.skipped(),
        review_json_skipped: review_json_stats.skipped(),
        meta_json_skipped: meta_json_stats.skipped(),
        ..RunSummary::default()
    };
    let parsed = summary.text_dump + summary.review_json + summary.meta_json;
    let kept = total.map_or(parsed, |limit| parsed.min(limit));

    on_stage(&Stage::Combining);
    let combined = combine(text_dump, review_json, meta_json, total);
    summary.combined = combined.len();
    summary.duplicates_removed = kept - combined.len();
    on_stage(&Stage::Combined { records: combined.len() });

    on_stage(&Stage::Saving { path: &options.output });
    export(&combined, &options.output, format)
        .with_context(|| format!("Failed to save {}", options.output.display()))?;
    on_stage(&Stage::Done);

    info!(
        text_dump = summary.text_dump,
        review_json = summary.review_json,
        meta_json = summary.meta_json,
        skipped = summary.text_dump_skipped + summary.review_json_skipped + summary.meta_json_skipped,
        combined = summary.combined,
        duplicates_removed = summary.duplicates_removed,
        "Conversion finished"
    );
    Ok(summary)
}
