pub mod category;
pub mod combine;
pub mod export;
pub mod pipeline;

pub use category::rewrite_category;
pub use combine::{combine, combine_all, remove_duplicate_reviews};
pub use export::{export, export_str, read_json_export, ExportError, ExportFormat};
pub use pipeline::{run_pipeline, PipelineOptions, RunSummary, SourceKind, Stage};
