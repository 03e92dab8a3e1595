use super::convert_ui::ConvertUI;
use crate::output::{Output, StatusFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use review_core::{run_pipeline, PipelineOptions, Stage};
use serde_json::json;

/// Parse the three sources, combine them and write the export, printing a
/// status line after each stage.
pub fn run_convert(options: &PipelineOptions, output: &Output) -> Result<()> {
    tracing::debug!(?options, "Convert command started");

    if options.samples > 0 && options.per_source_limit().is_none() {
        output.warn(format!(
            "--samples {} is too small to split across sources; only the combined output is capped",
            options.samples
        ));
    }

    let mut ui = ConvertUI::new(output.format() == StatusFormat::Human && !output.is_quiet());
    let result = run_pipeline(options, &mut |stage| match stage {
        Stage::Parsing { .. } | Stage::Combining | Stage::Saving { .. } => {
            ui.finish();
            output.info(stage.to_string());
            ui.start(stage.to_string());
        }
        Stage::Parsed { .. } | Stage::Combined { .. } => {
            ui.finish();
            output.info(stage.to_string());
        }
        Stage::Done => {
            ui.finish();
            output.success(stage.to_string());
        }
    });
    ui.finish();

    let summary = result.map_err(|e| eyre!("{:#}", e))?;

    let skipped = summary.text_dump_skipped + summary.review_json_skipped + summary.meta_json_skipped;
    if skipped > 0 {
        output.warn(format!("Skipped {} unreadable input entries (run with -v for details)", skipped));
    }

    output.json(&json!({
        "type": "summary",
        "text_dump": summary.text_dump,
        "review_json": summary.review_json,
        "meta_json": summary.meta_json,
        "skipped": {
            "text_dump": summary.text_dump_skipped,
            "review_json": summary.review_json_skipped,
            "meta_json": summary.meta_json_skipped,
        },
        "combined": summary.combined,
        "duplicates_removed": summary.duplicates_removed,
        "output": options.output.display().to_string(),
    }));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_run_convert_writes_output() {
        let dir = tempdir().unwrap();
        let txt = dir.path().join("amazon-meta.txt");
        let reviews = dir.path().join("reviews.json");
        let meta = dir.path().join("meta.json");

        let mut file = std::fs::File::create(&txt).unwrap();
        writeln!(file, "Id: 1\nASIN: B001\n    2005-3-14  cutomer: A1  rating: 5  votes: 10  helpful: 3").unwrap();
        std::fs::write(&reviews, "{\"asin\":\"X1\",\"reviewerID\":\"U1\",\"overall\":4.0}\n").unwrap();
        std::fs::write(&meta, "{\"asin\":\"X2\",\"category\":\"Books\"}\n").unwrap();

        let options = PipelineOptions {
            txt,
            json_reviews: reviews,
            json_meta: meta,
            output: dir.path().join("combined.csv"),
            format: "CSV".to_string(),
            samples: 0,
        };
        let output = Output::new(StatusFormat::Human, true);

        run_convert(&options, &output).unwrap();

        let written = std::fs::read_to_string(&options.output).unwrap();
        assert_eq!(written.lines().count(), 4);
        assert!(written.contains("Books & Literature"));
    }

    #[test]
    fn test_run_convert_rejects_unknown_format() {
        let dir = tempdir().unwrap();
        let options = PipelineOptions {
            output: dir.path().join("combined.xml"),
            format: "xml".to_string(),
            ..PipelineOptions::default()
        };
        let output = Output::new(StatusFormat::Json, true);

        let err = run_convert(&options, &output).unwrap_err();
        assert!(err.to_string().contains("Unsupported output format: xml"));
        assert!(!options.output.exists());
    }
}
