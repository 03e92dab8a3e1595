use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

/// Tallies what a parser did with its input so a single summary can be logged
/// instead of one line per skipped record.
pub struct ParseStats {
    source: &'static str,
    seen: usize,
    emitted: usize,
    skipped: usize,
    start_time: Instant,
    skip_reasons: HashMap<&'static str, usize>,
}

impl ParseStats {
    /// `source` names the input in log lines (e.g. "review JSON")
    pub fn new(source: &'static str) -> Self {
        Self {
            source,
            seen: 0,
            emitted: 0,
            skipped: 0,
            start_time: Instant::now(),
            skip_reasons: HashMap::new(),
        }
    }

    /// Record that an input unit (line or product block) was read
    pub fn record_seen(&mut self) {
        self.seen += 1;
    }

    pub fn record_emitted(&mut self) {
        self.emitted += 1;
    }

    /// Record a skipped input unit, grouped by `reason` in the summary.
    /// Only the first few skips per source are logged individually.
    pub fn record_skipped(&mut self, reason: &'static str, detail: impl std::fmt::Display) {
        self.skipped += 1;
        *self.skip_reasons.entry(reason).or_insert(0) += 1;
        if self.skipped <= 5 {
            debug!(source = self.source, reason, %detail, "Skipping input");
        }
    }

    /// Input units skipped for any reason
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Log final summary of the parse
    pub fn log_summary(&self) {
        let elapsed = self.start_time.elapsed();
        info!(
            source = self.source,
            seen = self.seen,
            records = self.emitted,
            skipped = self.skipped,
            "Parsed {} in {:.2}s",
            self.source,
            elapsed.as_secs_f64()
        );

        if !self.skip_reasons.is_empty() {
            let mut entries: Vec<_> = self.skip_reasons.iter().collect();
            entries.sort_by(|a, b| b.1.cmp(a.1));
            let breakdown: Vec<String> = entries
                .iter()
                .map(|(reason, count)| format!("{}: {}", reason, count))
                .collect();
            debug!(source = self.source, "Skip breakdown: {}", breakdown.join(", "));
        }
    }
}
