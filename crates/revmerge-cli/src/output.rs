use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

/// How status lines are rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFormat {
    Human,
    /// One JSON object per line
    Json,
}

pub struct Output {
    format: StatusFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: StatusFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> StatusFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            StatusFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            StatusFormat::Json => self.print_json(&json!({
                "type": "success",
                "message": msg.as_ref()
            })),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            StatusFormat::Human => println!("{}", msg.as_ref()),
            StatusFormat::Json => self.print_json(&json!({
                "type": "info",
                "message": msg.as_ref()
            })),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            StatusFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            StatusFormat::Json => self.print_json(&json!({
                "type": "warning",
                "message": msg.as_ref()
            })),
        }
    }

    /// Structured payload; only emitted in JSON mode.
    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet || self.format != StatusFormat::Json {
            return;
        }
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        println!("{}", serde_json::to_string(data).unwrap_or_default());
    }
}
