use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a long stage (parsing, combining, saving) runs.
///
/// Disabled when output is not a terminal; status lines still print.
pub struct ConvertUI {
    spinner: Option<ProgressBar>,
    interactive: bool,
}

impl ConvertUI {
    pub fn new(enabled: bool) -> Self {
        let interactive = enabled && is_interactive();
        if !interactive {
            tracing::debug!(operation = "ui_init", mode = "non_interactive", "Progress spinners disabled");
        }
        Self {
            spinner: None,
            interactive,
        }
    }

    pub fn start(&mut self, msg: impl Into<String>) {
        self.finish();
        if !self.interactive {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
        );
        spinner.set_message(msg.into());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    /// Clear the active spinner, if any, before the next status line prints.
    pub fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
