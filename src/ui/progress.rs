//! Spinner shown while a make request is outstanding

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A task spinner on stderr, silent outside a terminal
pub struct TaskSpinner {
    bar: Option<ProgressBar>,
}

impl TaskSpinner {
    /// Start a spinner with a message
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        let bar = ctx.use_fancy_output().then(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(spinner_style) = ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}  {elapsed:.dim}")
            {
                bar.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });
        Self { bar }
    }

    /// Stop with success message
    pub fn stop(self, message: &str) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
            eprintln!("{} {}", style("✓").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(self, message: &str) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
            eprintln!("{} {}", style("✗").red(), message);
        }
    }
}
