//! Terminal progress for outputs written per source object

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static OUTPUT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking the outputs of the object being processed
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    /// Create a reporter drawing to standard error
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(OUTPUT_STYLE.clone());
        Self { bar }
    }

    /// Create a reporter that tracks counts without drawing
    pub fn hidden() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden());
        bar.set_style(OUTPUT_STYLE.clone());
        Self { bar }
    }

    /// Reset the bar for a new source object with `outputs` pending writes
    pub fn start_object(&self, name: &str, outputs: usize) {
        self.bar.reset();
        self.bar.set_length(outputs as u64);
        self.bar.set_position(0);
        self.bar.set_prefix(name.to_string());
        self.bar.set_message(String::new());
    }

    /// Record one completed output write
    pub fn output_written(&self, name: &str) {
        self.bar.inc(1);
        self.bar.set_message(name.to_string());
    }

    /// Number of outputs recorded since the last [`Self::start_object`]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
