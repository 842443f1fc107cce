use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::icons::{CHECK, CROSS};

/// Spinner shown while a generation request is in flight.
///
/// Draws to stderr, so it disappears when output is piped.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("progress bar template is a valid static string"),
        );
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn success(self, message: impl AsRef<str>) {
        self.bar
            .finish_with_message(format!("{}{}", CHECK, message.as_ref()));
    }

    pub fn fail(self, message: impl AsRef<str>) {
        self.bar.finish_with_message(format!(
            "{}{}",
            CROSS,
            style(message.as_ref()).red()
        ));
    }
}
