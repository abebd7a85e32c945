use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::application::StageObserver;
use crate::domain::{BackgroundImage, Stage};

/// Renders pipeline progress in the terminal.
///
/// A spinner runs while a stage is in flight; when the stage completes its
/// output is printed under the stage heading. The spinner draws to stderr, so
/// redirecting stdout captures only the generated text.
pub struct TerminalPresenter {
    out: Mutex<Box<dyn Write + Send>>,
    spinner: Mutex<Option<ProgressBar>>,
    spinners: bool,
}

impl TerminalPresenter {
    pub fn stdout() -> Self {
        Self {
            out: Mutex::new(Box::new(std::io::stdout())),
            spinner: Mutex::new(None),
            spinners: true,
        }
    }

    /// Write to an arbitrary sink with spinners disabled.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
            spinner: Mutex::new(None),
            spinners: false,
        }
    }

    pub fn success(&self) {
        self.write_block("Blog post generation complete!\n");
    }

    pub fn error(&self, message: &str) {
        self.write_block(&format!("An error occurred: {message}\n"));
    }

    fn write_block(&self, text: &str) {
        let mut out = lock(&self.out);
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("Failed to write output: {}", e);
        }
    }

    fn finish_spinner(&self) {
        if let Some(spinner) = lock(&self.spinner).take() {
            spinner.finish_and_clear();
        }
    }
}

impl StageObserver for TerminalPresenter {
    fn stage_started(&self, stage: Stage) {
        if !self.spinners {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(stage.progress_message());
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = lock(&self.spinner).replace(spinner) {
            previous.finish_and_clear();
        }
    }

    fn stage_completed(&self, stage: Stage, output: &str) {
        self.finish_spinner();

        let body = match stage {
            Stage::Background => BackgroundImage::new(output).css(),
            _ => output.trim().to_string(),
        };
        let heading = stage.heading();
        let underline = "-".repeat(heading.chars().count());

        self.write_block(&format!("\n{heading}\n{underline}\n{body}\n"));
    }

    fn stage_failed(&self, _stage: Stage) {
        self.finish_spinner();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
