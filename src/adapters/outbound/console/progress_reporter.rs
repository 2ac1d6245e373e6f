use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

/// StderrProgressReporter adapter for reporting status to stderr
///
/// Loading states are drawn as an indicatif spinner, which hides itself
/// when stderr is not a terminal. Quiet mode suppresses everything except
/// errors.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    const TICK_MILLIS: u64 = 120;

    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
            quiet: false,
        }
    }

    pub fn quiet() -> Self {
        Self {
            spinner: RefCell::new(None),
            quiet: true,
        }
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if self.quiet {
            return;
        }
        match self.spinner.borrow().as_ref() {
            Some(spinner) => spinner.println(message),
            None => eprintln!("{}", message),
        }
    }

    fn report_loading(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut slot = self.spinner.borrow_mut();
        let spinner = slot.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("   {spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(Self::TICK_MILLIS));
            spinner
        });
        spinner.set_message(message.to_string());
    }

    fn finish_loading(&self) {
        self.clear_spinner();
    }

    fn report_error(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.clear_spinner();
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}
