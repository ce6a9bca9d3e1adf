use std::sync::Mutex;

use indicatif::ProgressBar;
use nono_common::contact::{BatchOutcome, Contact};
use nono_common::ui::ScanReporter;

use crate::terminal::{print, spinner};

/// Renders scan progress on the terminal.
pub struct TerminalReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn stop_spinner(&self) {
        if let Some(pb) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TerminalReporter {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

impl ScanReporter for TerminalReporter {
    fn fetching(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner::start("Fetching contacts..."));
        }
    }

    fn fetched(&self, count: usize) {
        self.stop_spinner();
        print::aligned_line("Fetched", format!("{count} contacts"));
    }

    fn contact_queued(&self, before: &Contact, after: &Contact) {
        print::header(&after.name);

        let rows = before.phone_numbers.len().max(after.phone_numbers.len());
        let value = |contact: &Contact, i: usize| -> String {
            contact
                .phone_numbers
                .get(i)
                .map(|p| p.value.clone())
                .unwrap_or_default()
        };
        let values: Vec<(String, String)> = (0..rows).map(|i| (value(before, i), value(after, i))).collect();
        let rows: Vec<(&str, &str)> = values.iter().map(|(b, a)| (b.as_str(), a.as_str())).collect();

        print::before_after(&rows);
    }

    fn batch_submitted(&self, outcomes: &[BatchOutcome]) {
        print::header("updates sent");
        for outcome in outcomes {
            print::outcome(outcome);
        }
    }

    fn batch_discarded(&self, count: usize) {
        print::header("dry run");
        print::print_status(format!("{count} updates not sent"));
    }
}
