//! Ports towards the human operator.
//!
//! The scan never talks to a terminal directly: the binary plugs in a console
//! prompt and a terminal reporter, tests plug in scripted doubles.

use crate::contact::{BatchOutcome, Contact};

/// What the operator is asked when a number cannot be classified on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPrompt<'a> {
    pub contact_name: &'a str,
    pub original: &'a str,
    pub candidate: &'a str,
    pub label: Option<&'a str>,
}

/// Synchronous yes/no decision. Blocks the scan until answered.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&ConfirmPrompt<'_>) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> bool {
        self(prompt)
    }
}

/// Progress notifications emitted while scanning. Every method defaults to a no-op.
pub trait ScanReporter: Send + Sync {
    fn fetching(&self) {}

    fn fetched(&self, _count: usize) {}

    /// A changed contact is about to be queued. `before` is the remote snapshot.
    fn contact_queued(&self, _before: &Contact, _after: &Contact) {}

    fn batch_submitted(&self, _outcomes: &[BatchOutcome]) {}

    /// Dry run: a full batch was dropped instead of being sent.
    fn batch_discarded(&self, _count: usize) {}
}

pub struct SilentReporter;

impl ScanReporter for SilentReporter {}
