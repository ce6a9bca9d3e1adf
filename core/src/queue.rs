//! # Update Queue
//!
//! Collects changed contacts and sends them to the service in batches of
//! [`BATCH_LIMIT`]. The queue flushes itself the moment it fills up; the caller
//! flushes whatever is left at the end of the scan.

use std::collections::HashSet;

use nono_common::contact::{BatchEntry, BatchOutcome, Contact, ContactId};
use nono_common::error::ContactsError;
use nono_common::service::ContactsService;
use nono_common::ui::ScanReporter;
use tracing::{debug, info, warn};

pub const BATCH_LIMIT: usize = 100;

pub struct UpdateQueue<'a> {
    service: &'a dyn ContactsService,
    reporter: &'a dyn ScanReporter,
    dry_run: bool,
    entries: Vec<BatchEntry>,
    /// Every contact queued during this pass, flushed or not.
    seen: HashSet<ContactId>,
    outcomes: Vec<BatchOutcome>,
    batches: usize,
}

impl<'a> UpdateQueue<'a> {
    pub fn new(service: &'a dyn ContactsService, reporter: &'a dyn ScanReporter) -> Self {
        Self {
            service,
            reporter,
            dry_run: false,
            entries: Vec::with_capacity(BATCH_LIMIT),
            seen: HashSet::new(),
            outcomes: Vec::new(),
            batches: 0,
        }
    }

    /// Batches are reported and dropped instead of being submitted.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` was queued during this pass, flushed or not.
    pub fn contains(&self, id: &ContactId) -> bool {
        self.seen.contains(id)
    }

    /// Number of flushes that actually carried entries.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn outcomes(&self) -> &[BatchOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<BatchOutcome> {
        self.outcomes
    }

    /// Queues an update for `contact`.
    ///
    /// Returns `false` when the contact was already queued in this pass.
    pub async fn enqueue(&mut self, contact: Contact) -> Result<bool, ContactsError> {
        if !self.seen.insert(contact.id.clone()) {
            debug!(contact = %contact.id, "already queued");
            return Ok(false);
        }

        self.entries.push(BatchEntry::update(contact));

        if self.entries.len() >= BATCH_LIMIT {
            self.flush().await?;
        }
        Ok(true)
    }

    /// Sends every queued entry in one batch.
    ///
    /// The queue is empty afterwards whatever the outcome: per-item failures
    /// are reported, not retried, and a transport failure is returned to the caller.
    pub async fn flush(&mut self) -> Result<(), ContactsError> {
        if self.entries.is_empty() {
            return Ok(());
        }

        let entries = std::mem::take(&mut self.entries);
        self.batches += 1;

        if self.dry_run {
            info!(count = entries.len(), "dry run, batch discarded");
            self.reporter.batch_discarded(entries.len());
            return Ok(());
        }

        info!(count = entries.len(), "submitting batch");
        let outcomes = self.service.submit_batch(&entries).await?;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        if failed > 0 {
            warn!(failed, "some updates were refused");
        }

        self.reporter.batch_submitted(&outcomes);
        self.outcomes.extend(outcomes);
        Ok(())
    }
}
