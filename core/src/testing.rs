//! In-memory doubles for the service and operator ports.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use nono_common::contact::{BatchEntry, BatchOutcome, Contact, ContactId};
use nono_common::error::ContactsError;
use nono_common::service::ContactsService;
use nono_common::ui::{Confirm, ConfirmPrompt, ScanReporter};

/// A contacts service backed by a vector.
///
/// Submitted batches are applied to the stored contacts and kept for inspection.
#[derive(Default)]
pub struct InMemoryContacts {
    contacts: Mutex<Vec<Contact>>,
    batches: Mutex<Vec<Vec<BatchEntry>>>,
    snapshots: Mutex<Vec<ContactId>>,
    refused: HashSet<ContactId>,
    unreachable: HashSet<ContactId>,
    fail_batches: bool,
    reject_credentials: bool,
}

impl InMemoryContacts {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: Mutex::new(contacts),
            ..Self::default()
        }
    }

    /// Updates of this contact come back with status 412.
    pub fn refusing(mut self, id: &str) -> Self {
        self.refused.insert(ContactId::new(id));
        self
    }

    /// Fetching this contact by id fails with a transport error.
    pub fn unreachable(mut self, id: &str) -> Self {
        self.unreachable.insert(ContactId::new(id));
        self
    }

    pub fn failing_batches(mut self) -> Self {
        self.fail_batches = true;
        self
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.reject_credentials = true;
        self
    }

    pub fn batches(&self) -> Vec<Vec<BatchEntry>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }

    /// Ids fetched one by one, in order.
    pub fn snapshots(&self) -> Vec<ContactId> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn stored(&self, id: &str) -> Option<Contact> {
        self.contacts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id.as_str() == id)
            .cloned()
    }

    fn check_credentials(&self) -> Result<(), ContactsError> {
        if self.reject_credentials {
            return Err(ContactsError::Authentication("401 Unauthorized".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactsService for InMemoryContacts {
    async fn fetch_all_contacts(&self, group: Option<&str>) -> Result<Vec<Contact>, ContactsError> {
        self.check_credentials()?;
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| group.is_none_or(|g| c.in_group(g)))
            .cloned()
            .collect())
    }

    async fn fetch_contact(&self, id: &ContactId) -> Result<Contact, ContactsError> {
        self.check_credentials()?;
        self.snapshots.lock().unwrap().push(id.clone());
        if self.unreachable.contains(id) {
            return Err(ContactsError::Transport(format!("{id}: connection reset")));
        }
        self.contacts
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| ContactsError::Transport(format!("{id}: 404 Not Found")))
    }

    async fn submit_batch(&self, entries: &[BatchEntry]) -> Result<Vec<BatchOutcome>, ContactsError> {
        self.check_credentials()?;
        if self.fail_batches {
            return Err(ContactsError::Transport("503 Service Unavailable".into()));
        }
        self.batches.lock().unwrap().push(entries.to_vec());

        let mut contacts = self.contacts.lock().unwrap();
        let outcomes = entries
            .iter()
            .map(|entry| {
                let refused = self.refused.contains(&entry.contact.id);
                if !refused {
                    if let Some(stored) = contacts.iter_mut().find(|c| c.id == entry.contact.id) {
                        *stored = entry.contact.clone();
                    }
                }
                BatchOutcome {
                    correlation_id: entry.correlation_id.clone(),
                    contact_id: entry.contact.id.clone(),
                    contact_name: entry.contact.name.clone(),
                    status_code: if refused { 412 } else { 200 },
                    reason: if refused { "Precondition Failed" } else { "OK" }.to_string(),
                }
            })
            .collect();
        Ok(outcomes)
    }
}

/// Answers prompts from a script and remembers what it was asked.
///
/// Prompts beyond the script are answered "no".
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::default(),
        }
    }

    /// Prompts as `name|original|candidate|label`.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt<'_>) -> bool {
        self.prompts.lock().unwrap().push(format!(
            "{}|{}|{}|{}",
            prompt.contact_name,
            prompt.original,
            prompt.candidate,
            prompt.label.unwrap_or_default()
        ));
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    fetched: Mutex<Option<usize>>,
    queued: Mutex<Vec<(Contact, Contact)>>,
    submitted: Mutex<Vec<usize>>,
    discarded: Mutex<Vec<usize>>,
}

impl RecordingReporter {
    pub fn fetched(&self) -> Option<usize> {
        *self.fetched.lock().unwrap()
    }

    /// `(before, after)` pairs in queueing order.
    pub fn queued(&self) -> Vec<(Contact, Contact)> {
        self.queued.lock().unwrap().clone()
    }

    pub fn submitted_batches(&self) -> Vec<usize> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn discarded_batches(&self) -> Vec<usize> {
        self.discarded.lock().unwrap().clone()
    }
}

impl ScanReporter for RecordingReporter {
    fn fetched(&self, count: usize) {
        *self.fetched.lock().unwrap() = Some(count);
    }

    fn contact_queued(&self, before: &Contact, after: &Contact) {
        self.queued
            .lock()
            .unwrap()
            .push((before.clone(), after.clone()));
    }

    fn batch_submitted(&self, outcomes: &[BatchOutcome]) {
        self.submitted.lock().unwrap().push(outcomes.len());
    }

    fn batch_discarded(&self, count: usize) {
        self.discarded.lock().unwrap().push(count);
    }
}
