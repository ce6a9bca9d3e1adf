//! # Contact Scanner
//!
//! Drives one pass over the address book:
//!
//! 1. fetch every contact (optionally one group only),
//! 2. classify every phone number, asking the operator when needed,
//! 3. snapshot and queue each changed contact,
//! 4. flush what is left and hand back a [`ScanReport`].
//!
//! The pass is strictly sequential. A pending operator prompt holds up the
//! whole scan.

use nono_common::config::Rules;
use nono_common::contact::{BatchOutcome, Contact};
use nono_common::error::ContactsError;
use nono_common::service::ContactsService;
use nono_common::ui::{Confirm, ScanReporter, SilentReporter};
use tracing::{debug, info, warn};

use crate::audit::{AuditLog, Mode, PendingAudit};
use crate::classifier::{Classification, NumberClassifier, strip_dialing_prefix};
use crate::disambiguator::Disambiguator;
use crate::queue::UpdateQueue;

#[derive(Debug, Default)]
pub struct ScanReport {
    pub total_contacts: usize,
    pub queued_contacts: usize,
    /// Changed contacts left alone because their snapshot could not be fetched.
    pub unsnapshotted: Vec<String>,
    pub audit: AuditLog,
    pub outcomes: Vec<BatchOutcome>,
}

pub struct ContactScanner<'a> {
    service: &'a dyn ContactsService,
    confirm: &'a dyn Confirm,
    reporter: &'a dyn ScanReporter,
    rules: &'a Rules,
    classifier: NumberClassifier,
    group: Option<&'a str>,
    dry_run: bool,
}

impl<'a> ContactScanner<'a> {
    pub fn new(service: &'a dyn ContactsService, confirm: &'a dyn Confirm, rules: &'a Rules) -> Self {
        Self {
            service,
            confirm,
            reporter: &SilentReporter,
            rules,
            classifier: NumberClassifier::new(rules.mobile_threshold),
            group: None,
            dry_run: false,
        }
    }

    pub fn with_reporter(mut self, reporter: &'a dyn ScanReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_group(mut self, group: Option<&'a str>) -> Self {
        self.group = group;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<ScanReport, ContactsError> {
        self.reporter.fetching();
        let contacts = self.service.fetch_all_contacts(self.group).await?;
        self.reporter.fetched(contacts.len());
        info!(total = contacts.len(), group = ?self.group, "contacts fetched");

        let mut report = ScanReport {
            total_contacts: contacts.len(),
            ..ScanReport::default()
        };
        let disambiguator = Disambiguator::new(self.rules, self.confirm);
        let mut queue = UpdateQueue::new(self.service, self.reporter).dry_run(self.dry_run);

        for mut contact in contacts {
            let pending = self.fix_contact(&mut contact, &disambiguator);
            if !pending.is_rewriting() {
                pending.commit(&mut report.audit);
                continue;
            }
            if queue.contains(&contact.id) {
                debug!(contact = %contact.id, "listed twice, already queued");
                pending.commit(&mut report.audit);
                continue;
            }

            let before = match self.service.fetch_contact(&contact.id).await {
                Ok(before) => before,
                Err(err) if err.is_authentication() => return Err(err),
                Err(err) => {
                    warn!(contact = %contact.name, error = %err, "snapshot failed, update dropped");
                    pending.abandon(&contact.name, &mut report.audit);
                    report.unsnapshotted.push(contact.name);
                    continue;
                }
            };

            pending.commit(&mut report.audit);
            self.reporter.contact_queued(&before, &contact);
            if queue.enqueue(contact).await? {
                report.queued_contacts += 1;
            }
        }

        queue.flush().await?;
        report.outcomes = queue.into_outcomes();
        Ok(report)
    }

    /// Rewrites the phone numbers of `contact` in place.
    ///
    /// The returned decisions are not in the report yet; the caller commits
    /// them once the update is queued.
    fn fix_contact(&self, contact: &mut Contact, disambiguator: &Disambiguator<'_>) -> PendingAudit {
        let Contact {
            name,
            phone_numbers,
            ..
        } = contact;
        let mut pending = PendingAudit::default();

        for phone in phone_numbers.iter_mut() {
            let listed = phone.value.clone();
            let mut mode = Mode::Automatic;

            match self.classifier.classify(&listed, phone.label.as_deref()) {
                Classification::NonMobile => pending.log_mut().record_skip(name, &listed, Mode::Automatic),
                Classification::Mobile { candidate, .. } => {
                    pending
                        .log_mut()
                        .record_update(name, &listed, &candidate, Mode::Automatic);
                    phone.value = candidate;
                }
                Classification::Ambiguous { candidate, label, .. } => {
                    let resolution =
                        disambiguator.resolve(&candidate, &listed, name, label.as_deref(), pending.log_mut());
                    if resolution.is_accept() {
                        mode = resolution.mode();
                        phone.value = candidate;
                    }
                }
            }

            if let Some(prefix) = self.rules.strip_prefix.as_deref() {
                if let Some(stripped) = strip_dialing_prefix(&phone.value, prefix) {
                    let stripped = stripped.to_string();
                    pending
                        .log_mut()
                        .record_update(name, &phone.value, &stripped, Mode::Automatic);
                    phone.value = stripped;
                }
            }

            if phone.value != listed {
                pending.rewrites(&listed, mode);
            }
        }

        if pending.is_rewriting() {
            debug!(contact = %name, "contact changed");
        }
        pending
    }
}
