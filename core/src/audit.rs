//! Deduplicated record of every decision taken during a scan, printed at the end of the run.

use std::collections::BTreeSet;
use std::fmt;

/// How a decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Automatic,
    /// The operator answered a prompt.
    Manual,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Automatic => f.write_str("automático"),
            Mode::Manual => f.write_str("manual"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuditLog {
    updated: BTreeSet<String>,
    skipped: BTreeSet<String>,
}

impl AuditLog {
    pub fn record_update(&mut self, contact: &str, original: &str, candidate: &str, mode: Mode) {
        self.updated
            .insert(format!("{contact}: {original} - {candidate} {mode}"));
    }

    pub fn record_skip(&mut self, contact: &str, original: &str, mode: Mode) {
        self.skipped.insert(format!("{contact}: {original} {mode}"));
    }

    pub fn updated(&self) -> impl Iterator<Item = &str> {
        self.updated.iter().map(String::as_str)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.skipped.iter().map(String::as_str)
    }

    pub fn contains_update(&self, line: &str) -> bool {
        self.updated.contains(line)
    }

    pub fn contains_skip(&self, line: &str) -> bool {
        self.skipped.contains(line)
    }

    pub fn update_count(&self) -> usize {
        self.updated.len()
    }

    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Decisions taken on one contact, held back until its update is queued.
#[derive(Debug, Default)]
pub struct PendingAudit {
    log: AuditLog,
    /// Numbers as listed that the update would rewrite.
    rewritten: Vec<(String, Mode)>,
}

impl PendingAudit {
    pub fn log_mut(&mut self) -> &mut AuditLog {
        &mut self.log
    }

    pub fn rewrites(&mut self, listed: &str, mode: Mode) {
        self.rewritten.push((listed.to_string(), mode));
    }

    pub fn is_rewriting(&self) -> bool {
        !self.rewritten.is_empty()
    }

    /// The update went out: every staged line stands.
    pub fn commit(self, log: &mut AuditLog) {
        log.updated.extend(self.log.updated);
        log.skipped.extend(self.log.skipped);
    }

    /// The update was dropped: staged updates become skips of the listed numbers.
    pub fn abandon(self, contact: &str, log: &mut AuditLog) {
        log.skipped.extend(self.log.skipped);
        for (listed, mode) in &self.rewritten {
            log.record_skip(contact, listed, *mode);
        }
    }
}
