//! # Disambiguator
//!
//! Settles numbers whose leading digit is shared by mobile and fixed lines.
//! The phone label is tried first against the configured carrier names, then
//! against the known non-mobile labels; only when neither decides is the
//! operator asked.

use nono_common::config::Rules;
use nono_common::contact::normalize_label;
use nono_common::ui::{Confirm, ConfirmPrompt};
use tracing::debug;

use crate::audit::{AuditLog, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Accept(Mode),
    Reject(Mode),
}

impl Resolution {
    pub fn is_accept(&self) -> bool {
        matches!(self, Resolution::Accept(_))
    }

    pub fn mode(&self) -> Mode {
        match self {
            Resolution::Accept(mode) | Resolution::Reject(mode) => *mode,
        }
    }
}

pub struct Disambiguator<'a> {
    rules: &'a Rules,
    confirm: &'a dyn Confirm,
}

impl<'a> Disambiguator<'a> {
    pub fn new(rules: &'a Rules, confirm: &'a dyn Confirm) -> Self {
        Self { rules, confirm }
    }

    /// Decides whether `candidate` should replace `original` and records the
    /// decision in `audit`.
    ///
    /// May block on the operator.
    pub fn resolve(
        &self,
        candidate: &str,
        original: &str,
        contact_name: &str,
        label: Option<&str>,
        audit: &mut AuditLog,
    ) -> Resolution {
        let label = normalize_label(label);
        let resolution = self.decide(candidate, original, contact_name, label);

        match resolution {
            Resolution::Accept(mode) => audit.record_update(contact_name, original, candidate, mode),
            Resolution::Reject(mode) => audit.record_skip(contact_name, original, mode),
        }
        debug!(contact = contact_name, original, candidate, ?resolution, "resolved");

        resolution
    }

    fn decide(
        &self,
        candidate: &str,
        original: &str,
        contact_name: &str,
        label: Option<&str>,
    ) -> Resolution {
        if let Some(label) = label {
            if self.rules.mnos.contains(label) {
                return Resolution::Accept(Mode::Automatic);
            }
            if self.rules.ignore_labels.contains(label) {
                return Resolution::Reject(Mode::Automatic);
            }
        }

        let prompt = ConfirmPrompt {
            contact_name,
            original,
            candidate,
            label,
        };
        if self.confirm.confirm(&prompt) {
            Resolution::Accept(Mode::Manual)
        } else {
            Resolution::Reject(Mode::Manual)
        }
    }
}
