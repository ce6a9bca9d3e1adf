//! # Contact Model
//!
//! A transient local copy of an address book entry, plus the envelope used
//! to send it back to the service in a batch.

use std::fmt;

/// Opaque identity of a contact on the remote service (e.g. `people/c123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    pub value: String,
    pub label: Option<String>,
}

impl PhoneNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label with surrounding whitespace removed.
    ///
    /// Blank labels are reported as `None`.
    pub fn label(&self) -> Option<&str> {
        normalize_label(self.label.as_deref())
    }
}

pub fn normalize_label(label: Option<&str>) -> Option<&str> {
    label.map(str::trim).filter(|l| !l.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    /// Version tag the service requires to accept an update.
    pub etag: Option<String>,
    pub name: String,
    pub phone_numbers: Vec<PhoneNumber>,
    /// Resource names of the groups this contact belongs to.
    pub groups: Vec<String>,
}

impl Contact {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ContactId::new(id),
            etag: None,
            name: name.into(),
            phone_numbers: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_phone(mut self, phone: PhoneNumber) -> Self {
        self.phone_numbers.push(phone);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    Update,
}

impl BatchOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchOperation::Update => "update",
        }
    }
}

/// A contact queued for submission, tagged with what to do and how to find
/// it again in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub contact: Contact,
    pub operation: BatchOperation,
    pub correlation_id: String,
}

impl BatchEntry {
    pub fn update(contact: Contact) -> Self {
        let operation = BatchOperation::Update;
        Self {
            contact,
            operation,
            correlation_id: operation.as_str().to_string(),
        }
    }
}

/// Per-item status returned by a batch submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub correlation_id: String,
    pub contact_id: ContactId,
    pub contact_name: String,
    pub status_code: u16,
    pub reason: String,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
