use async_trait::async_trait;

use crate::contact::{BatchEntry, BatchOutcome, Contact, ContactId};
use crate::error::ContactsError;

/// The remote address book.
///
/// Implemented by the HTTP adapter in `nono-core` and by in-memory fakes in tests.
#[async_trait]
pub trait ContactsService: Send + Sync {
    /// Retrieves every contact, optionally restricted to one group.
    ///
    /// Implementations must return the complete set, not just the first page.
    async fn fetch_all_contacts(&self, group: Option<&str>) -> Result<Vec<Contact>, ContactsError>;

    /// Retrieves the current remote state of a single contact.
    async fn fetch_contact(&self, id: &ContactId) -> Result<Contact, ContactsError>;

    /// Submits all entries in one call and returns one outcome per item.
    async fn submit_batch(&self, entries: &[BatchEntry]) -> Result<Vec<BatchOutcome>, ContactsError>;
}
