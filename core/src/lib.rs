//! # nono-core
//!
//! The ninth-digit fixer.
//!
//! * [`classifier`]: decides whether a number is an old-format area 11 mobile.
//! * [`disambiguator`]: settles the ambiguous ones by label or by asking.
//! * [`audit`]: the deduplicated updated/skipped record of a run.
//! * [`queue`]: batches updates towards the contacts service.
//! * [`scanner`]: one pass over the whole address book.
//! * [`people`]: the Google People API adapter for [`nono_common::service::ContactsService`].

pub mod audit;
pub mod classifier;
pub mod disambiguator;
pub mod people;
pub mod queue;
pub mod scanner;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
