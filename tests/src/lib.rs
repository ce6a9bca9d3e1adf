//! Workspace integration tests.
//!
//! * `scanning`: whole scans against the in-memory service.
//! * `people_api`: the People API adapter against a mock HTTP server.

mod people_api;
mod scanning;
