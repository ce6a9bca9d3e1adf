//! # nono-common
//!
//! Types shared by every crate of the workspace.
//!
//! * **[`contact`]**: the contact, phone number and batch models.
//! * **[`service`]**: the port towards the remote contacts service.
//! * **[`ui`]**: the ports towards the human operator (confirmation and reporting).
//! * **[`config`]**: configuration loaded once at startup.
//! * **[`error`]**: the error taxonomy.

pub mod config;
pub mod contact;
pub mod error;
pub mod service;
pub mod ui;
