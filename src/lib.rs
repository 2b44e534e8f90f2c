//! A client for the FixMyBlock civic-issue reporting API.

#![warn(missing_docs)]

/// Deriving map markers, timestamps and school safety counts from fetched reports.
pub mod aggregate;
/// Where and how to reach the reports API.
pub mod config;
/// Error types shared by the whole crate.
pub mod error;
/// Single-page PDF export of a report.
#[cfg(feature = "pdf")]
pub mod export;
/// Structs that capture a FixMyBlock report and its wire representation.
pub mod report;
/// Tools for interfacing with the reports backend.
pub mod server;
/// Turning report form state into a submission.
pub mod submission;

pub use error::{Error, Result, ValidationError};
