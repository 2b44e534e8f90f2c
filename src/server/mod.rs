use crate::{report::Report, submission::Submission, Result};

#[cfg(feature = "client")]
mod api;

#[cfg(feature = "client")]
pub use api::ReportsApiClient;

/// The only thing allowed to talk to the reports backend.
///
/// [`ReportsApiClient`] speaks HTTP; tests swap in in-memory implementations.
#[allow(async_fn_in_trait)]
pub trait ReportsBackend {
    /// Create a report and return it as persisted, with its id and timestamp.
    async fn submit(&self, submission: &Submission) -> Result<Report>;

    /// Every report, in the order the backend returns them.
    async fn list_all(&self) -> Result<Vec<Report>>;

    /// One report. `Ok(None)` means the backend has no such report, which is
    /// not the same thing as the request failing.
    async fn get_by_id(&self, id: &str) -> Result<Option<Report>>;
}
