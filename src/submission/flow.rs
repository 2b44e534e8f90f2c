use core::fmt;

use tracing::{error, info};

use crate::{server::ReportsBackend, ValidationError};

use super::{ReportForm, SubmissionStatus};

/// The short message shown to the reporter after pressing "submit".
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Notice {
    /// A required field is missing; nothing was sent.
    Invalid(ValidationError),
    /// The backend accepted the report.
    Submitted,
    /// Sending failed. Details are logged, not shown.
    Failed,
}

impl Notice {
    #[allow(missing_docs)]
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Submitted)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Invalid(reason) => write!(f, "{reason}"),
            Notice::Submitted => f.write_str("✅ Report successfully submitted!"),
            Notice::Failed => f.write_str("❌ Failed to submit report"),
        }
    }
}

/// Validate the form and hand it to `backend`.
///
/// There are no retries: after [`Notice::Failed`] the reporter has to submit
/// the whole form again.
pub async fn submit_report<B: ReportsBackend>(backend: &B, form: &mut ReportForm) -> Notice {
    let submission = match form.assemble() {
        Ok(submission) => submission,
        Err(reason) => return Notice::Invalid(reason),
    };

    form.set_status(SubmissionStatus::Submitting);
    match backend.submit(&submission).await {
        Ok(report) => {
            info!(id = ?report.id, problem_type = %report.problem_type, "report submitted");
            form.set_status(SubmissionStatus::Submitted(report));
            Notice::Submitted
        }
        Err(e) => {
            error!(error = ?e, "failed to submit report");
            form.set_status(SubmissionStatus::Failed);
            Notice::Failed
        }
    }
}
