mod flow;
mod form;
mod payload;

pub use flow::{submit_report, Notice};
pub use form::{FormStage, ReportForm, SubmissionStatus};
pub use payload::{Submission, SubmissionPayload};
