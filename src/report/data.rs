use chrono::{DateTime, Utc};

use super::{Location, ProblemType, SpeedingDetail};

/// A report in its one canonical shape.
///
/// Reports built for submission have neither `id` nor `timestamp`; both are
/// assigned by the backend once it accepts the report.
#[derive(PartialEq, Debug, Clone)]
pub struct Report {
    /// Backend-assigned identifier.
    pub id: Option<String>,
    /// Where the problem is. Only missing on malformed records fetched from
    /// the backend.
    pub location: Option<Location>,
    /// What the problem is.
    pub problem_type: ProblemType,
    /// Only ever present for [`ProblemType::Speeding`].
    pub speeding: Option<SpeedingDetail>,
    /// Free-text description, possibly empty.
    pub description: String,
    /// URL of the uploaded photo.
    pub image_url: Option<String>,
    /// Backend-assigned creation time.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Report {
    /// `Some(near school?)` for speeding reports, `None` otherwise.
    pub fn is_near_school(&self) -> Option<bool> {
        self.speeding.as_ref().map(SpeedingDetail::is_near_school)
    }

    /// The school a speeding report is near, if any.
    pub fn school_name(&self) -> Option<&str> {
        self.speeding.as_ref().and_then(SpeedingDetail::school_name)
    }

    /// The identifier, or an empty string for unsaved reports.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}
