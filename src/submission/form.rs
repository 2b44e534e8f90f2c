use tracing::debug;

use crate::{
    report::{ImageAttachment, Location, ProblemType, Report, School, SpeedingDetail},
    ValidationError,
};

use super::{Submission, SubmissionPayload};

/// Where a reporter is on the way from an empty form to a submitted report.
///
/// `idle → location-selected → category-selected → (speeding only:
/// near-school-selected → school-selected) → ready-to-submit → submitting →
/// submitted | failed`
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[allow(missing_docs)]
pub enum FormStage {
    Idle,
    LocationSelected,
    CategorySelected,
    NearSchoolSelected,
    SchoolSelected,
    ReadyToSubmit,
    Submitting,
    Submitted,
    Failed,
}

/// Outcome of the last submission attempt for a form.
#[derive(PartialEq, Debug, Clone, Default)]
pub enum SubmissionStatus {
    /// Not submitted since the last edit.
    #[default]
    Editing,
    /// A request is in flight.
    Submitting,
    /// The backend accepted the report.
    Submitted(Report),
    /// The request failed; the whole form has to be submitted again.
    Failed,
}

/// The state of a report form.
///
/// Stale answers are kept as entered (switching the category away from
/// speeding and back again restores them), but only the ones that apply to
/// the current category ever make it into a [`Submission`].
#[derive(Debug, Clone, Default)]
pub struct ReportForm {
    location: Option<Location>,
    problem_type: Option<ProblemType>,
    near_school: Option<bool>,
    school: Option<School>,
    description: String,
    image: Option<ImageAttachment>,
    status: SubmissionStatus,
}

impl ReportForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the problem location; a later pick replaces an earlier one.
    pub fn pick_location(&mut self, location: Location) -> &mut Self {
        self.location = Some(location);
        self.edited()
    }

    #[allow(missing_docs)]
    pub fn select_problem_type(&mut self, problem_type: ProblemType) -> &mut Self {
        self.problem_type = Some(problem_type);
        self.edited()
    }

    /// Answer "is it near a school?". Only asked for speeding.
    pub fn answer_near_school(&mut self, near_school: bool) -> &mut Self {
        self.near_school = Some(near_school);
        self.edited()
    }

    /// Pick which school. Only asked when near a school.
    pub fn select_school(&mut self, school: School) -> &mut Self {
        self.school = Some(school);
        self.edited()
    }

    #[allow(missing_docs)]
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self.edited()
    }

    #[allow(missing_docs)]
    pub fn attach_image(&mut self, image: ImageAttachment) -> &mut Self {
        self.image = Some(image);
        self.edited()
    }

    #[allow(missing_docs)]
    pub fn remove_image(&mut self) -> &mut Self {
        self.image = None;
        self.edited()
    }

    fn edited(&mut self) -> &mut Self {
        self.status = SubmissionStatus::Editing;
        self
    }

    pub(super) fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
    }

    /// Outcome of the last submission attempt.
    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Whether the required fields (location and problem type) are filled in.
    pub fn can_submit(&self) -> bool {
        self.location.is_some() && self.problem_type.is_some()
    }

    /// How far the reporter got.
    ///
    /// Once [`ReportForm::can_submit`] holds the stage is always
    /// [`FormStage::ReadyToSubmit`]; the near-school branch is optional and an
    /// unanswered question counts as "no". Before that, the stage names the
    /// last step taken.
    pub fn stage(&self) -> FormStage {
        match self.status {
            SubmissionStatus::Submitting => return FormStage::Submitting,
            SubmissionStatus::Submitted(_) => return FormStage::Submitted,
            SubmissionStatus::Failed => return FormStage::Failed,
            SubmissionStatus::Editing => {}
        }

        if self.can_submit() {
            return FormStage::ReadyToSubmit;
        }

        match self.problem_type {
            Some(ProblemType::Speeding) => match (self.near_school, self.school) {
                (None, _) => FormStage::CategorySelected,
                (Some(true), Some(_)) => FormStage::SchoolSelected,
                (Some(_), _) => FormStage::NearSchoolSelected,
            },
            Some(_) => FormStage::CategorySelected,
            None if self.location.is_some() => FormStage::LocationSelected,
            None => FormStage::Idle,
        }
    }

    /// Turn the form into a submission.
    ///
    /// Fails before anything is sent when the location or the problem type is
    /// missing. Near-school answers are dropped unless the problem type is
    /// speeding, and the school unless the answer was "yes".
    pub fn assemble(&self) -> Result<Submission, ValidationError> {
        let location = self.location.ok_or(ValidationError::MissingLocation)?;
        let problem_type = self.problem_type.ok_or(ValidationError::MissingCategory)?;

        let speeding = (problem_type == ProblemType::Speeding).then(|| {
            if self.near_school == Some(true) {
                SpeedingDetail::NearSchool {
                    school: self.school.map(|school| school.name().to_string()),
                }
            } else {
                SpeedingDetail::NotNearSchool
            }
        });

        let payload = SubmissionPayload {
            location,
            problem_type,
            description: self.description.clone(),
            speeding,
        };
        debug!(?payload, image = ?self.image, "assembled report submission");

        Ok(Submission {
            payload,
            image: self.image.clone(),
        })
    }
}
