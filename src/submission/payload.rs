use crate::report::{ImageAttachment, Location, ProblemType, SpeedingDetail};

/// The structured part of a report submission.
#[derive(PartialEq, Debug, Clone)]
pub struct SubmissionPayload {
    /// Where the problem is.
    pub location: Location,
    /// What the problem is.
    pub problem_type: ProblemType,
    /// Free-text description, possibly empty.
    pub description: String,
    /// Only present when `problem_type` is [`ProblemType::Speeding`].
    pub speeding: Option<SpeedingDetail>,
}

impl SubmissionPayload {
    /// The multipart text fields, in the order they are sent.
    ///
    /// `isNearSchool` only appears for speeding reports and `schoolName` only
    /// when such a report is near a named school.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("problemType", self.problem_type.as_str().to_string()),
            ("description", self.description.clone()),
            ("lat", self.location.lat.to_string()),
            ("lng", self.location.lng.to_string()),
        ];

        if let Some(speeding) = &self.speeding {
            fields.push(("isNearSchool", speeding.is_near_school().to_string()));
            if let Some(school) = speeding.school_name() {
                fields.push(("schoolName", school.to_string()));
            }
        }

        fields
    }
}

/// Everything sent to create one report: the structured fields plus an
/// optional binary image part.
#[derive(PartialEq, Debug, Clone)]
pub struct Submission {
    #[allow(missing_docs)]
    pub payload: SubmissionPayload,
    /// Sent as the `image` part, never inlined into the text fields.
    pub image: Option<ImageAttachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(problem_type: ProblemType, speeding: Option<SpeedingDetail>) -> SubmissionPayload {
        SubmissionPayload {
            location: Location::new(40.7128, -74.006),
            problem_type,
            description: "".to_string(),
            speeding,
        }
    }

    fn names(payload: &SubmissionPayload) -> Vec<&'static str> {
        payload.fields().into_iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn test_plain_fields() {
        let fields = payload(ProblemType::WaterLeak, None).fields();

        assert_eq!(
            fields,
            vec![
                ("problemType", "water-leak".to_string()),
                ("description", "".to_string()),
                ("lat", "40.7128".to_string()),
                ("lng", "-74.006".to_string()),
            ]
        );
    }

    #[test]
    fn test_speeding_not_near_school_omits_school() {
        let payload = payload(ProblemType::Speeding, Some(SpeedingDetail::NotNearSchool));

        assert_eq!(
            names(&payload),
            vec!["problemType", "description", "lat", "lng", "isNearSchool"]
        );
        assert_eq!(payload.fields()[4].1, "false");
    }

    #[test]
    fn test_speeding_near_named_school() {
        let payload = payload(
            ProblemType::Speeding,
            Some(SpeedingDetail::NearSchool {
                school: Some("Lincoln Elementary".to_string()),
            }),
        );

        assert_eq!(
            payload.fields()[4..],
            [
                ("isNearSchool", "true".to_string()),
                ("schoolName", "Lincoln Elementary".to_string()),
            ]
        );
    }
}
