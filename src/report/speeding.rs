use core::{fmt, str::FromStr};

/// Extra information that only speeding reports carry.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum SpeedingDetail {
    /// The reporter said the speeding is not near a school.
    NotNearSchool,
    /// The speeding happens near a school, optionally naming which one.
    NearSchool {
        /// Name of the school, if one was picked.
        school: Option<String>,
    },
}

impl SpeedingDetail {
    /// Build the detail from the wire's `isNearSchool` / `schoolName` pair.
    /// A school name without `isNearSchool == true` is dropped, as is an
    /// empty name.
    pub fn from_flags(is_near_school: Option<bool>, school_name: Option<String>) -> Self {
        if is_near_school == Some(true) {
            SpeedingDetail::NearSchool {
                school: school_name.filter(|name| !name.is_empty()),
            }
        } else {
            SpeedingDetail::NotNearSchool
        }
    }

    /// Whether the reporter said this is near a school.
    pub fn is_near_school(&self) -> bool {
        matches!(self, SpeedingDetail::NearSchool { .. })
    }

    /// Name of the school, only ever present near a school.
    pub fn school_name(&self) -> Option<&str> {
        match self {
            SpeedingDetail::NearSchool { school } => school.as_deref(),
            SpeedingDetail::NotNearSchool => None,
        }
    }
}

/// The schools a reporter can pick from.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
#[allow(missing_docs)]
pub enum School {
    LincolnElementary,
    WashingtonHigh,
    RooseveltMiddle,
    JeffersonAcademy,
}

impl School {
    /// Every selectable school.
    pub const ALL: [School; 4] = [
        School::LincolnElementary,
        School::WashingtonHigh,
        School::RooseveltMiddle,
        School::JeffersonAcademy,
    ];

    /// The school's name as sent to and stored by the backend.
    pub fn name(&self) -> &'static str {
        match self {
            School::LincolnElementary => "Lincoln Elementary",
            School::WashingtonHigh => "Washington High",
            School::RooseveltMiddle => "Roosevelt Middle",
            School::JeffersonAcademy => "Jefferson Academy",
        }
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string that is not one of the selectable school names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown school `{0}`")]
pub struct UnknownSchool(pub String);

impl FromStr for School {
    type Err = UnknownSchool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        School::ALL
            .into_iter()
            .find(|school| school.name() == s)
            .ok_or_else(|| UnknownSchool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_name_requires_near_school() {
        let detail = SpeedingDetail::from_flags(Some(false), Some("Washington High".into()));
        assert_eq!(detail, SpeedingDetail::NotNearSchool);
        assert_eq!(detail.school_name(), None);

        let detail = SpeedingDetail::from_flags(None, Some("Washington High".into()));
        assert_eq!(detail, SpeedingDetail::NotNearSchool);
    }

    #[test]
    fn test_near_school_with_and_without_name() {
        let detail = SpeedingDetail::from_flags(Some(true), Some("Roosevelt Middle".into()));
        assert!(detail.is_near_school());
        assert_eq!(detail.school_name(), Some("Roosevelt Middle"));

        let detail = SpeedingDetail::from_flags(Some(true), Some(String::new()));
        assert_eq!(detail, SpeedingDetail::NearSchool { school: None });
    }

    #[test]
    fn test_school_names_are_case_sensitive() {
        assert_eq!("Jefferson Academy".parse(), Ok(School::JeffersonAcademy));
        assert!("jefferson academy".parse::<School>().is_err());
    }
}
