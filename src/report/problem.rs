use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of problem a report is about.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Debug, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ProblemType {
    Speeding,
    Graffiti,
    AbandonedVehicle,
    TreeIssue,
    ParkingViolation,
    WaterLeak,
    DeadAnimal,
    BrokenSign,
    TrafficSignal,
    Noise,
    /// Trash or illegal dumping.
    Trash,
    Other,
}

impl ProblemType {
    /// Every problem type, in the order the form offers them.
    pub const ALL: [ProblemType; 12] = [
        ProblemType::Speeding,
        ProblemType::Graffiti,
        ProblemType::AbandonedVehicle,
        ProblemType::TreeIssue,
        ProblemType::ParkingViolation,
        ProblemType::WaterLeak,
        ProblemType::DeadAnimal,
        ProblemType::BrokenSign,
        ProblemType::TrafficSignal,
        ProblemType::Noise,
        ProblemType::Trash,
        ProblemType::Other,
    ];

    /// The slug used on the wire, e.g. `abandoned-vehicle`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::Speeding => "speeding",
            ProblemType::Graffiti => "graffiti",
            ProblemType::AbandonedVehicle => "abandoned-vehicle",
            ProblemType::TreeIssue => "tree-issue",
            ProblemType::ParkingViolation => "parking-violation",
            ProblemType::WaterLeak => "water-leak",
            ProblemType::DeadAnimal => "dead-animal",
            ProblemType::BrokenSign => "broken-sign",
            ProblemType::TrafficSignal => "traffic-signal",
            ProblemType::Noise => "noise",
            ProblemType::Trash => "trash",
            ProblemType::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ProblemType::Speeding => "Speeding",
            ProblemType::Graffiti => "Graffiti",
            ProblemType::AbandonedVehicle => "Abandoned Vehicle",
            ProblemType::TreeIssue => "Tree Issue",
            ProblemType::ParkingViolation => "Parking Violation",
            ProblemType::WaterLeak => "Water Leak",
            ProblemType::DeadAnimal => "Dead Animal",
            ProblemType::BrokenSign => "Broken Sign",
            ProblemType::TrafficSignal => "Traffic Signal Issue",
            ProblemType::Noise => "Noise",
            ProblemType::Trash => "Trash/Illegal Dumping",
            ProblemType::Other => "Other",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not one of the known problem type slugs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown problem type `{0}`")]
pub struct UnknownProblemType(pub String);

impl FromStr for ProblemType {
    type Err = UnknownProblemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProblemType::ALL
            .into_iter()
            .find(|problem| problem.as_str() == s)
            .ok_or_else(|| UnknownProblemType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_parse_back() {
        for problem in ProblemType::ALL {
            assert_eq!(problem.as_str().parse::<ProblemType>(), Ok(problem));
        }
    }

    #[test]
    fn test_serde_uses_slugs() {
        let json = serde_json::to_string(&ProblemType::TrafficSignal).unwrap();
        assert_eq!(json, "\"traffic-signal\"");

        let parsed: ProblemType = serde_json::from_str("\"dead-animal\"").unwrap();
        assert_eq!(parsed, ProblemType::DeadAnimal);
    }

    #[test]
    fn test_unknown_slug() {
        assert_eq!(
            "Speeding".parse::<ProblemType>(),
            Err(UnknownProblemType("Speeding".to_string()))
        );
    }
}
