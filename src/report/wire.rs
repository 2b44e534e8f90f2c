use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::{Location, ProblemType, Report, SpeedingDetail};

/// A report object exactly as the backend sends it.
///
/// This is the only place that knows about the wire's quirks: coordinates may
/// arrive flat (`lat`/`lng`) or nested under `location`, and numbers and
/// booleans may come back as the strings they were submitted as. Converting
/// into [`Report`] resolves all of that.
///
/// No field can fail to deserialize. A value of the wrong shape is read as
/// absent (or empty, for the string fields) so one odd record never takes
/// the rest of a listing down with it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct WireReport {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub lat: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub lng: Option<f64>,
    /// Legacy nested coordinates, accepted on input only.
    #[serde(default, deserialize_with = "lenient_location", skip_serializing)]
    pub location: Option<NestedLocation>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub problem_type: String,
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_near_school: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub school_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<WireTimestamp>,
}

/// Coordinates nested under a `location` key.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct NestedLocation {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
}

/// A timestamp as either an RFC 3339 string or milliseconds since the epoch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireTimestamp {
    /// Whole milliseconds since the epoch.
    Millis(i64),
    /// Milliseconds since the epoch with a fractional part.
    FractionalMillis(f64),
    /// An RFC 3339 date-time.
    Text(String),
    /// Any other shape. Read as no timestamp at all.
    #[serde(skip_serializing)]
    Unreadable(IgnoredAny),
}

impl WireTimestamp {
    fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            WireTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            WireTimestamp::FractionalMillis(ms) if ms.is_finite() => {
                DateTime::from_timestamp_millis(ms.round() as i64)
            }
            WireTimestamp::FractionalMillis(_) => None,
            WireTimestamp::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            WireTimestamp::Unreadable(_) => None,
        }
    }
}

impl From<WireReport> for Report {
    fn from(wire: WireReport) -> Self {
        let location = Location::from_parts(wire.lat, wire.lng).or_else(|| {
            wire.location
                .as_ref()
                .and_then(|nested| Location::from_parts(nested.lat, nested.lng))
        });

        let problem_type = wire.problem_type.parse().unwrap_or_else(|e| {
            warn!(id = ?wire.id, "{e}, treating it as `other`");
            ProblemType::Other
        });

        let speeding = if problem_type == ProblemType::Speeding {
            Some(SpeedingDetail::from_flags(wire.is_near_school, wire.school_name))
        } else {
            if wire.is_near_school.is_some() || wire.school_name.is_some() {
                debug!(id = ?wire.id, %problem_type, "dropping school fields");
            }
            None
        };

        let timestamp = wire.timestamp.as_ref().and_then(|ts| {
            let parsed = ts.to_datetime();
            if parsed.is_none() {
                warn!(id = ?wire.id, timestamp = ?ts, "unreadable timestamp");
            }
            parsed
        });

        Report {
            id: wire.id,
            location,
            problem_type,
            speeding,
            description: wire.description,
            image_url: wire.image_url,
            timestamp,
        }
    }
}

impl From<&Report> for WireReport {
    fn from(report: &Report) -> Self {
        WireReport {
            id: report.id.clone(),
            lat: report.location.map(|l| l.lat),
            lng: report.location.map(|l| l.lng),
            location: None,
            problem_type: report.problem_type.as_str().to_string(),
            is_near_school: report.is_near_school(),
            school_name: report.school_name().map(str::to_string),
            description: report.description.clone(),
            image_url: report.image_url.clone(),
            timestamp: report
                .timestamp
                .map(|ts| WireTimestamp::Text(ts.to_rfc3339_opts(SecondsFormat::Millis, true))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(text)) => text.trim().parse().ok(),
        Some(NumberOrText::Other(_)) | None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrText {
    Bool(bool),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<BoolOrText>::deserialize(deserializer)? {
        Some(BoolOrText::Bool(b)) => Some(b),
        Some(BoolOrText::Text(text)) => text.trim().parse().ok(),
        Some(BoolOrText::Other(_)) | None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrOther {
    Text(String),
    Other(IgnoredAny),
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Option::<TextOrOther>::deserialize(deserializer)? {
        Some(TextOrOther::Text(text)) => Some(text),
        Some(TextOrOther::Other(_)) | None => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocationOrOther {
    Nested(NestedLocation),
    Other(IgnoredAny),
}

fn lenient_location<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NestedLocation>, D::Error> {
    Ok(match Option::<LocationOrOther>::deserialize(deserializer)? {
        Some(LocationOrOther::Nested(nested)) => Some(nested),
        Some(LocationOrOther::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
    }

    fn parse(json: &str) -> Report {
        serde_json::from_str::<WireReport>(json).unwrap().into()
    }

    #[test]
    fn test_flat_report() {
        let report = parse(
            r#"{
                "_id": "665f1c",
                "lat": 40.7128,
                "lng": -74.006,
                "problemType": "speeding",
                "isNearSchool": true,
                "schoolName": "Lincoln Elementary",
                "description": "cars racing at pickup time",
                "imageUrl": "http://localhost:5000/uploads/1.jpg",
                "timestamp": "2025-03-01T08:15:00.000Z"
            }"#,
        );

        assert_eq!(report.id.as_deref(), Some("665f1c"));
        assert_eq!(report.location, Some(Location::new(40.7128, -74.006)));
        assert_eq!(report.problem_type, ProblemType::Speeding);
        assert_eq!(report.school_name(), Some("Lincoln Elementary"));
        assert_eq!(report.timestamp, Some(utc("2025-03-01T08:15:00Z")));
    }

    #[test]
    fn test_nested_location_and_string_fields() {
        let report = parse(
            r#"{
                "_id": "a1",
                "location": { "lat": "51.5", "lng": "-0.12" },
                "problemType": "speeding",
                "isNearSchool": "false",
                "schoolName": "Washington High"
            }"#,
        );

        assert_eq!(report.location, Some(Location::new(51.5, -0.12)));
        assert_eq!(report.speeding, Some(SpeedingDetail::NotNearSchool));
        assert_eq!(report.description, "");
    }

    #[test]
    fn test_missing_coordinate_means_no_location() {
        let report = parse(r#"{ "_id": "a2", "lat": 10.0, "problemType": "trash" }"#);

        assert_eq!(report.location, None);
    }

    #[test]
    fn test_school_fields_dropped_for_other_categories() {
        let report = parse(
            r#"{
                "lat": 1, "lng": 2, "problemType": "graffiti",
                "isNearSchool": true, "schoolName": "Lincoln Elementary"
            }"#,
        );

        assert_eq!(report.speeding, None);
        assert_eq!(report.school_name(), None);
    }

    #[test]
    fn test_unknown_problem_type_becomes_other() {
        let report = parse(r#"{ "lat": 1, "lng": 2, "problemType": "pothole" }"#);

        assert_eq!(report.problem_type, ProblemType::Other);
    }

    #[test]
    fn test_timestamp_forms() {
        let report = parse(r#"{ "problemType": "noise", "timestamp": 1735749597000 }"#);
        assert_eq!(report.timestamp, Some(utc("2025-01-01T16:39:57Z")));

        let report = parse(r#"{ "problemType": "noise", "timestamp": "last tuesday" }"#);
        assert_eq!(report.timestamp, None);
    }

    #[test]
    fn test_null_text_fields() {
        let report = parse(r#"{ "_id": "n1", "problemType": null, "description": null }"#);

        assert_eq!(report.problem_type, ProblemType::Other);
        assert_eq!(report.description, "");
    }

    #[test]
    fn test_fractional_and_malformed_timestamps() {
        let report = parse(r#"{ "problemType": "noise", "timestamp": 1735749597000.4 }"#);
        assert_eq!(report.timestamp, Some(utc("2025-01-01T16:39:57Z")));

        let report = parse(r#"{ "problemType": "noise", "timestamp": { "$date": "soon" } }"#);
        assert_eq!(report.timestamp, None);

        let report = parse(r#"{ "problemType": "noise", "timestamp": [2025, 1, 1] }"#);
        assert_eq!(report.timestamp, None);
    }

    #[test]
    fn test_wrongly_shaped_fields_read_as_absent() {
        let report = parse(
            r#"{
                "_id": { "$oid": "665f1c" },
                "lat": true,
                "lng": [1, 2],
                "location": "downtown",
                "problemType": 7,
                "isNearSchool": 1,
                "schoolName": { "name": "Lincoln Elementary" },
                "description": ["graffiti", "again"],
                "imageUrl": false
            }"#,
        );

        assert_eq!(report.id, None);
        assert_eq!(report.location, None);
        assert_eq!(report.problem_type, ProblemType::Other);
        assert_eq!(report.description, "");
        assert_eq!(report.image_url, None);
    }

    #[test]
    fn test_one_odd_record_does_not_spoil_the_list() {
        let reports: Vec<WireReport> = serde_json::from_str(
            r#"[
                { "_id": "a", "lat": 1, "lng": 2, "problemType": "trash" },
                { "_id": "b", "problemType": null, "description": null, "timestamp": 1.5e12 },
                { "_id": "c", "lat": 3, "lng": 4, "problemType": "speeding",
                  "isNearSchool": true, "schoolName": "Lincoln Elementary" }
            ]"#,
        )
        .unwrap();

        let reports: Vec<Report> = reports.into_iter().map(Report::from).collect();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[1].problem_type, ProblemType::Other);
        assert_eq!(reports[2].school_name(), Some("Lincoln Elementary"));
    }

    #[test]
    fn test_outgoing_shape_is_flat() {
        let report = parse(
            r#"{ "_id": "x", "location": { "lat": 1.5, "lng": 2.5 }, "problemType": "trash" }"#,
        );
        let json = serde_json::to_value(WireReport::from(&report)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "_id": "x",
                "lat": 1.5,
                "lng": 2.5,
                "problemType": "trash",
                "description": ""
            })
        );
    }
}
