//! Everything here is a pure function of a fetched snapshot of reports and is
//! recomputed on every call. The snapshot is small and replaced whole on each
//! fetch, so nothing is cached.

use core::fmt;

use chrono::{DateTime, Utc};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::report::{ProblemType, Report};

/// A fetched report with a timestamp that is always present.
#[derive(PartialEq, Debug, Clone)]
pub struct NormalizedReport {
    #[allow(missing_docs)]
    pub report: Report,
    /// The backend's timestamp, or the time of normalization when it had none.
    pub timestamp: DateTime<Utc>,
}

impl NormalizedReport {
    /// Pin down the display timestamp of `report`, using `now` if it has none.
    pub fn new(report: Report, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: report.timestamp.unwrap_or(now),
            report,
        }
    }
}

/// Give every report a concrete timestamp for display, using `now` for those
/// without one. The substitute is never sent anywhere.
pub fn normalize(reports: Vec<Report>, now: DateTime<Utc>) -> Vec<NormalizedReport> {
    reports
        .into_iter()
        .map(|report| NormalizedReport::new(report, now))
        .collect()
}

/// A point to draw on the map.
#[derive(PartialEq, Debug, Clone)]
pub struct Marker {
    /// Identifier of the report the marker stands for.
    pub id: Option<String>,
    #[allow(missing_docs)]
    pub lat: f64,
    #[allow(missing_docs)]
    pub lng: f64,
    /// Problem type label shown in the marker's popup.
    pub label: &'static str,
}

/// One marker per report that has a location. Reports without one are left
/// off the map.
pub fn markers<'a>(reports: impl IntoIterator<Item = &'a Report>) -> Vec<Marker> {
    reports
        .into_iter()
        .filter_map(|report| {
            let location = report.location?;
            Some(Marker {
                id: report.id.clone(),
                lat: location.lat,
                lng: location.lng,
                label: report.problem_type.label(),
            })
        })
        .collect()
}

/// The markers as a GeoJSON `FeatureCollection` of points.
pub fn markers_to_geojson(markers: &[Marker]) -> FeatureCollection {
    let features = markers
        .iter()
        .map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert("label".to_string(), marker.label.into());

            Feature {
                bbox: None,
                // GeoJSON positions are [longitude, latitude]
                geometry: Some(Geometry::new(Value::Point(vec![marker.lng, marker.lat]))),
                id: marker.id.clone().map(Id::String),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Whether `report` is a speeding report flagged as near `school`. The name
/// comparison is exact and case-sensitive.
pub fn is_speeding_near(report: &Report, school: &str) -> bool {
    report.problem_type == ProblemType::Speeding && report.school_name() == Some(school)
}

/// How many speeding reports are near `school`.
pub fn school_safety_count<'a>(reports: impl IntoIterator<Item = &'a Report>, school: &str) -> usize {
    reports
        .into_iter()
        .filter(|report| is_speeding_near(report, school))
        .count()
}

/// The outcome of a school safety check.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SafetyVerdict {
    #[allow(missing_docs)]
    pub school: String,
    /// Number of speeding reports near the school.
    pub count: usize,
}

impl SafetyVerdict {
    /// Count speeding reports near `school`.
    pub fn check<'a>(reports: impl IntoIterator<Item = &'a Report>, school: &str) -> Self {
        Self {
            school: school.to_string(),
            count: school_safety_count(reports, school),
        }
    }

    /// A school is safe when nobody reported speeding near it.
    pub fn is_safe(&self) -> bool {
        self.count == 0
    }

    #[allow(missing_docs)]
    pub fn headline(&self) -> &'static str {
        if self.is_safe() {
            "✓ Safe"
        } else {
            "⚠ Not Safe"
        }
    }
}

impl fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.school, self.headline())?;
        if self.is_safe() {
            write!(f, "No speeding reports near this school.")
        } else {
            write!(f, "{} speeding report(s) near this school.", self.count)
        }
    }
}
