use serde::{Deserialize, Serialize};

/// A point picked on the map, in WGS84 degrees.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
pub struct Location {
    /// Latitude geographical coordinate.
    pub lat: f64,
    /// Longitude geographical coordinate.
    pub lng: f64,
}

impl Location {
    /// Create a location from a latitude/longitude pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// A location only exists when both coordinates do.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_needs_both_coordinates() {
        assert_eq!(Location::from_parts(Some(1.0), None), None);
        assert_eq!(Location::from_parts(None, Some(1.0)), None);
        assert_eq!(
            Location::from_parts(Some(40.7128), Some(-74.006)),
            Some(Location::new(40.7128, -74.006))
        );
    }

    #[test]
    fn test_display_uses_six_decimals() {
        let location = Location::new(40.7128, -74.006);

        assert_eq!(location.to_string(), "40.712800, -74.006000");
    }
}
