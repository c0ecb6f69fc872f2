use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Proximity radius for GPS-based check-in verification, in meters.
pub const GPS_PROXIMITY_RADIUS_METERS: u32 = 100;

/// How a customer proves physical presence for a check-in mission. The policy
/// is recorded on the activation record verbatim; verifying an actual check-in
/// against it happens elsewhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInMethod {
    /// Customer scans a location-bound code; no geolocation check.
    QrOnly,
    /// Customer must be within the proximity radius of the registered location.
    Gps,
    /// Either method independently satisfies verification.
    Both,
}

impl Display for CheckInMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let method = match self {
            CheckInMethod::QrOnly => "QR_ONLY",
            CheckInMethod::Gps => "GPS",
            CheckInMethod::Both => "BOTH",
        };
        write!(f, "{}", method)
    }
}

impl CheckInMethod {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "QR_ONLY" => Some(CheckInMethod::QrOnly),
            "GPS" => Some(CheckInMethod::Gps),
            "BOTH" => Some(CheckInMethod::Both),
            _ => None,
        }
    }
}
