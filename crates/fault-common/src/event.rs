//! Event metadata read from a finite-source header.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel written in place of a date that could not be parsed.
pub const UNKNOWN_DATE: &str = "UNK";

/// Origin date of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventDate {
    Known(NaiveDate),
    #[default]
    Unknown,
}

impl EventDate {
    /// Parse an 8-digit `YYYYMMDD` token, falling back to [`EventDate::Unknown`].
    pub fn from_token(token: &str) -> Self {
        NaiveDate::parse_from_str(token, "%Y%m%d")
            .map(EventDate::Known)
            .unwrap_or(EventDate::Unknown)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            EventDate::Known(date) => Some(*date),
            EventDate::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, EventDate::Known(_))
    }
}

impl fmt::Display for EventDate {
    /// Midnight UTC timestamp with microseconds, or `UNK`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventDate::Known(date) => {
                let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
                write!(f, "{}", midnight.format("%Y-%m-%dT%H:%M:%S%.6fZ"))
            }
            EventDate::Unknown => f.write_str(UNKNOWN_DATE),
        }
    }
}

impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Event-level metadata shared by every segment of one file.
///
/// Built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Free-text region name from the `Event` line
    pub location: String,
    pub date: EventDate,
    /// Epicenter latitude (degrees)
    pub lat: f64,
    /// Epicenter longitude (degrees)
    pub lon: f64,
    /// Hypocentral depth (km)
    pub depth: f64,
    /// Moment magnitude
    pub magnitude: f64,
    /// Scalar seismic moment (N·m)
    pub moment: f64,
    /// Mechanism strike (degrees)
    pub strike: f64,
    /// Mechanism dip (degrees)
    pub dip: f64,
    /// Mechanism rake (degrees)
    pub rake: Option<f64>,
    /// Depth to the top of the fault (km)
    pub top_depth: Option<f64>,
    /// Average rupture velocity (km/s)
    pub rupture_velocity: Option<f64>,
    /// Average rise time (s)
    pub rise_time: Option<f64>,
    /// Number of time windows used in the inversion
    pub time_windows: Option<u32>,
    /// Slip-velocity function name
    pub velocity_function: Option<String>,
    /// Along-strike grid spacing (km)
    pub dx: f64,
    /// Down-dip grid spacing (km)
    pub dz: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_token() {
        let date = EventDate::from_token("20110311");
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2011, 3, 11));
        assert_eq!(date.to_string(), "2011-03-11T00:00:00.000000Z");
    }

    #[test]
    fn test_bad_date_is_unknown() {
        assert_eq!(EventDate::from_token("20111399"), EventDate::Unknown);
        assert_eq!(EventDate::from_token("abc"), EventDate::Unknown);
        assert_eq!(EventDate::Unknown.to_string(), "UNK");
    }

    #[test]
    fn test_date_serializes_as_string() {
        let json = serde_json::to_string(&EventDate::Unknown).unwrap();
        assert_eq!(json, "\"UNK\"");
    }
}
