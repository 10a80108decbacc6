//! Header line recognition.
//!
//! Header lines look like `% Label : token token ...`. Each recognized label
//! yields values at fixed token offsets within the text after the first
//! colon; a recognized line whose tokens do not sit where expected is a
//! parse failure rather than being skipped.
//!
//! ```text
//! % Event : NEAR COAST OF PERU [2007-08-15] 20070815 [Ji]  (s2007PISCOP01JIxx)
//! % Loc  : LAT = -13.39    LON = -76.60    DEP = 39.0
//! % Size : LEN = 180 km  WID = 140 km  Mw = 8.00  Mo = 1.10e+21 Nm
//! % Mech : STRK = 321   DIP = 27  RAKE = 63  Htop = 4.53 km
//! % Rupt : HypX = 90 km  Hypz = 60 km  avTr = 6.6 s  avVr = 1.5 km/s
//! % Invs : Nx = 18  Nz = 7  Fmin = 0.00 Hz  Fmax = 1.00 Hz
//! % Invs : Dx = 10.00 km  Dz = 20.00 km
//! % Invs : Ntw = 1  Nsg = 1    (# of time-windows,# of fault segments)
//! % SVF  : Boxcar  (type of slip-velocity function used)
//! ```

use fault_common::{Event, EventDate, SegmentGeometry};
use tracing::warn;

use crate::cursor::{Line, HEADER_MARKER};
use crate::error::{FspError, FspResult};

/// Marker for files with more than one segment block.
pub const MULTISEGMENT_MARKER: &str = "MULTISEGMENT";

/// A header line split into label and value tokens.
#[derive(Debug, Clone)]
pub struct HeaderLine<'a> {
    pub number: usize,
    /// Text between the comment marker and the first colon, trimmed
    pub label: &'a str,
    /// Whitespace-separated tokens after the first colon
    pub tokens: Vec<&'a str>,
    /// Full text after the comment marker
    pub raw: &'a str,
}

impl<'a> HeaderLine<'a> {
    pub fn from_line(line: Line<'a>) -> Self {
        let raw = line
            .text
            .trim_start()
            .trim_start_matches(HEADER_MARKER);
        let (label, body) = match raw.split_once(':') {
            Some((label, body)) => (label.trim(), body),
            None => ("", raw),
        };
        Self {
            number: line.number,
            label,
            tokens: body.split_whitespace().collect(),
            raw,
        }
    }

    fn first_token(&self) -> Option<&str> {
        self.tokens.first().copied()
    }

    /// Numeric token at `index`, required.
    fn number(&self, label: &'static str, index: usize) -> FspResult<f64> {
        let token = self.tokens.get(index).ok_or_else(|| FspError::MalformedHeader {
            line: self.number,
            label,
            reason: format!("expected a value at token {}", index),
        })?;
        parse_number(token, self.number, label)
    }

    /// Non-negative whole-number token at `index`, required.
    fn count(&self, label: &'static str, index: usize) -> FspResult<usize> {
        whole_number(self.number(label, index)?, self.number, label)
    }

    /// Numeric token at `index`, or `None` if the line is shorter.
    fn optional_number(&self, label: &'static str, index: usize) -> FspResult<Option<f64>> {
        match self.tokens.get(index) {
            Some(token) => parse_number(token, self.number, label).map(Some),
            None => Ok(None),
        }
    }
}

fn parse_number(token: &str, line: usize, label: &'static str) -> FspResult<f64> {
    token.parse().map_err(|_| FspError::MalformedHeader {
        line,
        label,
        reason: format!("'{}' is not a number", token),
    })
}

fn whole_number(value: f64, line: usize, label: &'static str) -> FspResult<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(FspError::MalformedHeader {
            line,
            label,
            reason: format!("{} is not a valid count", value),
        });
    }
    Ok(value as usize)
}

/// Strip bracketed asides, pull out the first 8-digit date token and return
/// `(location, date)`.
pub fn parse_event_text(text: &str) -> (String, EventDate) {
    let mut cleaned = String::with_capacity(text.len());
    let mut closing: Option<char> = None;
    for c in text.chars() {
        match closing {
            Some(close) if c == close || c == ')' || c == ']' => closing = None,
            Some(_) => {}
            None if c == '(' => closing = Some(')'),
            None if c == '[' => closing = Some(']'),
            None if c == ':' => break,
            None if c.is_alphanumeric() || c.is_whitespace() => cleaned.push(c),
            None => {}
        }
    }

    let date_token = find_date_token(&cleaned);
    let date = match date_token {
        Some(token) => EventDate::from_token(token),
        None => EventDate::Unknown,
    };
    let location = match date_token {
        Some(token) => cleaned.replace(token, " "),
        None => cleaned.clone(),
    };
    let location = location.split_whitespace().collect::<Vec<_>>().join(" ");
    (location, date)
}

/// First run of exactly 8 consecutive ASCII digits (the leading 8 of a longer run).
fn find_date_token(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut run_start = None;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            let start = *run_start.get_or_insert(i);
            if i + 1 - start == 8 {
                return text.get(start..=i);
            }
        } else {
            run_start = None;
        }
    }
    None
}

/// Per-segment orientation block of a multi-segment file.
///
/// ```text
/// % SEGMENT # 1: STRIKE = 202 deg    DIP = 12.0 deg
/// %              LEN = 225 km     WID = 200 km
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentHeader {
    pub strike: Option<f64>,
    pub dip: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    /// Line of the `SEGMENT` label, for error reporting
    pub line: Option<usize>,
}

impl SegmentHeader {
    /// Apply one header line; returns true if the line was a segment line.
    pub fn apply(&mut self, line: &HeaderLine<'_>) -> FspResult<bool> {
        if line.label.starts_with("SEGMENT") {
            self.strike = Some(line.number("SEGMENT", 2)?);
            self.dip = Some(line.number("SEGMENT", 6)?);
            self.line = Some(line.number);
            return Ok(true);
        }
        let words: Vec<&str> = line.raw.split_whitespace().collect();
        if words.first() == Some(&"LEN") && words.get(4) == Some(&"WID") {
            let at = |i: usize| -> FspResult<f64> {
                let token = words.get(i).ok_or_else(|| FspError::MalformedHeader {
                    line: line.number,
                    label: "LEN",
                    reason: format!("expected a value at token {}", i),
                })?;
                parse_number(token, line.number, "LEN")
            };
            self.length = Some(at(2)?);
            self.width = Some(at(6)?);
            return Ok(true);
        }
        Ok(false)
    }

    pub fn is_empty(&self) -> bool {
        self.strike.is_none() && self.dip.is_none() && self.length.is_none() && self.width.is_none()
    }

    /// Fill any missing value from `fallback`.
    pub fn resolve(&self, fallback: Option<SegmentGeometry>, data_line: usize) -> FspResult<SegmentGeometry> {
        let pick = |own: Option<f64>, base: Option<f64>, field: &'static str| {
            own.or(base)
                .ok_or(FspError::MissingField { field, line: data_line })
        };
        Ok(SegmentGeometry {
            strike: pick(self.strike, fallback.map(|g| g.strike), "strike")?,
            dip: pick(self.dip, fallback.map(|g| g.dip), "dip")?,
            length: pick(self.length, fallback.map(|g| g.length), "length")?,
            width: pick(self.width, fallback.map(|g| g.width), "width")?,
        })
    }
}

/// Event-level fields accumulated while scanning the first header block.
#[derive(Debug, Clone, Default)]
pub struct EventHeader {
    pub location: Option<String>,
    pub date: EventDate,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub depth: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub magnitude: Option<f64>,
    pub moment: Option<f64>,
    pub dx: Option<f64>,
    pub dz: Option<f64>,
    pub strike: Option<f64>,
    pub dip: Option<f64>,
    pub rake: Option<f64>,
    pub top_depth: Option<f64>,
    pub rise_time: Option<f64>,
    pub rupture_velocity: Option<f64>,
    pub nx: Option<usize>,
    pub nz: Option<usize>,
    pub time_windows: Option<u32>,
    pub segment_count: Option<usize>,
    pub velocity_function: Option<String>,
    pub multi_segment: bool,
}

impl EventHeader {
    /// Apply one header line. Unrecognized lines are ignored.
    pub fn apply(&mut self, line: &HeaderLine<'_>) -> FspResult<()> {
        if line.raw.contains(MULTISEGMENT_MARKER) {
            self.multi_segment = true;
            return Ok(());
        }

        match line.label {
            "Event" => {
                let body = line.raw.split_once(':').map(|(_, b)| b).unwrap_or("");
                let (location, date) = parse_event_text(body);
                if !date.is_known() {
                    warn!(line = line.number, "No parseable event date, using UNK");
                }
                self.location = Some(location);
                self.date = date;
            }
            "Loc" => {
                self.lat = Some(line.number("Loc", 2)?);
                self.lon = Some(line.number("Loc", 5)?);
                self.depth = Some(line.number("Loc", 8)?);
            }
            "Size" => {
                self.length = Some(line.number("Size", 2)?);
                self.width = Some(line.number("Size", 6)?);
                self.magnitude = Some(line.number("Size", 10)?);
                self.moment = Some(line.number("Size", 13)?);
            }
            "Mech" => {
                self.strike = Some(line.number("Mech", 2)?);
                self.dip = Some(line.number("Mech", 5)?);
                self.rake = line.optional_number("Mech", 8)?;
                self.top_depth = line.optional_number("Mech", 11)?;
            }
            "Rupt" => {
                self.rise_time = line.optional_number("Rupt", 10)?;
                self.rupture_velocity = line.optional_number("Rupt", 14)?;
            }
            "SVF" => {
                self.velocity_function = line.first_token().map(str::to_string);
            }
            _ => match line.first_token() {
                Some("Dx") => {
                    self.dx = Some(line.number("Dx", 2)?);
                    self.dz = Some(line.number("Dx", 6)?);
                }
                Some("Nx") => {
                    self.nx = Some(line.count("Nx", 2)?);
                    self.nz = Some(line.count("Nx", 5)?);
                }
                Some("Ntw") => {
                    self.time_windows = Some(line.count("Ntw", 2)? as u32);
                    self.segment_count = line
                        .optional_number("Ntw", 5)?
                        .map(|n| whole_number(n, line.number, "Ntw"))
                        .transpose()?;
                }
                _ => {}
            },
        }
        Ok(())
    }

    /// Global segment geometry from the `Mech` and `Size` lines, if complete.
    pub fn geometry(&self) -> Option<SegmentGeometry> {
        Some(SegmentGeometry {
            strike: self.strike?,
            dip: self.dip?,
            length: self.length?,
            width: self.width?,
        })
    }

    /// Finish the event record; `data_line` is where the header ended.
    pub fn into_event(self, data_line: usize) -> FspResult<Event> {
        let require = |value: Option<f64>, field: &'static str| {
            value.ok_or(FspError::MissingField { field, line: data_line })
        };
        Ok(Event {
            lat: require(self.lat, "Loc")?,
            lon: require(self.lon, "Loc")?,
            depth: require(self.depth, "Loc")?,
            magnitude: require(self.magnitude, "Size")?,
            moment: require(self.moment, "Size")?,
            dx: require(self.dx, "Dx")?,
            dz: require(self.dz, "Dx")?,
            strike: require(self.strike, "Mech")?,
            dip: require(self.dip, "Mech")?,
            location: self.location.unwrap_or_default(),
            date: self.date,
            rake: self.rake,
            top_depth: self.top_depth,
            rupture_velocity: self.rupture_velocity,
            rise_time: self.rise_time,
            time_windows: self.time_windows,
            velocity_function: self.velocity_function,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(text: &str) -> HeaderLine<'_> {
        HeaderLine::from_line(Line { number: 7, text })
    }

    #[test]
    fn test_event_text() {
        let (location, date) =
            parse_event_text(" NEAR COAST OF PERU [2007-08-15] 20070815 [Ji]  (s2007PISCOP01JIxx)");
        assert_eq!(location, "NEAR COAST OF PERU");
        assert_eq!(date.to_string(), "2007-08-15T00:00:00.000000Z");
    }

    #[test]
    fn test_event_text_without_date() {
        let (location, date) = parse_event_text(" SOUTHERN ALASKA, [1964] (s1964ALASKA)");
        assert_eq!(location, "SOUTHERN ALASKA");
        assert_eq!(date, EventDate::Unknown);
    }

    #[test]
    fn test_loc_line() {
        let mut acc = EventHeader::default();
        acc.apply(&header("% Loc  : LAT = -13.39    LON = -76.60    DEP = 39.0"))
            .unwrap();
        assert_eq!(acc.lat, Some(-13.39));
        assert_eq!(acc.lon, Some(-76.60));
        assert_eq!(acc.depth, Some(39.0));
    }

    #[test]
    fn test_malformed_loc_line() {
        let mut acc = EventHeader::default();
        let err = acc.apply(&header("% Loc  : LAT -13.39 LON -76.60")).unwrap_err();
        assert!(matches!(err, FspError::MalformedHeader { line: 7, label: "Loc", .. }));
    }

    #[test]
    fn test_size_mech_dx() {
        let mut acc = EventHeader::default();
        for text in [
            "% Size : LEN = 180 km  WID = 140 km  Mw = 8.00  Mo = 1.10e+21 Nm",
            "% Mech : STRK = 321   DIP = 27  RAKE = 63  Htop = 4.53 km",
            "% Invs : Dx = 10.00 km  Dz = 20.00 km",
            "% Invs : Nx = 18  Nz = 7  Fmin = 0.00 Hz  Fmax = 1.00 Hz",
            "% Invs : Ntw = 1  Nsg = 1    (# of time-windows,# of fault segments)",
            "% Rupt : HypX = 90 km  Hypz = 60 km  avTr = 6.6 s  avVr = 1.5 km/s",
            "% SVF  : Boxcar  (type of slip-velocity function used)",
        ] {
            acc.apply(&header(text)).unwrap();
        }
        assert_eq!(acc.length, Some(180.0));
        assert_eq!(acc.width, Some(140.0));
        assert_eq!(acc.magnitude, Some(8.0));
        assert_eq!(acc.moment, Some(1.10e21));
        assert_eq!(acc.rake, Some(63.0));
        assert_eq!(acc.top_depth, Some(4.53));
        assert_eq!((acc.dx, acc.dz), (Some(10.0), Some(20.0)));
        assert_eq!((acc.nx, acc.nz), (Some(18), Some(7)));
        assert_eq!(acc.time_windows, Some(1));
        assert_eq!(acc.segment_count, Some(1));
        assert_eq!(acc.rise_time, Some(6.6));
        assert_eq!(acc.rupture_velocity, Some(1.5));
        assert_eq!(acc.velocity_function.as_deref(), Some("Boxcar"));
        assert!(acc.geometry().is_some());
    }

    #[test]
    fn test_counts_must_be_whole_numbers() {
        for text in [
            "% Invs : Nx = -4  Nz = 7",
            "% Invs : Nx = 4.5  Nz = 7",
            "% Invs : Nx = 18  Nz = NaN",
            "% Invs : Ntw = inf  Nsg = 1",
            "% Invs : Ntw = 1  Nsg = -2",
        ] {
            let mut acc = EventHeader::default();
            let err = acc.apply(&header(text)).unwrap_err();
            assert!(
                matches!(err, FspError::MalformedHeader { line: 7, .. }),
                "{} gave {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_missing_loc() {
        let acc = EventHeader::default();
        let err = acc.into_event(12).unwrap_err();
        assert!(matches!(err, FspError::MissingField { field: "Loc", line: 12 }));
    }

    #[test]
    fn test_segment_header() {
        let mut seg = SegmentHeader::default();
        assert!(seg
            .apply(&header("% SEGMENT # 2: STRIKE = 195 deg    DIP = 15.0 deg"))
            .unwrap());
        assert!(seg
            .apply(&header("%              LEN = 120 km     WID = 80 km"))
            .unwrap());
        assert!(!seg.apply(&header("% Invs : LEN = 0 s  SHF = 0 s")).unwrap());
        let geometry = seg.resolve(None, 20).unwrap();
        assert_eq!(geometry.strike, 195.0);
        assert_eq!(geometry.dip, 15.0);
        assert_eq!(geometry.length, 120.0);
        assert_eq!(geometry.width, 80.0);
    }

    #[test]
    fn test_multisegment_marker() {
        let mut acc = EventHeader::default();
        acc.apply(&header("% MULTISEGMENT MODEL")).unwrap();
        assert!(acc.multi_segment);
    }
}
