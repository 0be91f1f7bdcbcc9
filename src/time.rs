// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions around time, and the time window over which observability
//! is assessed.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use hifitime::{Duration, Epoch};
use thiserror::Error;
use vec1::Vec1;

use crate::observability::InvalidArgumentError;

/// Naive datetime formats that we accept; these are all interpreted as UTC.
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse an ISO-8601 datetime into an [`Epoch`]. RFC 3339 strings (e.g.
/// "2019-04-10T06:00:00Z" or "2019-04-10T01:00:00-05:00") are converted to
/// UTC; strings without a timezone (e.g. "2019-04-10 06:00") are assumed to
/// already be UTC.
pub fn parse_datetime(s: &str) -> Result<Epoch, DateTimeParseError> {
    let s = s.trim();
    let utc: NaiveDateTime = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.with_timezone(&Utc).naive_utc(),
        Err(_) => NAIVE_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
            .ok_or_else(|| DateTimeParseError(s.to_string()))?,
    };

    Ok(Epoch::from_gregorian_utc(
        utc.year(),
        utc.month() as u8,
        utc.day() as u8,
        utc.hour() as u8,
        utc.minute() as u8,
        utc.second() as u8,
        // chrono reports a leap second as 59 s with more than 1e9 ns.
        utc.nanosecond().min(999_999_999),
    ))
}

#[derive(Error, Debug)]
#[error("Couldn't parse '{0}' as an ISO-8601 datetime (e.g. '2019-04-10T06:00:00Z' or '2019-04-10 06:00')")]
pub struct DateTimeParseError(String);

/// The span of time over which targets are assessed. The end is never before
/// the start; a window with identical start and end is a single instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: Epoch,
    end: Epoch,
}

impl TimeWindow {
    pub fn new(start: Epoch, end: Epoch) -> Result<TimeWindow, InvalidArgumentError> {
        if end < start {
            return Err(InvalidArgumentError::WindowNotMonotonic {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(TimeWindow { start, end })
    }

    /// Make a window from a pair of ISO-8601 datetimes.
    pub fn from_iso(start: &str, end: &str) -> Result<TimeWindow, InvalidArgumentError> {
        let start = parse_datetime(start)?;
        let end = parse_datetime(end)?;
        TimeWindow::new(start, end)
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn end(&self) -> Epoch {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Sample this window every `time_res`, starting at the start of the
    /// window. The end of the window is always the last sample, even if it is
    /// closer than `time_res` to the previous sample.
    pub fn grid(&self, time_res: Duration) -> Result<Vec1<Epoch>, InvalidArgumentError> {
        let res_s = time_res.to_seconds();
        if !res_s.is_finite() || res_s <= 0.0 {
            return Err(InvalidArgumentError::ZeroTimeResolution(format!(
                "{time_res}"
            )));
        }

        let mut timestamps = Vec1::new(self.start);
        let mut step: i64 = 1;
        loop {
            let t = self.start + time_res * step;
            if t >= self.end {
                break;
            }
            timestamps.push(t);
            step += 1;
        }
        if *timestamps.last() != self.end {
            timestamps.push(self.end);
        }

        Ok(timestamps)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use hifitime::Unit;

    use super::*;

    #[test]
    fn test_parse_datetimes() {
        let expected = Epoch::from_gregorian_utc_hms(2019, 4, 10, 6, 0, 0);
        for s in [
            "2019-04-10 06:00",
            "2019-04-10T06:00",
            "2019-04-10 06:00:00",
            "2019-04-10T06:00:00.000",
            "2019-04-10T06:00:00Z",
            "2019-04-10T01:00:00-05:00",
            " 2019-04-10T06:00:00+00:00 ",
        ] {
            let e = parse_datetime(s).unwrap();
            assert_eq!(e, expected, "{s}");
        }

        let e = parse_datetime("2019-04-10T06:00:30.5").unwrap();
        assert_abs_diff_eq!((e - expected).to_seconds(), 30.5, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_bad_datetimes() {
        assert!(parse_datetime("").is_err());
        assert!(parse_datetime("10/04/2019 06:00").is_err());
        assert!(parse_datetime("2019-13-10 06:00").is_err());
    }

    #[test]
    fn test_window_must_be_monotonic() {
        let start = Epoch::from_gregorian_utc_hms(2019, 4, 10, 10, 0, 0);
        let end = Epoch::from_gregorian_utc_hms(2019, 4, 10, 6, 0, 0);
        let result = TimeWindow::new(start, end);
        assert!(matches!(
            result,
            Err(InvalidArgumentError::WindowNotMonotonic { .. })
        ));
    }

    #[test]
    fn test_grid_includes_both_ends() {
        let window = TimeWindow::from_iso("2019-04-10 06:00", "2019-04-10 10:00").unwrap();
        let grid = window.grid(Duration::from_f64(30.0, Unit::Minute)).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(*grid.first(), window.start());
        assert_eq!(*grid.last(), window.end());
        for pair in grid.windows(2) {
            assert_abs_diff_eq!((pair[1] - pair[0]).to_seconds(), 1800.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_grid_with_uneven_cadence() {
        let window = TimeWindow::from_iso("2019-04-10 06:00", "2019-04-10 07:00").unwrap();
        let grid = window.grid(Duration::from_f64(25.0, Unit::Minute)).unwrap();
        // 06:00, 06:25, 06:50, then the end.
        assert_eq!(grid.len(), 4);
        assert_abs_diff_eq!((grid[3] - grid[2]).to_seconds(), 600.0, epsilon = 1e-6);
        assert_eq!(*grid.last(), window.end());
    }

    #[test]
    fn test_grid_single_instant() {
        let window = TimeWindow::from_iso("2019-04-10 06:00", "2019-04-10 06:00").unwrap();
        assert_eq!(window.duration(), Duration::from_seconds(0.0));
        let grid = window.grid(Duration::from_f64(30.0, Unit::Minute)).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0], window.start());
    }

    #[test]
    fn test_grid_needs_a_positive_cadence() {
        let window = TimeWindow::from_iso("2019-04-10 06:00", "2019-04-10 07:00").unwrap();
        assert!(matches!(
            window.grid(Duration::from_seconds(0.0)),
            Err(InvalidArgumentError::ZeroTimeResolution(_))
        ));
        assert!(matches!(
            window.grid(Duration::from_seconds(-60.0)),
            Err(InvalidArgumentError::ZeroTimeResolution(_))
        ));
    }
}
