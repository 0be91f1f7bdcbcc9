// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Code for reading angles out of strings.

Degrees may be given as a plain number (`-64.5467`), a number with a unit
suffix (`-64.5467d`, `-64.5467deg`, `-64.5467°`), a sexagesimal string
(`-64d32m48.12s`) or a colon-delimited sexagesimal string (`-64:32:48.12`).
Hour angles are the same, but with an `h` instead of a `d`.
 */

use thiserror::Error;

/// Parse a string as an angle \[degrees\].
///
/// # Examples
///
/// ```
/// # use skyfilter::angle::*;
/// # use approx::*;
/// # fn main() -> Result<(), AngleParseError> {
/// assert_abs_diff_eq!(parse_degrees("-64.5467d")?, -64.5467);
/// assert_abs_diff_eq!(parse_degrees("-22:58:52.56")?, -22.981267, epsilon = 1e-6);
/// # Ok(())
/// # }
/// ```
pub fn parse_degrees(s: &str) -> Result<f64, AngleParseError> {
    parse_angle(s, AngleUnit::Degrees)
}

/// Parse a string as an hour angle \[hours\]. The result is *not* converted
/// to degrees.
///
/// # Examples
///
/// ```
/// # use skyfilter::angle::*;
/// # use approx::*;
/// # fn main() -> Result<(), AngleParseError> {
/// assert_abs_diff_eq!(parse_hours("7.51289")?, 7.51289);
/// assert_abs_diff_eq!(parse_hours("07h30m00s")?, 7.5);
/// # Ok(())
/// # }
/// ```
pub fn parse_hours(s: &str) -> Result<f64, AngleParseError> {
    parse_angle(s, AngleUnit::Hours)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AngleUnit {
    Degrees,
    Hours,
}

impl AngleUnit {
    /// The single-character separator between the whole units and the
    /// minutes in sexagesimal form.
    fn symbol(self) -> char {
        match self {
            AngleUnit::Degrees => 'd',
            AngleUnit::Hours => 'h',
        }
    }

    /// Suffixes that may follow a plain decimal number.
    fn suffixes(self) -> &'static [&'static str] {
        match self {
            AngleUnit::Degrees => &["deg", "d", "°"],
            AngleUnit::Hours => &["hourangle", "hours", "hour", "h"],
        }
    }

    fn name(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "degrees",
            AngleUnit::Hours => "hours",
        }
    }
}

fn parse_angle(s: &str, unit: AngleUnit) -> Result<f64, AngleParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(AngleParseError::Empty);
    }

    // Try to parse a naked number.
    if let Ok(n) = trimmed.parse::<f64>() {
        return finite(n, s);
    }

    // A decimal number with a unit suffix.
    let lower = trimmed.to_lowercase();
    for suffix in unit.suffixes() {
        if let Some(prefix) = lower.strip_suffix(suffix) {
            if let Ok(n) = prefix.trim().parse::<f64>() {
                return finite(n, s);
            }
        }
    }

    // The sign applies to the whole angle, even when the leading field is 0
    // (e.g. "-00:30:00").
    let (negative, unsigned) = match lower.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, lower.strip_prefix('+').unwrap_or(&lower).trim_start()),
    };

    let (whole, minutes, seconds) = if unsigned.contains(':') {
        split_colons(unsigned, s)?
    } else if unsigned.contains(unit.symbol()) {
        split_symbols(unsigned, unit.symbol(), s)?
    } else {
        return Err(AngleParseError::Unknown {
            input: s.to_string(),
            unit: unit.name(),
        });
    };
    if !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return Err(AngleParseError::SexagesimalOutOfRange(s.to_string()));
    }

    let magnitude = sexagesimal_to_float(whole, minutes, seconds);
    finite(if negative { -magnitude } else { magnitude }, s)
}

/// Combine sexagesimal components into a single float. The components must
/// be non-negative.
pub fn sexagesimal_to_float(whole: f64, minutes: f64, seconds: f64) -> f64 {
    whole + minutes / 60.0 + seconds / 3600.0
}

fn split_colons(unsigned: &str, input: &str) -> Result<(f64, f64, f64), AngleParseError> {
    let mut fields = Vec::with_capacity(3);
    for elem in unsigned.split(':') {
        fields.push(parse_field(elem, input)?);
    }
    match fields.as_slice() {
        [w, m, s] => Ok((*w, *m, *s)),
        [w, m] => Ok((*w, *m, 0.0)),
        _ => Err(AngleParseError::WrongFieldCount(input.to_string())),
    }
}

fn split_symbols(
    unsigned: &str,
    symbol: char,
    input: &str,
) -> Result<(f64, f64, f64), AngleParseError> {
    let (whole, rest) = unsigned
        .split_once(symbol)
        .ok_or_else(|| AngleParseError::WrongFieldCount(input.to_string()))?;
    let whole = parse_field(whole, input)?;
    if rest.trim().is_empty() {
        return Ok((whole, 0.0, 0.0));
    }

    let (minutes, rest) = rest
        .split_once('m')
        .ok_or_else(|| AngleParseError::MissingMinutes(input.to_string()))?;
    let minutes = parse_field(minutes, input)?;
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok((whole, minutes, 0.0));
    }

    let seconds = rest
        .strip_suffix('s')
        .ok_or_else(|| AngleParseError::MissingSeconds(input.to_string()))?;
    let seconds = parse_field(seconds, input)?;
    Ok((whole, minutes, seconds))
}

fn parse_field(field: &str, input: &str) -> Result<f64, AngleParseError> {
    let n: f64 = field
        .trim()
        .parse()
        .map_err(|_| AngleParseError::BadField {
            field: field.trim().to_string(),
            input: input.to_string(),
        })?;
    if n < 0.0 {
        return Err(AngleParseError::BadField {
            field: field.trim().to_string(),
            input: input.to_string(),
        });
    }
    Ok(n)
}

fn finite(n: f64, input: &str) -> Result<f64, AngleParseError> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(AngleParseError::NotFinite(input.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AngleParseError {
    #[error("Got an empty string where an angle was expected")]
    Empty,

    #[error("'{input}' could not be parsed as an angle in {unit}")]
    Unknown { input: String, unit: &'static str },

    #[error("Could not parse '{field}' as a sexagesimal component of '{input}'")]
    BadField { field: String, input: String },

    #[error("Sexagesimal angle '{0}' does not have 2 or 3 components")]
    WrongFieldCount(String),

    #[error("Sexagesimal angle '{0}' is missing an 'm' after its minutes")]
    MissingMinutes(String),

    #[error("Sexagesimal angle '{0}' is missing an 's' after its seconds")]
    MissingSeconds(String),

    #[error("Sexagesimal angle '{0}' has minutes or seconds outside of [0, 60)")]
    SexagesimalOutOfRange(String),

    #[error("Angle '{0}' is not finite")]
    NotFinite(String),
}
