// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Altitudes and airmasses are always
computed in double precision.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// The default airmass ceiling. Targets with an airmass greater than this at a
/// sampled instant fail the constraint at that instant.
pub const DEFAULT_MAX_AIRMASS: f64 = 2.5;

/// The default airmass floor. Nothing can have an airmass less than 1 (the
/// zenith), so this only serves to exclude targets below the horizon when a
/// model reports a negative airmass.
pub const DEFAULT_MIN_AIRMASS: f64 = 1.0;

/// The default cadence of the time grid \[minutes\].
pub const DEFAULT_TIME_RES_MINUTES: f64 = 30.0;

/// The number of degrees of right ascension in one hour.
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// The largest declination or latitude magnitude \[degrees\].
pub const MAX_ABS_LATITUDE_DEG: f64 = 90.0;

/// Kasten & Young (1989) airmass model coefficients. The model is
/// `1 / (cos(z) + A * (B - z)^-C)`, with `z` the zenith angle in degrees.
pub const KASTEN_YOUNG_A: f64 = 0.50572;
pub const KASTEN_YOUNG_B: f64 = 96.07995;
pub const KASTEN_YOUNG_C: f64 = 1.6364;
