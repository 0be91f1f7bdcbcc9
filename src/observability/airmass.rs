// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Airmass models, and the constraint applied to airmasses.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::InvalidArgumentError;
use crate::constants::{
    DEFAULT_MAX_AIRMASS, DEFAULT_MIN_AIRMASS, FRAC_PI_2, KASTEN_YOUNG_A, KASTEN_YOUNG_B,
    KASTEN_YOUNG_C,
};

/// How an altitude is turned into an airmass.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AirmassModel {
    /// sec(z); a plane-parallel atmosphere.
    #[default]
    Secant,

    /// Kasten & Young (1989). Accurate down to the horizon.
    KastenYoung,
}

impl AirmassModel {
    /// Get the airmass of something at this altitude \[radians\]. Anything at
    /// or below the horizon has an infinite airmass.
    pub fn airmass(self, altitude_rad: f64) -> f64 {
        if altitude_rad.is_nan() {
            return f64::NAN;
        }
        if altitude_rad <= 0.0 {
            return f64::INFINITY;
        }
        // Don't let float errors take us past the zenith.
        let altitude_rad = altitude_rad.min(FRAC_PI_2);

        match self {
            AirmassModel::Secant => 1.0 / altitude_rad.sin(),

            AirmassModel::KastenYoung => {
                let za_deg = (FRAC_PI_2 - altitude_rad).to_degrees();
                let cos_za = altitude_rad.sin();
                1.0 / (cos_za + KASTEN_YOUNG_A * (KASTEN_YOUNG_B - za_deg).powf(-KASTEN_YOUNG_C))
            }
        }
    }
}

/// Targets must have an airmass within `[min, max]` to satisfy this
/// constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirmassConstraint {
    max: f64,
    min: f64,
    model: AirmassModel,
}

impl Default for AirmassConstraint {
    fn default() -> Self {
        AirmassConstraint {
            max: DEFAULT_MAX_AIRMASS,
            min: DEFAULT_MIN_AIRMASS,
            model: AirmassModel::default(),
        }
    }
}

impl AirmassConstraint {
    /// A constraint with this ceiling, the default floor and the default
    /// model. The ceiling may be infinite, but must not be less than 1.
    pub fn new(max: f64) -> Result<AirmassConstraint, InvalidArgumentError> {
        AirmassConstraint::default().with_max(max)
    }

    pub fn with_max(self, max: f64) -> Result<AirmassConstraint, InvalidArgumentError> {
        // This also catches NaN.
        if !(max >= 1.0) {
            return Err(InvalidArgumentError::AirmassCeilingTooLow(max));
        }
        if !self.min.is_finite() || self.min > max {
            return Err(InvalidArgumentError::AirmassFloorAboveCeiling { min: self.min, max });
        }
        Ok(AirmassConstraint { max, ..self })
    }

    pub fn with_min(self, min: f64) -> Result<AirmassConstraint, InvalidArgumentError> {
        if !min.is_finite() || min > self.max {
            return Err(InvalidArgumentError::AirmassFloorAboveCeiling { min, max: self.max });
        }
        Ok(AirmassConstraint { min, ..self })
    }

    pub fn with_model(self, model: AirmassModel) -> AirmassConstraint {
        AirmassConstraint { model, ..self }
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn model(&self) -> AirmassModel {
        self.model
    }

    /// Is this airmass acceptable? Infinite (i.e. below the horizon) and NaN
    /// airmasses never are.
    pub fn is_satisfied(&self, airmass: f64) -> bool {
        airmass.is_finite() && self.min <= airmass && airmass <= self.max
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_airmass_at_zenith_is_one() {
        for model in AirmassModel::iter() {
            assert_abs_diff_eq!(model.airmass(FRAC_PI_2), 1.0, epsilon = 1e-3);
            // Slightly past the zenith due to float error.
            assert_abs_diff_eq!(model.airmass(FRAC_PI_2 + 1e-12), 1.0, epsilon = 1e-3);
        }
        assert_abs_diff_eq!(AirmassModel::Secant.airmass(FRAC_PI_2), 1.0);
    }

    #[test]
    fn test_airmass_at_and_below_horizon_is_infinite() {
        for model in AirmassModel::iter() {
            assert_eq!(model.airmass(0.0), f64::INFINITY);
            assert_eq!(model.airmass(-0.3), f64::INFINITY);
            assert!(model.airmass(f64::NAN).is_nan());
        }
    }

    #[test]
    fn test_models_agree_high_up() {
        // At 30 degrees altitude, sec(z) is exactly 2, and Kasten & Young is
        // very slightly less.
        let alt = 30_f64.to_radians();
        let secant = AirmassModel::Secant.airmass(alt);
        let ky = AirmassModel::KastenYoung.airmass(alt);
        assert_abs_diff_eq!(secant, 2.0, epsilon = 1e-12);
        assert!(ky < secant);
        assert_abs_diff_eq!(ky, secant, epsilon = 0.01);
    }

    #[test]
    fn test_kasten_young_stays_finite_near_horizon() {
        // sec(z) blows up near the horizon, K&Y tops out around 38.
        let alt = 1e-6;
        assert!(AirmassModel::Secant.airmass(alt) > 1e5);
        let ky = AirmassModel::KastenYoung.airmass(alt);
        assert!(ky > 35.0 && ky < 40.0, "{ky}");
    }

    #[test]
    fn test_airmass_increases_towards_horizon() {
        for model in AirmassModel::iter() {
            let mut prev = 0.0;
            for alt_deg in (1..=90).rev() {
                let am = model.airmass((alt_deg as f64).to_radians());
                assert!(am >= prev, "{model} at {alt_deg}");
                prev = am;
            }
        }
    }

    #[test]
    fn test_model_strings() {
        assert_eq!(AirmassModel::KastenYoung.to_string(), "kasten-young");
        assert_eq!(
            "secant".parse::<AirmassModel>().unwrap(),
            AirmassModel::Secant
        );
    }

    #[test]
    fn test_constraint() {
        let c = AirmassConstraint::new(2.5).unwrap();
        assert!(c.is_satisfied(1.0));
        assert!(c.is_satisfied(2.5));
        assert!(!c.is_satisfied(2.5001));
        assert!(!c.is_satisfied(f64::INFINITY));
        assert!(!c.is_satisfied(f64::NAN));
        // Below the floor, as a negative airmass would be.
        assert!(!c.is_satisfied(-2.0));

        let c = AirmassConstraint::new(f64::INFINITY).unwrap();
        assert!(c.is_satisfied(1e6));
        assert!(!c.is_satisfied(f64::INFINITY));
    }

    #[test]
    fn test_bad_constraints() {
        assert!(matches!(
            AirmassConstraint::new(0.9),
            Err(InvalidArgumentError::AirmassCeilingTooLow(_))
        ));
        assert!(matches!(
            AirmassConstraint::new(f64::NAN),
            Err(InvalidArgumentError::AirmassCeilingTooLow(_))
        ));
        assert!(matches!(
            AirmassConstraint::new(2.0).unwrap().with_min(2.1),
            Err(InvalidArgumentError::AirmassFloorAboveCeiling { .. })
        ));
        assert!(matches!(
            AirmassConstraint::new(2.0).unwrap().with_min(f64::NAN),
            Err(InvalidArgumentError::AirmassFloorAboveCeiling { .. })
        ));
    }
}
