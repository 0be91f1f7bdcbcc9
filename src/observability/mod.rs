// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Determine whether targets are observable from an observatory.
//!
//! The time window is sampled at a fixed cadence. At each sampled instant,
//! the altitude of each target is found (RA/Dec -> HA/Dec -> Az/El using the
//! local sidereal time), and the altitude is turned into an airmass. A target
//! satisfies the [`AirmassConstraint`] at an instant if its airmass is within
//! the constraint's bounds; targets at or below the horizon never do. The
//! per-instant results are reduced per target with a [`Policy`].

mod airmass;
mod error;

pub use airmass::{AirmassConstraint, AirmassModel};
pub use error::{ComputationError, InvalidArgumentError, ObservabilityError};

use hifitime::{Duration, Epoch, Unit};
use log::{debug, trace};
use marlu::precession::{get_lmst, precess_time};
use ndarray::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use vec1::Vec1;

use crate::{
    constants::DEFAULT_TIME_RES_MINUTES,
    normalise::{Observer, Target},
    time::TimeWindow,
};

/// How the per-instant results are combined into a single result per target.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// The constraint must be satisfied at every sampled instant, i.e. the
    /// target can be observed for the whole window.
    #[default]
    All,

    /// The constraint must be satisfied at one or more sampled instants.
    Any,
}

/// Everything about an assessment that isn't the observer, the targets, the
/// window or the constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationSettings {
    /// The cadence of the time grid.
    pub time_res: Duration,

    pub policy: Policy,

    /// Precess the observer's LMST and latitude into the J2000 frame of the
    /// targets. Without this, the J2000 coordinates are used as if they were
    /// coordinates of date.
    pub precess: bool,

    /// UT1 - UTC.
    pub dut1: Duration,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        EvaluationSettings {
            time_res: Duration::from_f64(DEFAULT_TIME_RES_MINUTES, Unit::Minute),
            policy: Policy::default(),
            precess: true,
            dut1: Duration::from_seconds(0.0),
        }
    }
}

/// The full result of an assessment for a single observer.
#[derive(Debug, Clone)]
pub struct ObservabilityGrid {
    /// The sampled instants.
    pub timestamps: Vec1<Epoch>,

    /// The airmass of each target at each sampled instant; the first
    /// dimension is targets, the second timestamps. Targets below the horizon
    /// have infinite airmass.
    pub airmass: Array2<f64>,

    /// Whether each target satisfied the constraint at each sampled instant.
    /// Same shape as `airmass`.
    pub satisfied: Array2<bool>,

    /// The policy used to make `observable`.
    pub policy: Policy,

    /// One entry per target, in the same order as the targets.
    pub observable: Vec<bool>,
}

impl ObservabilityGrid {
    /// Combine the per-instant results with a (possibly different) policy.
    pub fn reduce(&self, policy: Policy) -> Vec<bool> {
        reduce(self.satisfied.view(), policy)
    }

    pub fn num_targets(&self) -> usize {
        self.satisfied.len_of(Axis(0))
    }
}

fn reduce(satisfied: ArrayView2<bool>, policy: Policy) -> Vec<bool> {
    satisfied
        .outer_iter()
        .map(|row| match policy {
            Policy::All => row.iter().all(|&s| s),
            Policy::Any => row.iter().any(|&s| s),
        })
        .collect()
}

/// The observer's local sidereal time and latitude at an instant, in the frame
/// the targets' coordinates are in.
#[derive(Debug, Clone, Copy)]
struct LocalSky {
    lst_rad: f64,
    latitude_rad: f64,
}

fn local_sky(observer: &Observer, target: &Target, epoch: Epoch, settings: &EvaluationSettings) -> LocalSky {
    let location = observer.location();
    if settings.precess {
        let precession_info = precess_time(
            location.longitude_rad,
            location.latitude_rad,
            target.radec(),
            epoch,
            settings.dut1,
        );
        LocalSky {
            lst_rad: precession_info.lmst_j2000,
            latitude_rad: precession_info.array_latitude_j2000,
        }
    } else {
        LocalSky {
            lst_rad: get_lmst(location.longitude_rad, epoch, settings.dut1),
            latitude_rad: location.latitude_rad,
        }
    }
}

/// Get the altitude of a target as seen by an observer at an instant
/// \[radians\].
pub fn altitude(
    observer: &Observer,
    target: &Target,
    epoch: Epoch,
    settings: &EvaluationSettings,
) -> f64 {
    let LocalSky {
        lst_rad,
        latitude_rad,
    } = local_sky(observer, target, epoch, settings);
    // The hour angle is wrapped by marlu, so the LST needn't be.
    target.radec().to_hadec(lst_rad).to_azel(latitude_rad).el
}

/// Assess each target's airmass as seen by `observer` over `window`, and
/// reduce the results per target with `settings.policy`.
pub fn observability_grid(
    observer: &Observer,
    targets: &[Target],
    window: &TimeWindow,
    constraint: &AirmassConstraint,
    settings: &EvaluationSettings,
) -> Result<ObservabilityGrid, ObservabilityError> {
    if targets.is_empty() {
        return Err(InvalidArgumentError::NoTargets.into());
    }
    let timestamps = window.grid(settings.time_res)?;
    debug!(
        "Assessing {} targets from {} at {} timestamps ({} to {})",
        targets.len(),
        observer.name(),
        timestamps.len(),
        timestamps.first(),
        timestamps.last()
    );

    let model = constraint.model();
    let mut airmass = Array2::from_elem((targets.len(), timestamps.len()), f64::INFINITY);
    airmass
        .outer_iter_mut()
        .into_par_iter()
        .zip(targets.par_iter())
        .try_for_each(|(mut row, target)| {
            for (am, &timestamp) in row.iter_mut().zip(timestamps.iter()) {
                let alt = altitude(observer, target, timestamp, settings);
                if !alt.is_finite() {
                    return Err(ComputationError::NonFiniteAltitude {
                        target: target.name().to_string(),
                        epoch: timestamp.to_string(),
                    });
                }
                *am = model.airmass(alt);
                trace!(
                    "{} at {}: altitude {:.4}°, airmass {:.4}",
                    target.name(),
                    timestamp,
                    alt.to_degrees(),
                    am
                );
            }
            Ok(())
        })?;

    let satisfied = airmass.mapv(|am| constraint.is_satisfied(am));
    let observable = reduce(satisfied.view(), settings.policy);
    debug!(
        "{}: {} of {} targets observable ({} policy)",
        observer.name(),
        observable.iter().filter(|&&o| o).count(),
        targets.len(),
        settings.policy
    );

    Ok(ObservabilityGrid {
        timestamps,
        airmass,
        satisfied,
        policy: settings.policy,
        observable,
    })
}

/// Is each target observable by `observer` over `window`? The result has one
/// entry per target, in the same order as `targets`.
pub fn is_observable(
    observer: &Observer,
    targets: &[Target],
    window: &TimeWindow,
    constraint: &AirmassConstraint,
    settings: &EvaluationSettings,
) -> Result<Vec<bool>, ObservabilityError> {
    observability_grid(observer, targets, window, constraint, settings).map(|g| g.observable)
}

/// Run [`observability_grid`] for each observer, in order.
pub fn evaluate_all_observers(
    observers: &[Observer],
    targets: &[Target],
    window: &TimeWindow,
    constraint: &AirmassConstraint,
    settings: &EvaluationSettings,
) -> Result<Vec<ObservabilityGrid>, ObservabilityError> {
    if observers.is_empty() {
        return Err(InvalidArgumentError::NoObservers.into());
    }
    observers
        .iter()
        .map(|observer| observability_grid(observer, targets, window, constraint, settings))
        .collect()
}
