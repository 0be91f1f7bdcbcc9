// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Filter astronomical targets by their airmass as seen from a set of
observatories over a time window.

Raw observatory and target records are normalised into [`Observer`]s and
[`Target`]s, assessed with [`is_observable`] (or [`observability_grid`] for
the per-instant airmasses), and rendered as text with [`report`].
 */

pub mod angle;
mod cli;
pub mod constants;
pub mod normalise;
pub mod observability;
mod params;
pub mod report;
pub mod time;
pub mod unit_parsing;

// Re-exports.
pub use cli::{Skyfilter, SkyfilterError};
pub use normalise::{
    normalise_observer, normalise_observers, normalise_target, normalise_targets,
    InvalidRecordError, ObservatoryRecord, Observer, RecordValue, Target, TargetRecord,
};
pub use observability::{
    evaluate_all_observers, is_observable, observability_grid, AirmassConstraint, AirmassModel,
    ComputationError, EvaluationSettings, InvalidArgumentError, ObservabilityError,
    ObservabilityGrid, Policy,
};
pub use time::TimeWindow;
