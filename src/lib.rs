//! transitscope — transit and eclipse visibility prediction.
//!
//! Given a list of targets with periodic ephemerides and an observing site,
//! the engine enumerates every transit falling inside a date window, keeps
//! the ones that are at least partly dark and above the configured
//! elevation/hour-angle thresholds, and returns structured per-event
//! records ready for rendering or calendar export.
//!
//! The typical flow:
//!
//! 1. load targets ([`io::TargetListLoader`]) and resolve the site
//!    ([`models::SiteSelection`]),
//! 2. build a [`models::ConstraintBundle`] for the request,
//! 3. call [`services::run_prediction`] with a geometry provider
//!    (usually [`geometry::MeeusProvider`]),
//! 4. render the [`services::PredictionReport`] or export it with
//!    [`io::write_calendar_csv`].

pub mod error;
pub mod geometry;
pub mod io;
pub mod models;
pub mod parsing;
pub mod services;
pub mod time;
pub mod transformations;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use geometry::MeeusProvider;
pub use models::{ConstraintBundle, EventRecord, PeakRecord, SiteSelection, Target, Window};
pub use services::{run_prediction, PredictionReport};
pub use time::JulianDate;
