//! The visibility engine: sun event precomputation, per-target event
//! enumeration, the single-night any-time check, and result aggregation.

pub mod aggregator;
pub mod anytime;
pub mod enumerator;
pub mod predict;
pub mod sun_events;

pub use aggregator::{annotate_night_runs, sort_chronological};
pub use anytime::nightly_peak;
pub use enumerator::{enumerate_events, EnumeratedEvents, MAX_EVENT_CANDIDATES};
pub use predict::{run_prediction, PredictionReport, SkippedTarget};
pub use sun_events::{DayNight, SunEventSet, SUN_EVENT_MARGIN_DAYS};
