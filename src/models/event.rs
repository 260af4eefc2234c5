use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::site::DisplayZone;
use crate::time::JulianDate;
use crate::units::{Degrees, Hours};

/// Target geometry evaluated at one instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EventSample {
    pub instant: JulianDate,
    pub elevation: Degrees,
    pub azimuth: Degrees,
    pub hour_angle: Hours,
    /// True when the Sun is up (at the configured twilight elevation).
    pub daytime: bool,
}

impl EventSample {
    /// Elevation pass/fail against a threshold, inclusive. Renderers use
    /// this to mark baseline points; acceptance logic has its own checks.
    pub fn clears(&self, minimum: Degrees) -> bool {
        self.elevation.value() >= minimum.value()
    }
}

/// Moon circumstances at the event midpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoonContext {
    /// Angular separation between the Moon and the target.
    pub separation: Degrees,
    /// Illuminated fraction of the lunar disk, 0 (new) to 1 (full).
    pub illuminated_fraction: f64,
}

/// One accepted transit/eclipse event. Immutable after the enumerator emits
/// it; the aggregator only rewrites `night_run` after the global sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub target_name: String,
    /// Event midpoint JD; equals `mid.instant`, kept as the sort key.
    pub midpoint: JulianDate,
    pub start: EventSample,
    pub mid: EventSample,
    pub end: EventSample,
    /// Out-of-transit samples at `mid ∓ baseline`, when a baseline was
    /// requested. Presentation only; acceptance never looks at these.
    pub pre_baseline: Option<EventSample>,
    pub post_baseline: Option<EventSample>,
    pub starts_before_sunset: bool,
    pub middle_in_daytime: bool,
    pub ends_after_sunrise: bool,
    /// Sunset opening the observing night that contains the event.
    pub night_start: JulianDate,
    /// Sunrise closing that night.
    pub night_end: JulianDate,
    /// Calendar date of `night_start` in the longitude-derived label zone.
    pub night: NaiveDate,
    pub moon: Option<MoonContext>,
    /// Same-night run length: the first record of a contiguous same-night
    /// run holds the run's size, the rest hold 0. Recomputed by the
    /// aggregator after sorting.
    pub night_run: u32,
}

impl EventRecord {
    pub fn mid_utc(&self) -> Option<DateTime<Utc>> {
        self.midpoint.to_utc()
    }

    pub fn start_utc(&self) -> Option<DateTime<Utc>> {
        self.start.instant.to_utc()
    }

    pub fn end_utc(&self) -> Option<DateTime<Utc>> {
        self.end.instant.to_utc()
    }

    /// Midpoint in the request's display zone.
    pub fn mid_local(&self, zone: &DisplayZone) -> Option<DateTime<FixedOffset>> {
        self.mid_utc().map(|dt| zone.to_local(dt))
    }
}

/// Result of the single-night any-time check: the nightly elevation peak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakRecord {
    pub target_name: String,
    pub peak: EventSample,
    /// The examined night's bounding sunset and sunrise.
    pub night_start: JulianDate,
    pub night_end: JulianDate,
    pub night: NaiveDate,
}
