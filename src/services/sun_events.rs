//! Precomputed sunset/sunrise sets for fast day/night classification.
//!
//! Built once per request, queried many times by the enumerator. The builder
//! steps a cursor across the window in slightly-under-24-hour strides so a
//! drifting sunset near a stride boundary cannot be skipped, and keeps both
//! sequences ordered and de-duplicated.
//!
//! ## Edge cases
//! - A cursor step with no crossing within the search span (polar day or
//!   polar night at the configured twilight elevation) contributes nothing.
//! - Queries outside the built range indicate the margin computation is
//!   wrong and return the fatal `SunEventRange` error.

use crate::error::{CoreError, CoreResult};
use crate::geometry::{Body, Provider};
use crate::models::constraints::Window;
use crate::models::site::Site;
use crate::time::JulianDate;
use crate::units::Degrees;

/// Safety margin beyond the window on each side, so "next sunset/sunrise"
/// never falls off either end.
pub const SUN_EVENT_MARGIN_DAYS: f64 = 2.0;

/// Cursor stride: 23 h 30 m, deliberately under a day.
const CURSOR_STEP_DAYS: f64 = 23.5 / 24.0;

/// Crossings closer than this are re-detections of the same event.
const DUPLICATE_TOLERANCE_DAYS: f64 = 30.0 / 86_400.0;

/// Day/night verdict for one instant, carrying the lookups that produced it
/// so a later instant can reuse them.
#[derive(Debug, Clone, Copy)]
pub struct DayNight {
    pub daytime: bool,
    pub next_sunset: JulianDate,
    pub next_sunrise: JulianDate,
}

/// Ordered, de-duplicated sunset and sunrise instants covering the request
/// window plus margin. Read-only after construction.
#[derive(Debug, Clone)]
pub struct SunEventSet {
    sunsets: Vec<f64>,
    sunrises: Vec<f64>,
    range_start: f64,
    range_end: f64,
}

impl SunEventSet {
    /// Precompute every sunset and sunrise at `twilight_elevation` across
    /// the window plus margin.
    pub fn build(
        provider: &dyn Provider,
        site: &Site,
        window: &Window,
        twilight_elevation: Degrees,
    ) -> CoreResult<Self> {
        let range_start = window.earliest().value() - SUN_EVENT_MARGIN_DAYS;
        let range_end = window.latest().value() + SUN_EVENT_MARGIN_DAYS;

        let mut sunsets: Vec<f64> = Vec::new();
        let mut sunrises: Vec<f64> = Vec::new();

        let mut cursor = range_start;
        while cursor <= range_end {
            let after = JulianDate::new(cursor);
            match provider.next_set(site, &Body::Sun, twilight_elevation, after) {
                Ok(t) => insert_unique(&mut sunsets, t.value()),
                Err(CoreError::NoCrossing { .. }) => {}
                Err(e) => return Err(e),
            }
            match provider.next_rise(site, &Body::Sun, twilight_elevation, after) {
                Ok(t) => insert_unique(&mut sunrises, t.value()),
                Err(CoreError::NoCrossing { .. }) => {}
                Err(e) => return Err(e),
            }
            cursor += CURSOR_STEP_DAYS;
        }

        Ok(Self {
            sunsets,
            sunrises,
            range_start,
            range_end,
        })
    }

    pub fn next_sunset_after(&self, t: JulianDate) -> CoreResult<JulianDate> {
        self.next_after(&self.sunsets, t)
    }

    pub fn next_sunrise_after(&self, t: JulianDate) -> CoreResult<JulianDate> {
        self.next_after(&self.sunrises, t)
    }

    pub fn previous_sunset_before(&self, t: JulianDate) -> CoreResult<JulianDate> {
        self.previous_before(&self.sunsets, t)
    }

    pub fn previous_sunrise_before(&self, t: JulianDate) -> CoreResult<JulianDate> {
        self.previous_before(&self.sunrises, t)
    }

    /// Classify an instant: daytime iff the next sunset comes before the
    /// next sunrise.
    pub fn classify(&self, t: JulianDate) -> CoreResult<DayNight> {
        let next_sunset = self.next_sunset_after(t)?;
        let next_sunrise = self.next_sunrise_after(t)?;
        Ok(DayNight {
            daytime: next_sunset.value() < next_sunrise.value(),
            next_sunset,
            next_sunrise,
        })
    }

    /// Classify `t`, optionally reusing a verdict for an earlier instant:
    /// if that instant was daytime and `t` still precedes its sunset, `t`
    /// shares the same verdict and lookups. Pure shortcut; passing `None`
    /// always gives the same answer at the cost of two fresh queries.
    pub fn classify_with_reuse(
        &self,
        t: JulianDate,
        prior: Option<&DayNight>,
    ) -> CoreResult<DayNight> {
        if let Some(p) = prior {
            if p.daytime && t.value() < p.next_sunset.value() {
                return Ok(*p);
            }
        }
        self.classify(t)
    }

    /// True when the merged timeline strictly alternates set/rise/set/...
    pub fn is_strictly_alternating(&self) -> bool {
        let mut merged: Vec<(f64, bool)> = self
            .sunsets
            .iter()
            .map(|&t| (t, true))
            .chain(self.sunrises.iter().map(|&t| (t, false)))
            .collect();
        merged.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        merged.windows(2).all(|w| w[0].1 != w[1].1)
    }

    pub fn num_sunsets(&self) -> usize {
        self.sunsets.len()
    }

    pub fn num_sunrises(&self) -> usize {
        self.sunrises.len()
    }

    fn check_range(&self, t: JulianDate) -> CoreResult<()> {
        let v = t.value();
        if v < self.range_start || v > self.range_end {
            return Err(CoreError::SunEventRange {
                jd: v,
                start: self.range_start,
                end: self.range_end,
            });
        }
        Ok(())
    }

    fn next_after(&self, list: &[f64], t: JulianDate) -> CoreResult<JulianDate> {
        self.check_range(t)?;
        let idx = list.partition_point(|&x| x <= t.value());
        list.get(idx)
            .copied()
            .map(JulianDate::new)
            .ok_or(CoreError::SunEventRange {
                jd: t.value(),
                start: self.range_start,
                end: self.range_end,
            })
    }

    fn previous_before(&self, list: &[f64], t: JulianDate) -> CoreResult<JulianDate> {
        self.check_range(t)?;
        let idx = list.partition_point(|&x| x < t.value());
        if idx == 0 {
            return Err(CoreError::SunEventRange {
                jd: t.value(),
                start: self.range_start,
                end: self.range_end,
            });
        }
        Ok(JulianDate::new(list[idx - 1]))
    }
}

fn insert_unique(list: &mut Vec<f64>, t: f64) {
    let idx = list.partition_point(|&x| x < t);
    if idx > 0 && (t - list[idx - 1]).abs() < DUPLICATE_TOLERANCE_DAYS {
        return;
    }
    if idx < list.len() && (list[idx] - t).abs() < DUPLICATE_TOLERANCE_DAYS {
        return;
    }
    list.insert(idx, t);
}
