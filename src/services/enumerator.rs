//! Periodic event enumeration: the core of the engine.
//!
//! For one target's ephemeris, walk forward from an epoch shifted to just
//! before the window, generate successive midpoints, and keep the events
//! that are at least partly dark and clear the elevation and hour-angle
//! thresholds.
//!
//! ## Acceptance rule
//! A candidate is emitted only if
//! - at least one of start/mid/end is at night under the configured
//!   twilight elevation, and
//! - start or end elevation clears the ingress/egress minimum, and
//! - mid elevation clears the midpoint minimum, and
//! - the midpoint hour angle lies inside the configured bounds.
//!
//! ## Edge cases
//! - Candidates exactly on the forward window boundary are kept (`>` stops,
//!   not `>=`); candidates exactly on the backward boundary are skipped.
//! - Work is bounded at `MAX_EVENT_CANDIDATES` geometry evaluations per
//!   target regardless of how small the period is.

use crate::error::{CoreError, CoreResult};
use crate::geometry::{angular_separation, Body, EquatorialCoord, HorizontalCoord, Provider};
use crate::models::constraints::ConstraintBundle;
use crate::models::event::{EventRecord, EventSample, MoonContext};
use crate::models::target::Target;
use crate::services::sun_events::SunEventSet;
use crate::time::{jd::night_date, JulianDate};

/// Hard cap on candidate midpoints per target.
pub const MAX_EVENT_CANDIDATES: usize = 2000;

/// Enumeration output: accepted records in discovery order, plus the raw
/// midpoint JDs for external sorting.
#[derive(Debug, Clone)]
pub struct EnumeratedEvents {
    pub records: Vec<EventRecord>,
    pub midpoints: Vec<JulianDate>,
}

/// Enumerate every observable event of a periodic target inside the window.
///
/// `do_secondary` offsets all candidates by half a period, predicting
/// secondary eclipses instead of primaries.
///
/// Running this twice with identical inputs yields identical output; the
/// walk is fully deterministic.
pub fn enumerate_events(
    target: &Target,
    bundle: &ConstraintBundle,
    sun_events: &SunEventSet,
    provider: &dyn Provider,
    do_secondary: bool,
) -> CoreResult<EnumeratedEvents> {
    let eph = target.ephemeris.ok_or_else(|| {
        CoreError::InvalidInput(format!("Target {} has no ephemeris", target.name))
    })?;
    if !eph.is_valid() {
        return Err(CoreError::InvalidInput(format!(
            "Target {} has an unusable ephemeris (period {} d, width {} h)",
            target.name,
            eph.period_days,
            eph.half_width.value() * 2.0
        )));
    }

    let period = eph.period_days;
    let half_width_days = eph.half_width.to_days();
    let secondary_offset = if do_secondary { period / 2.0 } else { 0.0 };

    let earliest = bundle.window.earliest().value();
    let latest = bundle.window.latest().value();

    // Shift the epoch forward by a whole number of periods so iteration
    // starts a couple of periods before the window opens.
    let cycles = ((earliest - eph.epoch.value()) / period - 2.0).floor();
    let base_epoch = eph.epoch.value() + cycles * period;

    let body = Body::Fixed(EquatorialCoord {
        ra: target.ra,
        dec: target.dec,
    });

    let mut records = Vec::new();
    let mut midpoints = Vec::new();

    for index in 0..MAX_EVENT_CANDIDATES {
        let mid_jd = base_epoch + period * index as f64 + secondary_offset;
        if mid_jd > latest {
            break;
        }
        if mid_jd <= earliest {
            continue;
        }

        let start_jd = mid_jd - half_width_days;
        let end_jd = mid_jd + half_width_days;

        let start_dn = sun_events.classify(JulianDate::new(start_jd))?;
        let mid_dn = sun_events.classify_with_reuse(JulianDate::new(mid_jd), Some(&start_dn))?;
        let end_dn = sun_events.classify_with_reuse(JulianDate::new(end_jd), Some(&mid_dn))?;

        // fully-daytime events are invisible, skip before any target geometry
        if start_dn.daytime && mid_dn.daytime && end_dn.daytime {
            continue;
        }

        let start_h = provider.horizontal(&bundle.site, &body, JulianDate::new(start_jd));
        let mid_h = provider.horizontal(&bundle.site, &body, JulianDate::new(mid_jd));
        let end_h = provider.horizontal(&bundle.site, &body, JulianDate::new(end_jd));

        let edge_ok = start_h.elevation.value() >= bundle.min_start_end_elevation.value()
            || end_h.elevation.value() >= bundle.min_start_end_elevation.value();
        let mid_ok = mid_h.elevation.value() >= bundle.min_mid_elevation.value();
        if !(edge_ok && mid_ok) {
            continue;
        }

        let mid_ha = mid_h.hour_angle.value();
        if mid_ha < bundle.min_hour_angle.value() || mid_ha > bundle.max_hour_angle.value() {
            continue;
        }

        let mid = JulianDate::new(mid_jd);

        // The sunset opening the observing night: when the event begins in
        // daylight and is still in daylight at mid, the dark part is ahead
        // and the upcoming sunset bounds it; otherwise the night already
        // began at the previous sunset.
        let night_start = if start_dn.daytime && mid_dn.daytime {
            sun_events.next_sunset_after(mid)?
        } else {
            sun_events.previous_sunset_before(mid)?
        };
        let night_end = if mid_dn.daytime && end_dn.daytime {
            sun_events.previous_sunrise_before(mid)?
        } else {
            sun_events.next_sunrise_after(mid)?
        };

        let night = night_date(night_start, bundle.site.longitude.value()).ok_or_else(|| {
            CoreError::InternalError(format!(
                "Sunset JD {} not representable as a civil date",
                night_start.value()
            ))
        })?;

        let (pre_baseline, post_baseline) = if bundle.baseline.value() > 0.0 {
            let offset = bundle.baseline.to_days();
            (
                Some(sample_at(
                    provider,
                    sun_events,
                    bundle,
                    &body,
                    JulianDate::new(mid_jd - offset),
                )?),
                Some(sample_at(
                    provider,
                    sun_events,
                    bundle,
                    &body,
                    JulianDate::new(mid_jd + offset),
                )?),
            )
        } else {
            (None, None)
        };

        let moon_eq = provider.equatorial(&Body::Moon, mid);
        let target_eq = EquatorialCoord {
            ra: target.ra,
            dec: target.dec,
        };
        let moon = MoonContext {
            separation: angular_separation(&moon_eq, &target_eq),
            illuminated_fraction: provider.moon_illuminated_fraction(mid),
        };

        records.push(EventRecord {
            target_name: target.name.clone(),
            midpoint: mid,
            start: make_sample(JulianDate::new(start_jd), &start_h, start_dn.daytime),
            mid: make_sample(mid, &mid_h, mid_dn.daytime),
            end: make_sample(JulianDate::new(end_jd), &end_h, end_dn.daytime),
            pre_baseline,
            post_baseline,
            starts_before_sunset: start_dn.daytime,
            middle_in_daytime: mid_dn.daytime,
            ends_after_sunrise: end_dn.daytime,
            night_start,
            night_end,
            night,
            moon: Some(moon),
            night_run: 0,
        });
        midpoints.push(mid);
    }

    Ok(EnumeratedEvents { records, midpoints })
}

fn make_sample(instant: JulianDate, h: &HorizontalCoord, daytime: bool) -> EventSample {
    EventSample {
        instant,
        elevation: h.elevation,
        azimuth: h.azimuth,
        hour_angle: h.hour_angle,
        daytime,
    }
}

/// Evaluate one extra sample point with its own day/night flag.
fn sample_at(
    provider: &dyn Provider,
    sun_events: &SunEventSet,
    bundle: &ConstraintBundle,
    body: &Body,
    t: JulianDate,
) -> CoreResult<EventSample> {
    let h = provider.horizontal(&bundle.site, body, t);
    let dn = sun_events.classify(t)?;
    Ok(make_sample(t, &h, dn.daytime))
}
