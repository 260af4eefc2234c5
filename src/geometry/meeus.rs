//! Built-in geometry provider backed by the low-precision series.

use crate::error::{CoreError, CoreResult};
use crate::geometry::topocentric::{equatorial_to_horizontal, hour_angle_degrees, local_sidereal_time};
use crate::geometry::{lunar, solar, Body, EquatorialCoord, HorizontalCoord, Provider};
use crate::models::site::Site;
use crate::time::JulianDate;
use crate::units::{Degrees, Hours};

/// How far ahead a rise/set search scans before giving up. Two days covers
/// any drifting sunset/sunrise; only polar day/night exhausts it.
pub const CROSSING_SEARCH_SPAN_DAYS: f64 = 2.0;

/// Coarse scan step for rise/set bracketing: 10 minutes.
const SCAN_STEP_DAYS: f64 = 10.0 / 1_440.0;

/// Which way an elevation crossing goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CrossingDirection {
    Rising,
    Setting,
}

/// Find the next crossing of `horizon_deg` after `after`, bracketing with a
/// coarse scan and refining by bisection to well under a second.
///
/// `elevation` must be continuous in time; it is evaluated O(300) times per
/// call in the worst case.
pub(crate) fn find_crossing<F>(
    elevation: F,
    horizon_deg: f64,
    after: f64,
    direction: CrossingDirection,
) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let crosses = |a: f64, b: f64| match direction {
        CrossingDirection::Rising => a <= horizon_deg && b > horizon_deg,
        CrossingDirection::Setting => a >= horizon_deg && b < horizon_deg,
    };

    let mut t0 = after;
    let mut e0 = elevation(t0);
    let end = after + CROSSING_SEARCH_SPAN_DAYS;

    while t0 < end {
        let t1 = (t0 + SCAN_STEP_DAYS).min(end);
        let e1 = elevation(t1);
        if crosses(e0, e1) {
            // bisect the bracket
            let (mut lo, mut hi) = (t0, t1);
            for _ in 0..40 {
                let mid = 0.5 * (lo + hi);
                let em = elevation(mid);
                if crosses(e0, em) {
                    hi = mid;
                } else {
                    lo = mid;
                }
            }
            return Some(0.5 * (lo + hi));
        }
        t0 = t1;
        e0 = e1;
        if t0 >= end {
            break;
        }
    }
    None
}

/// Geometry provider using the built-in solar/lunar series. Stateless; one
/// instance serves any number of requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeeusProvider;

impl MeeusProvider {
    pub fn new() -> Self {
        Self
    }

    fn body_equatorial(body: &Body, jd: f64) -> (f64, f64) {
        match body {
            Body::Sun => solar::sun_equatorial(jd),
            Body::Moon => {
                let (ra, dec, _) = lunar::moon_equatorial(jd);
                (ra, dec)
            }
            Body::Fixed(eq) => (eq.ra.value(), eq.dec.value()),
        }
    }

    fn elevation_at(site: &Site, body: &Body, jd: f64) -> f64 {
        let (ra, dec) = Self::body_equatorial(body, jd);
        let lst = local_sidereal_time(jd, site.longitude.value());
        let (alt, _) = equatorial_to_horizontal(ra, dec, site.latitude.value(), lst);
        alt
    }
}

impl Provider for MeeusProvider {
    fn equatorial(&self, body: &Body, t: JulianDate) -> EquatorialCoord {
        let (ra, dec) = Self::body_equatorial(body, t.value());
        EquatorialCoord {
            ra: Degrees::new(ra),
            dec: Degrees::new(dec),
        }
    }

    fn horizontal(&self, site: &Site, body: &Body, t: JulianDate) -> HorizontalCoord {
        let jd = t.value();
        let (ra, dec) = Self::body_equatorial(body, jd);
        let lst = local_sidereal_time(jd, site.longitude.value());
        let (alt, az) = equatorial_to_horizontal(ra, dec, site.latitude.value(), lst);
        let ha_deg = hour_angle_degrees(lst, ra);

        HorizontalCoord {
            elevation: Degrees::new(alt),
            azimuth: Degrees::new(az),
            hour_angle: Hours::new(ha_deg / 15.0),
        }
    }

    fn next_set(
        &self,
        site: &Site,
        body: &Body,
        horizon: Degrees,
        after: JulianDate,
    ) -> CoreResult<JulianDate> {
        find_crossing(
            |jd| Self::elevation_at(site, body, jd),
            horizon.value(),
            after.value(),
            CrossingDirection::Setting,
        )
        .map(JulianDate::new)
        .ok_or(CoreError::NoCrossing {
            event: "set",
            horizon_deg: horizon.value(),
            span_days: CROSSING_SEARCH_SPAN_DAYS,
            after: after.value(),
        })
    }

    fn next_rise(
        &self,
        site: &Site,
        body: &Body,
        horizon: Degrees,
        after: JulianDate,
    ) -> CoreResult<JulianDate> {
        find_crossing(
            |jd| Self::elevation_at(site, body, jd),
            horizon.value(),
            after.value(),
            CrossingDirection::Rising,
        )
        .map(JulianDate::new)
        .ok_or(CoreError::NoCrossing {
            event: "rise",
            horizon_deg: horizon.value(),
            span_days: CROSSING_SEARCH_SPAN_DAYS,
            after: after.value(),
        })
    }

    fn moon_illuminated_fraction(&self, t: JulianDate) -> f64 {
        lunar::illuminated_fraction(t.value())
    }
}
