//! Single-night observability check for non-periodic targets.
//!
//! Unlike the periodic path, which enumerates the whole window, this only
//! examines the one night following the window's base instant (next sunset
//! to the following sunrise). That asymmetry is inherited deliberately:
//! any-time targets answer "can I observe it tonight", not "when during the
//! next month".

use crate::error::CoreResult;
use crate::geometry::{Body, EquatorialCoord, Provider};
use crate::models::constraints::ConstraintBundle;
use crate::models::event::{EventSample, PeakRecord};
use crate::models::target::Target;
use crate::services::sun_events::SunEventSet;
use crate::time::{jd::night_date, JulianDate};

/// Elevation sampling cadence across the night: 10 minutes.
pub const PEAK_SAMPLE_STEP_DAYS: f64 = 10.0 / 1_440.0;

/// Find the nightly elevation peak of a target over the night following the
/// window base. Returns `None` (not an error) when the peak stays below the
/// minimum mid-event elevation; the threshold is inclusive.
pub fn nightly_peak(
    target: &Target,
    bundle: &ConstraintBundle,
    sun_events: &SunEventSet,
    provider: &dyn Provider,
) -> CoreResult<Option<PeakRecord>> {
    let sunset = sun_events.next_sunset_after(bundle.window.base)?;
    let sunrise = sun_events.next_sunrise_after(sunset)?;

    let body = Body::Fixed(EquatorialCoord {
        ra: target.ra,
        dec: target.dec,
    });

    let mut best: Option<EventSample> = None;
    let mut t = sunset.value();
    while t < sunrise.value() {
        consider(provider, bundle, &body, JulianDate::new(t), &mut best);
        t += PEAK_SAMPLE_STEP_DAYS;
    }
    // close the interval: the last stride rarely lands on the sunrise
    consider(provider, bundle, &body, sunrise, &mut best);

    let best = match best {
        Some(sample) => sample,
        None => return Ok(None),
    };

    if best.elevation.value() < bundle.min_mid_elevation.value() {
        return Ok(None);
    }

    let night = match night_date(sunset, bundle.site.longitude.value()) {
        Some(d) => d,
        None => return Ok(None),
    };

    Ok(Some(PeakRecord {
        target_name: target.name.clone(),
        peak: best,
        night_start: sunset,
        night_end: sunrise,
        night,
    }))
}

fn consider(
    provider: &dyn Provider,
    bundle: &ConstraintBundle,
    body: &Body,
    t: JulianDate,
    best: &mut Option<EventSample>,
) {
    let h = provider.horizontal(&bundle.site, body, t);
    let better = best
        .map(|b| h.elevation.value() > b.elevation.value())
        .unwrap_or(true);
    if better {
        *best = Some(EventSample {
            instant: t,
            elevation: h.elevation,
            azimuth: h.azimuth,
            hour_angle: h.hour_angle,
            daytime: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constraints::Window;
    use crate::models::site::{DisplayZone, Site};
    use crate::models::target::ObservationType;
    use crate::services::testing::SyntheticProvider;
    use crate::services::SunEventSet;
    use crate::units::Degrees;

    fn make_target(dec: f64) -> Target {
        Target {
            name: "anytime-target".to_string(),
            ra: Degrees::new(90.0),
            dec: Degrees::new(dec),
            magnitude: None,
            ephemeris: None,
            depth_ppt: None,
            priority: None,
            comments: String::new(),
            observation_type: ObservationType::AnyTime,
        }
    }

    fn make_context(min_elevation: f64) -> (ConstraintBundle, SunEventSet) {
        let mut bundle = ConstraintBundle::new(
            Site::new(0.0, 0.0),
            DisplayZone::Utc,
            Window::new(JulianDate::new(2_460_000.0), 10.0, 0.0),
        );
        bundle.min_mid_elevation = Degrees::new(min_elevation);
        let sun = SunEventSet::build(
            &SyntheticProvider,
            &bundle.site,
            &bundle.window,
            bundle.twilight_elevation,
        )
        .unwrap();
        (bundle, sun)
    }

    #[test]
    fn peak_found_for_high_target() {
        let (bundle, sun) = make_context(30.0);
        let target = make_target(55.0);
        let peak = nightly_peak(&target, &bundle, &sun, &SyntheticProvider)
            .unwrap()
            .expect("peak expected");
        assert!((peak.peak.elevation.value() - 55.0).abs() < 1e-9);
        // peak instant falls inside the examined night
        assert!(peak.peak.instant.value() >= peak.night_start.value());
        assert!(peak.peak.instant.value() <= peak.night_end.value());
    }

    #[test]
    fn threshold_is_inclusive_at_the_boundary() {
        // synthetic elevation equals the declination exactly
        let (bundle, sun) = make_context(40.0);
        let at_threshold = make_target(40.0);
        assert!(nightly_peak(&at_threshold, &bundle, &sun, &SyntheticProvider)
            .unwrap()
            .is_some());

        let below = make_target(39.99);
        assert!(nightly_peak(&below, &bundle, &sun, &SyntheticProvider)
            .unwrap()
            .is_none());
    }

    #[test]
    fn only_the_first_night_is_examined() {
        let (bundle, sun) = make_context(0.0);
        let target = make_target(10.0);
        let peak = nightly_peak(&target, &bundle, &sun, &SyntheticProvider)
            .unwrap()
            .unwrap();
        // the night opens within a day of the window base
        assert!(peak.night_start.value() > bundle.window.base.value());
        assert!(peak.night_start.value() < bundle.window.base.value() + 1.0);
    }
}
