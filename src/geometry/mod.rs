//! Astronomical geometry: the provider contract the engine depends on, and
//! a low-precision built-in implementation.
//!
//! The visibility engine only ever talks to [`Provider`]; everything in
//! `solar`/`lunar`/`topocentric` backs the built-in [`MeeusProvider`] and can
//! be swapped for a higher-precision library without touching the engine.

pub mod lunar;
pub mod meeus;
pub mod solar;
pub mod topocentric;

pub use meeus::MeeusProvider;

use crate::error::CoreResult;
use crate::models::site::Site;
use crate::time::JulianDate;
use crate::units::{Degrees, Hours};

/// Equatorial coordinates (J2000 for fixed targets, of-date for Sun/Moon).
#[derive(Debug, Clone, Copy)]
pub struct EquatorialCoord {
    pub ra: Degrees,
    pub dec: Degrees,
}

/// A body the provider can point at: the Sun and Moon pseudo-targets, or a
/// fixed RA/Dec target.
#[derive(Debug, Clone, Copy)]
pub enum Body {
    Sun,
    Moon,
    Fixed(EquatorialCoord),
}

/// Topocentric pointing at one instant.
#[derive(Debug, Clone, Copy)]
pub struct HorizontalCoord {
    pub elevation: Degrees,
    /// Clockwise from north.
    pub azimuth: Degrees,
    /// Hours west of the meridian, in (-12, 12].
    pub hour_angle: Hours,
}

/// Contract for the astronomical geometry the engine treats as a black box.
pub trait Provider {
    /// Apparent equatorial position of a body at an instant.
    fn equatorial(&self, body: &Body, t: JulianDate) -> EquatorialCoord;

    /// Elevation/azimuth/hour angle of a body as seen from a site.
    fn horizontal(&self, site: &Site, body: &Body, t: JulianDate) -> HorizontalCoord;

    /// Next instant after `after` at which the body crosses `horizon`
    /// downward. Errors with `NoCrossing` when none occurs within the
    /// provider's search span (polar day/night).
    fn next_set(
        &self,
        site: &Site,
        body: &Body,
        horizon: Degrees,
        after: JulianDate,
    ) -> CoreResult<JulianDate>;

    /// Next upward crossing of `horizon` after `after`.
    fn next_rise(
        &self,
        site: &Site,
        body: &Body,
        horizon: Degrees,
        after: JulianDate,
    ) -> CoreResult<JulianDate>;

    /// Illuminated fraction of the lunar disk at an instant.
    fn moon_illuminated_fraction(&self, t: JulianDate) -> f64;

    fn elevation(&self, site: &Site, body: &Body, t: JulianDate) -> Degrees {
        self.horizontal(site, body, t).elevation
    }
}

/// Angular separation between two equatorial positions, in degrees.
pub fn angular_separation(a: &EquatorialCoord, b: &EquatorialCoord) -> Degrees {
    let (ra1, dec1) = (a.ra.to_radians(), a.dec.to_radians());
    let (ra2, dec2) = (b.ra.to_radians(), b.dec.to_radians());
    let cos_sep =
        dec1.sin() * dec2.sin() + dec1.cos() * dec2.cos() * (ra1 - ra2).cos();
    Degrees::from_radians(cos_sep.clamp(-1.0, 1.0).acos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separation_of_identical_points_is_zero() {
        let p = EquatorialCoord {
            ra: Degrees::new(120.0),
            dec: Degrees::new(-30.0),
        };
        assert!(angular_separation(&p, &p).value().abs() < 1e-9);
    }

    #[test]
    fn separation_of_poles_is_180() {
        let n = EquatorialCoord {
            ra: Degrees::new(0.0),
            dec: Degrees::new(90.0),
        };
        let s = EquatorialCoord {
            ra: Degrees::new(0.0),
            dec: Degrees::new(-90.0),
        };
        assert!((angular_separation(&n, &s).value() - 180.0).abs() < 1e-9);
    }
}
