//! Low-precision solar position series (NOAA/Meeus style).
//!
//! Accuracy is a few hundredths of a degree for dates within ±50 years of
//! J2000, which is far below the minute-level rise/set precision the engine
//! needs.

use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Julian centuries since J2000.0.
pub fn julian_century(jd: f64) -> f64 {
    (jd - 2_451_545.0) / 36_525.0
}

pub fn normalize_degrees(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    d
}

fn sun_mean_longitude(t: f64) -> f64 {
    normalize_degrees(280.46646 + t * (36_000.76983 + t * 0.0003032))
}

fn sun_mean_anomaly(t: f64) -> f64 {
    normalize_degrees(357.52911 + t * (35_999.05029 - t * 0.0001537))
}

fn sun_equation_of_center(t: f64) -> f64 {
    let m = sun_mean_anomaly(t) * DEG;
    m.sin() * (1.914602 - t * (0.004817 + t * 0.000014))
        + (2.0 * m).sin() * (0.019993 - t * 0.000101)
        + (3.0 * m).sin() * 0.000289
}

fn sun_true_longitude(t: f64) -> f64 {
    sun_mean_longitude(t) + sun_equation_of_center(t)
}

/// Apparent ecliptic longitude, degrees.
pub fn sun_apparent_longitude(t: f64) -> f64 {
    let omega = 125.04 - 1934.136 * t;
    sun_true_longitude(t) - 0.00569 - 0.00478 * (omega * DEG).sin()
}

fn mean_obliquity(t: f64) -> f64 {
    23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0
}

/// Mean obliquity corrected for nutation in obliquity, degrees.
pub fn obliquity_corrected(t: f64) -> f64 {
    let omega = 125.04 - 1934.136 * t;
    mean_obliquity(t) + 0.00256 * (omega * DEG).cos()
}

/// Apparent equatorial position of the Sun.
/// Returns (right_ascension_deg, declination_deg).
pub fn sun_equatorial(jd: f64) -> (f64, f64) {
    let t = julian_century(jd);
    let lambda = sun_apparent_longitude(t) * DEG;
    let eps = obliquity_corrected(t) * DEG;

    let ra = normalize_degrees((eps.cos() * lambda.sin()).atan2(lambda.cos()) / DEG);
    let dec = (eps.sin() * lambda.sin()).asin() / DEG;

    (ra, dec)
}
