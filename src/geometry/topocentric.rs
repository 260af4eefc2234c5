//! Sidereal time and equatorial→horizontal transforms.

use std::f64::consts::PI;

use crate::geometry::solar::{julian_century, normalize_degrees};

const DEG: f64 = PI / 180.0;

/// Greenwich mean sidereal time in degrees.
pub fn gmst_degrees(jd: f64) -> f64 {
    let t = julian_century(jd);
    normalize_degrees(
        280.46061837 + 360.98564736629 * (jd - 2_451_545.0)
            + 0.000387933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Local sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time(jd: f64, lon_deg: f64) -> f64 {
    normalize_degrees(gmst_degrees(jd) + lon_deg)
}

/// Hour angle in degrees, folded into (-180, 180]. Positive west of the
/// meridian.
pub fn hour_angle_degrees(lst_deg: f64, ra_deg: f64) -> f64 {
    let mut ha = normalize_degrees(lst_deg - ra_deg);
    if ha > 180.0 {
        ha -= 360.0;
    }
    ha
}

/// Equatorial to horizontal transform.
/// Returns (elevation_deg, azimuth_deg), azimuth clockwise from north.
pub fn equatorial_to_horizontal(
    ra_deg: f64,
    dec_deg: f64,
    lat_deg: f64,
    lst_deg: f64,
) -> (f64, f64) {
    let ha = normalize_degrees(lst_deg - ra_deg) * DEG;
    let dec = dec_deg * DEG;
    let lat = lat_deg * DEG;

    let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * ha.cos();
    let sin_alt = sin_alt.clamp(-1.0, 1.0);
    let alt = sin_alt.asin();

    let cos_alt = alt.cos();
    let azimuth = if cos_alt.abs() < 1e-10 || lat.cos().abs() < 1e-10 {
        // zenith/nadir or a pole: azimuth is degenerate, pick the meridian
        if dec_deg >= lat_deg {
            0.0
        } else {
            180.0
        }
    } else {
        let cos_az = (dec.sin() - sin_alt * lat.sin()) / (cos_alt * lat.cos());
        let az = cos_az.clamp(-1.0, 1.0).acos() / DEG;
        if ha.sin() > 0.0 {
            360.0 - az
        } else {
            az
        }
    };

    (alt / DEG, normalize_degrees(azimuth))
}
