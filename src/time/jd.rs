use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Julian Date of the Unix epoch (1970-01-01 00:00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date in the UTC scale. Thin wrapper around `f64`; one unit is one
/// day, fractional part is time of day (JD x.0 falls at 12:00 UTC).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDate(f64);

impl JulianDate {
    /// Create a new JD value.
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    /// Raw JD value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        let micros = dt.timestamp_micros() as f64;
        Self(UNIX_EPOCH_JD + micros / 86_400e6)
    }

    /// Convert to a civil UTC instant. Returns `None` for values outside
    /// chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let micros = (self.0 - UNIX_EPOCH_JD) * 86_400e6;
        if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
            return None;
        }
        Utc.timestamp_micros(micros.round() as i64).single()
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self(self.0 + days)
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: JulianDate) -> f64 {
        self.0 - other.0
    }
}

impl From<f64> for JulianDate {
    fn from(v: f64) -> Self {
        JulianDate::new(v)
    }
}

/// Fixed-offset zone derived from the site longitude: `round(lon·24/360)`
/// whole hours east of UTC. Observing nights are labelled in this zone
/// rather than the user's display zone, so the calendar date of an evening
/// tracks the local solar day regardless of the display choice.
pub fn night_label_zone(longitude_deg: f64) -> FixedOffset {
    let hours = (longitude_deg * 24.0 / 360.0).round() as i32;
    let hours = hours.clamp(-12, 12);
    // east_opt only fails beyond ±24h, excluded by the clamp above
    FixedOffset::east_opt(hours * 3600).expect("offset within range")
}

/// Calendar date of an instant in the longitude-derived night label zone.
pub fn night_date(t: JulianDate, longitude_deg: f64) -> Option<NaiveDate> {
    let utc = t.to_utc()?;
    Some(utc.with_timezone(&night_label_zone(longitude_deg)).date_naive())
}
