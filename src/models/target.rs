use serde::{Deserialize, Serialize};

use crate::time::JulianDate;
use crate::units::{Degrees, Hours};

/// How a target is meant to be observed.
///
/// The flat target list encodes this as `1` (periodic), `2` (any time) or
/// `3` (both).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationType {
    Periodic,
    AnyTime,
    Both,
}

impl ObservationType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ObservationType::Periodic),
            2 => Some(ObservationType::AnyTime),
            3 => Some(ObservationType::Both),
            _ => None,
        }
    }

    /// True if the periodic enumeration path applies.
    pub fn is_periodic(&self) -> bool {
        matches!(self, ObservationType::Periodic | ObservationType::Both)
    }

    /// True if the single-night peak path applies.
    pub fn is_any_time(&self) -> bool {
        matches!(self, ObservationType::AnyTime | ObservationType::Both)
    }
}

/// Periodic ephemeris: a reference mid-event epoch, the period, and half the
/// event duration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ephemeris {
    /// Julian Date of a known event midpoint.
    pub epoch: JulianDate,
    pub epoch_uncertainty: Option<f64>,
    pub period_days: f64,
    pub period_uncertainty: Option<f64>,
    /// Half the event duration; start/end are `mid ∓ half_width`.
    pub half_width: Hours,
}

impl Ephemeris {
    /// An ephemeris usable for enumeration: positive period, positive width.
    pub fn is_valid(&self) -> bool {
        self.period_days > 0.0 && self.half_width.value() > 0.0
    }
}

/// One observing target, immutable once parsed from its input line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    /// Right ascension, J2000.
    pub ra: Degrees,
    /// Declination, J2000.
    pub dec: Degrees,
    pub magnitude: Option<f64>,
    /// Present for periodic targets; `None` marks incomplete data and the
    /// target is excluded from periodic enumeration with a soft failure.
    pub ephemeris: Option<Ephemeris>,
    /// Transit depth in parts per thousand.
    pub depth_ppt: Option<f64>,
    pub priority: Option<f64>,
    pub comments: String,
    pub observation_type: ObservationType,
}

impl Target {
    /// Ephemeris check for the periodic path; any-time targets never need one.
    pub fn has_usable_ephemeris(&self) -> bool {
        self.ephemeris.map(|e| e.is_valid()).unwrap_or(false)
    }
}
