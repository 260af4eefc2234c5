use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::site::{DisplayZone, Site};
use crate::time::JulianDate;
use crate::units::{Degrees, Hours};

/// The requested date window: a base instant plus days forward and backward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Window {
    pub base: JulianDate,
    pub days_forward: f64,
    pub days_backward: f64,
}

impl Window {
    pub fn new(base: JulianDate, days_forward: f64, days_backward: f64) -> Self {
        Self {
            base,
            days_forward,
            days_backward,
        }
    }

    pub fn earliest(&self) -> JulianDate {
        self.base.add_days(-self.days_backward)
    }

    pub fn latest(&self) -> JulianDate {
        self.base.add_days(self.days_forward)
    }
}

/// All user constraints for one request, constructed once at request entry
/// and passed by reference through the engine. There is no ambient state;
/// everything the enumerator needs to make a decision is in here.
#[derive(Debug, Clone)]
pub struct ConstraintBundle {
    pub site: Site,
    pub display_zone: DisplayZone,
    pub window: Window,
    /// Minimum elevation of the target at the event midpoint.
    pub min_mid_elevation: Degrees,
    /// Minimum elevation at ingress OR egress (one side suffices).
    pub min_start_end_elevation: Degrees,
    /// Hour-angle bounds, checked at the event midpoint. Defaults span the
    /// full circle and reject nothing.
    pub min_hour_angle: Hours,
    pub max_hour_angle: Hours,
    /// Out-of-transit baseline before/after the event; 0 disables the extra
    /// sample points.
    pub baseline: Hours,
    /// Sun elevation defining night: -1 (horizon) or -6/-12/-18 twilight.
    pub twilight_elevation: Degrees,
    pub min_priority: Option<f64>,
    pub min_depth_ppt: Option<f64>,
    /// Faint cutoff: targets with magnitude above this are dropped.
    pub max_magnitude: Option<f64>,
    /// Case-insensitive regular expression over target names.
    pub name_filter: Option<String>,
}

impl ConstraintBundle {
    /// A bundle with permissive thresholds for the given site and window.
    pub fn new(site: Site, display_zone: DisplayZone, window: Window) -> Self {
        Self {
            site,
            display_zone,
            window,
            min_mid_elevation: Degrees::new(0.0),
            min_start_end_elevation: Degrees::new(0.0),
            min_hour_angle: Hours::new(-12.0),
            max_hour_angle: Hours::new(12.0),
            baseline: Hours::new(0.0),
            twilight_elevation: Degrees::new(-12.0),
            min_priority: None,
            min_depth_ppt: None,
            max_magnitude: None,
            name_filter: None,
        }
    }

    /// Validate every numeric field before any enumeration runs. The fields
    /// arrive from an untrusted form; nothing here is assumed sane.
    pub fn validate(&self) -> CoreResult<()> {
        let lat = self.site.latitude.value();
        let lon = self.site.longitude.value();
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::InvalidInput(format!("Latitude out of range: {}", lat)));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::InvalidInput(format!("Longitude out of range: {}", lon)));
        }
        if !self.window.base.value().is_finite() {
            return Err(CoreError::InvalidInput("Window base is not a finite JD".into()));
        }
        if self.window.days_forward < 0.0 || !self.window.days_forward.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "Days forward must be non-negative: {}",
                self.window.days_forward
            )));
        }
        if self.window.days_backward < 0.0 || !self.window.days_backward.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "Days backward must be non-negative: {}",
                self.window.days_backward
            )));
        }
        for (label, v) in [
            ("Minimum mid-event elevation", self.min_mid_elevation.value()),
            ("Minimum start/end elevation", self.min_start_end_elevation.value()),
        ] {
            if !(-90.0..=90.0).contains(&v) {
                return Err(CoreError::InvalidInput(format!("{} out of range: {}", label, v)));
            }
        }
        let twilight = self.twilight_elevation.value();
        if !(-18.0..=0.0).contains(&twilight) {
            return Err(CoreError::InvalidInput(format!(
                "Twilight Sun elevation out of range [-18, 0]: {}",
                twilight
            )));
        }
        if self.min_hour_angle.value() > self.max_hour_angle.value() {
            return Err(CoreError::InvalidInput(format!(
                "Hour angle bounds inverted: {} > {}",
                self.min_hour_angle.value(),
                self.max_hour_angle.value()
            )));
        }
        if self.baseline.value() < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "Baseline must be non-negative: {}",
                self.baseline.value()
            )));
        }
        if let Some(pattern) = &self.name_filter {
            regex::RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    CoreError::InvalidInput(format!("Bad name filter pattern: {}", e))
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> ConstraintBundle {
        ConstraintBundle::new(
            Site::new(31.68, -110.88),
            DisplayZone::Utc,
            Window::new(JulianDate::new(2_460_676.5), 10.0, 0.0),
        )
    }

    #[test]
    fn default_bundle_is_valid() {
        assert!(bundle().validate().is_ok());
    }

    #[test]
    fn window_bounds() {
        let w = Window::new(JulianDate::new(100.0), 10.0, 2.0);
        assert_eq!(w.earliest().value(), 98.0);
        assert_eq!(w.latest().value(), 110.0);
    }

    #[test]
    fn rejects_negative_window() {
        let mut b = bundle();
        b.window.days_forward = -1.0;
        assert!(b.validate().is_err());
    }

    #[test]
    fn rejects_inverted_hour_angles() {
        let mut b = bundle();
        b.min_hour_angle = Hours::new(3.0);
        b.max_hour_angle = Hours::new(-3.0);
        assert!(b.validate().is_err());
    }

    #[test]
    fn rejects_bad_twilight() {
        let mut b = bundle();
        b.twilight_elevation = Degrees::new(-30.0);
        assert!(b.validate().is_err());
    }

    #[test]
    fn rejects_bad_regex() {
        let mut b = bundle();
        b.name_filter = Some("[unclosed".to_string());
        assert!(b.validate().is_err());
    }
}
