use serde::{Deserialize, Serialize};

/// Angle in degrees. Thin wrapper around `f64`, kept deliberately minimal;
/// trigonometry goes through `value()`/`to_radians()`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Degrees(f64);

impl Degrees {
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    /// Raw value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn to_radians(&self) -> f64 {
        self.0.to_radians()
    }

    pub fn from_radians(r: f64) -> Self {
        Self(r.to_degrees())
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Degrees::new(v)
    }
}

impl std::fmt::Display for Degrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}

/// Time span in hours.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Hours(f64);

impl Hours {
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn to_days(&self) -> f64 {
        self.0 / 24.0
    }

    pub fn from_days(d: f64) -> Self {
        Self(d * 24.0)
    }
}

impl From<f64> for Hours {
    fn from(v: f64) -> Self {
        Hours::new(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_radians_roundtrip() {
        let d = Degrees::new(123.456);
        let back = Degrees::from_radians(d.to_radians());
        assert!((d.value() - back.value()).abs() < 1e-12);
    }

    #[test]
    fn hours_to_days() {
        assert_eq!(Hours::new(12.0).to_days(), 0.5);
        assert_eq!(Hours::from_days(1.5).value(), 36.0);
    }
}
