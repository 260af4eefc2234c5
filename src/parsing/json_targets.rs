//! JSON target list parser.
//!
//! The structured alternative to the flat format: an array of objects with
//! decimal fields. Deserialization errors carry the JSON path to the
//! offending field.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::target::{Ephemeris, ObservationType, Target};
use crate::time::JulianDate;
use crate::units::{Degrees, Hours};

#[derive(Debug, Deserialize)]
struct JsonTarget {
    name: String,
    /// Decimal degrees, J2000.
    ra_deg: f64,
    dec_deg: f64,
    #[serde(default)]
    magnitude: Option<f64>,
    #[serde(default)]
    epoch_jd: Option<f64>,
    #[serde(default)]
    epoch_uncertainty: Option<f64>,
    #[serde(default)]
    period_days: Option<f64>,
    #[serde(default)]
    period_uncertainty: Option<f64>,
    /// Full event duration in hours.
    #[serde(default)]
    duration_hours: Option<f64>,
    #[serde(default)]
    comments: String,
    #[serde(default)]
    priority: Option<f64>,
    #[serde(default)]
    depth_ppt: Option<f64>,
    #[serde(default = "default_observation_type")]
    observation_type: String,
}

fn default_observation_type() -> String {
    "periodic".to_string()
}

/// Parse a JSON array of targets.
pub fn parse_targets_json_str(json_str: &str) -> Result<Vec<Target>> {
    let mut deserializer = serde_json::Deserializer::from_str(json_str);
    let raw: Vec<JsonTarget> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| anyhow::anyhow!("at {}: {}", e.path(), e.inner()))
        .context("Failed to parse JSON target list")?;

    raw.into_iter().map(convert).collect()
}

fn convert(raw: JsonTarget) -> Result<Target> {
    let observation_type = match raw.observation_type.to_ascii_lowercase().as_str() {
        "periodic" => ObservationType::Periodic,
        "any_time" | "anytime" => ObservationType::AnyTime,
        "both" => ObservationType::Both,
        other => anyhow::bail!("Target {}: unknown observation type {:?}", raw.name, other),
    };

    if !(0.0..360.0).contains(&raw.ra_deg) {
        anyhow::bail!("Target {}: RA out of range [0, 360): {}", raw.name, raw.ra_deg);
    }
    if !(-90.0..=90.0).contains(&raw.dec_deg) {
        anyhow::bail!("Target {}: Dec out of range [-90, 90]: {}", raw.name, raw.dec_deg);
    }
    if let Some(p) = raw.period_days {
        if p <= 0.0 {
            anyhow::bail!("Target {}: zero or negative period: {}", raw.name, p);
        }
    }

    let ephemeris = match (raw.epoch_jd, raw.period_days, raw.duration_hours) {
        (Some(epoch), Some(period), Some(duration)) if duration > 0.0 => Some(Ephemeris {
            epoch: JulianDate::new(epoch),
            epoch_uncertainty: raw.epoch_uncertainty,
            period_days: period,
            period_uncertainty: raw.period_uncertainty,
            half_width: Hours::new(duration / 2.0),
        }),
        _ => None,
    };

    Ok(Target {
        name: raw.name,
        ra: Degrees::new(raw.ra_deg),
        dec: Degrees::new(raw.dec_deg),
        magnitude: raw.magnitude,
        ephemeris,
        depth_ppt: raw.depth_ppt,
        priority: raw.priority,
        comments: raw.comments,
        observation_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_target_parses() {
        let json = r#"[{"name": "T1", "ra_deg": 150.0, "dec_deg": -20.0}]"#;
        let targets = parse_targets_json_str(json).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].observation_type, ObservationType::Periodic);
        assert!(targets[0].ephemeris.is_none());
    }

    #[test]
    fn full_target_parses() {
        let json = r#"[{
            "name": "WASP-12 b",
            "ra_deg": 97.64,
            "dec_deg": 29.67,
            "magnitude": 11.69,
            "epoch_jd": 2456176.66826,
            "period_days": 1.09142245,
            "duration_hours": 3.0,
            "depth_ppt": 14.0,
            "priority": 3.0,
            "observation_type": "both"
        }]"#;
        let targets = parse_targets_json_str(json).unwrap();
        let t = &targets[0];
        assert_eq!(t.observation_type, ObservationType::Both);
        let eph = t.ephemeris.unwrap();
        assert!((eph.half_width.value() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn error_reports_json_path() {
        let json = r#"[{"name": "T1", "ra_deg": "oops", "dec_deg": 0.0}]"#;
        let err = parse_targets_json_str(json).unwrap_err();
        assert!(format!("{:#}", err).contains("ra_deg"));
    }

    #[test]
    fn bad_period_rejected() {
        let json = r#"[{
            "name": "T1", "ra_deg": 1.0, "dec_deg": 0.0,
            "epoch_jd": 2455000.0, "period_days": -2.0, "duration_hours": 1.0
        }]"#;
        assert!(parse_targets_json_str(json).is_err());
    }
}
