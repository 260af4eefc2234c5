//! Parser for the flat delimited target list format.
//!
//! One target per line, fields separated by the `,.` token so names and
//! comments may contain plain commas:
//!
//! ```text
//! name ,. RA ,. Dec ,. mag ,. epoch[+/-unc] ,. period[+/-unc] ,.
//! duration_hours ,. comments ,. priority ,. depth_ppt ,. type_code
//! ```
//!
//! Trailing fields may be omitted. A malformed line is skipped and recorded
//! in the summary; it never aborts the batch. A periodic target whose
//! ephemeris fields are merely absent parses fine with no ephemeris and is
//! excluded later with an incomplete-data entry.

use crate::models::target::{Ephemeris, ObservationType, Target};
use crate::parsing::coordinates::{parse_dec_degrees, parse_ra_hours};
use crate::time::JulianDate;
use crate::units::{Degrees, Hours};

/// Field separator token. A bare comma is data, not a separator.
pub const FIELD_SEPARATOR: &str = ",.";

/// One rejected input line.
#[derive(Debug, Clone)]
pub struct LineError {
    /// 1-based line number in the input.
    pub line: usize,
    pub message: String,
}

/// Parse outcome: every well-formed target plus every rejected line.
#[derive(Debug, Clone, Default)]
pub struct ParseSummary {
    pub targets: Vec<Target>,
    pub errors: Vec<LineError>,
}

/// Parse a whole target list. Blank lines and `#` comments are ignored.
pub fn parse_target_list(input: &str) -> ParseSummary {
    let mut summary = ParseSummary::default();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Ok(target) => summary.targets.push(target),
            Err(message) => {
                log::warn!("Target list line {}: {}", idx + 1, message);
                summary.errors.push(LineError {
                    line: idx + 1,
                    message,
                });
            }
        }
    }

    summary
}

fn parse_line(line: &str) -> Result<Target, String> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() < 3 {
        return Err(format!(
            "Expected at least name, RA and Dec, found {} field(s)",
            fields.len()
        ));
    }

    let name = fields[0];
    if name.is_empty() {
        return Err("Empty target name".to_string());
    }

    let ra_hours = parse_ra_hours(fields[1])?;
    let dec_degrees = parse_dec_degrees(fields[2])?;

    let magnitude = parse_optional(fields.get(3), "magnitude")?;
    let (epoch, epoch_uncertainty) = parse_optional_uncertain(fields.get(4), "epoch")?;
    let (period, period_uncertainty) = parse_optional_uncertain(fields.get(5), "period")?;
    let duration_hours = parse_optional(fields.get(6), "duration")?;
    let comments = fields.get(7).copied().unwrap_or_default().to_string();
    let priority = parse_optional(fields.get(8), "priority")?;
    let depth_ppt = parse_optional(fields.get(9), "depth")?;

    let observation_type = match fields.get(10).copied().filter(|s| !s.is_empty()) {
        None => ObservationType::Periodic,
        Some(code) => code
            .parse::<u8>()
            .ok()
            .and_then(ObservationType::from_code)
            .ok_or_else(|| format!("Bad observation type code: {}", code))?,
    };

    if let Some(p) = period {
        if p <= 0.0 {
            return Err(format!("Zero or negative period: {}", p));
        }
    }
    if let Some(d) = duration_hours {
        if d <= 0.0 {
            return Err(format!("Zero or negative event duration: {}", d));
        }
    }

    let ephemeris = match (epoch, period, duration_hours) {
        (Some(e), Some(p), Some(d)) => Some(Ephemeris {
            epoch: JulianDate::new(e),
            epoch_uncertainty,
            period_days: p,
            period_uncertainty,
            half_width: Hours::new(d / 2.0),
        }),
        _ => None,
    };

    Ok(Target {
        name: name.to_string(),
        ra: Degrees::new(ra_hours * 15.0),
        dec: Degrees::new(dec_degrees),
        magnitude,
        ephemeris,
        depth_ppt,
        priority,
        comments,
        observation_type,
    })
}

fn parse_optional(field: Option<&&str>, label: &str) -> Result<Option<f64>, String> {
    match field.copied().filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("Unparseable {} value: {}", label, s)),
    }
}

/// Parse "value", "value+/-uncertainty" or "value±uncertainty".
fn parse_optional_uncertain(
    field: Option<&&str>,
    label: &str,
) -> Result<(Option<f64>, Option<f64>), String> {
    let raw = match field.copied().filter(|s| !s.is_empty()) {
        None => return Ok((None, None)),
        Some(s) => s,
    };

    let (value_str, unc_str) = if let Some((v, u)) = raw.split_once("+/-") {
        (v, Some(u))
    } else if let Some((v, u)) = raw.split_once('±') {
        (v, Some(u))
    } else {
        (raw, None)
    };

    let value = value_str
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Unparseable {} value: {}", label, raw))?;

    let uncertainty = match unc_str {
        None => None,
        Some(u) => Some(
            u.trim()
                .parse::<f64>()
                .map_err(|_| format!("Unparseable {} uncertainty: {}", label, raw))?,
        ),
    };

    Ok((Some(value), uncertainty))
}
