use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::units::Degrees;

/// Observing site on the Earth. Longitude is east-positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Site {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl Site {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        }
    }
}

/// Timezone used for displayed civil times.
///
/// Accepts either an IANA identifier ("America/Phoenix") or a fixed UTC
/// offset ("-7", "+05:30"). Night labels never use this zone; they come from
/// the longitude-derived offset in `time::night_label_zone`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayZone {
    Utc,
    Fixed(FixedOffset),
    Named(Tz),
}

impl DisplayZone {
    /// Parse a zone string. Fixed offsets are tried first, then IANA names.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("utc") {
            return Some(DisplayZone::Utc);
        }
        if let Some(offset) = parse_fixed_offset(trimmed) {
            return Some(DisplayZone::Fixed(offset));
        }
        trimmed.parse::<Tz>().ok().map(DisplayZone::Named)
    }

    /// Convert a UTC instant into this zone.
    pub fn to_local(&self, dt: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            DisplayZone::Utc => dt.fixed_offset(),
            DisplayZone::Fixed(offset) => dt.with_timezone(offset),
            DisplayZone::Named(tz) => dt.with_timezone(tz).fixed_offset(),
        }
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        DisplayZone::Utc
    }
}

/// Parse strings like "-7", "+5", "+05:30" into a fixed offset.
fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let (hours, minutes) = if let Some((h, m)) = rest.split_once(':') {
        (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?)
    } else {
        (rest.parse::<i32>().ok()?, 0)
    };

    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// One catalog entry for a named observatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observatory {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    /// East-positive degrees.
    pub longitude: f64,
    pub timezone: String,
}

/// Observatory catalog file layout (TOML, `[[observatory]]` tables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservatoryCatalog {
    #[serde(default)]
    pub observatory: Vec<Observatory>,
}

macro_rules! obs {
    ($id:expr, $name:expr, $lat:expr, $lon:expr, $tz:expr) => {
        Observatory {
            id: $id.to_string(),
            name: $name.to_string(),
            latitude: $lat,
            longitude: $lon,
            timezone: $tz.to_string(),
        }
    };
}

/// Built-in observatory table; a TOML catalog can extend or override it.
pub static BUILTIN_OBSERVATORIES: Lazy<Vec<Observatory>> = Lazy::new(|| {
    vec![
        obs!("flwo", "Fred Lawrence Whipple Observatory", 31.6811, -110.8783, "America/Phoenix"),
        obs!("kpno", "Kitt Peak National Observatory", 31.9633, -111.6000, "America/Phoenix"),
        obs!("mcdonald", "McDonald Observatory", 30.6717, -104.0217, "America/Chicago"),
        obs!("maunakea", "Mauna Kea Observatories", 19.8267, -155.4717, "Pacific/Honolulu"),
        obs!("palomar", "Palomar Observatory", 33.3563, -116.8650, "America/Los_Angeles"),
        obs!("ctio", "Cerro Tololo Inter-American Observatory", -30.1692, -70.8067, "America/Santiago"),
        obs!("lasilla", "La Silla Observatory", -29.2567, -70.7300, "America/Santiago"),
        obs!("paranal", "Paranal Observatory", -24.6272, -70.4050, "America/Santiago"),
        obs!("orm", "Roque de los Muchachos Observatory", 28.7636, -17.8947, "Atlantic/Canary"),
        obs!("calaralto", "Calar Alto Observatory", 37.2236, -2.5461, "Europe/Madrid"),
        obs!("saao", "South African Astronomical Observatory", -32.3783, 20.8117, "Africa/Johannesburg"),
        obs!("sso", "Siding Spring Observatory", -31.2733, 149.0617, "Australia/Sydney"),
    ]
});

/// How the request selects its site: a catalog entry by id, or manual
/// coordinates with an explicit timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SiteSelection {
    Named { id: String },
    Manual {
        latitude: f64,
        longitude: f64,
        timezone: String,
    },
}

impl SiteSelection {
    /// Resolve against a catalog into a concrete site and display zone.
    pub fn resolve(&self, catalog: &[Observatory]) -> CoreResult<(Site, DisplayZone)> {
        match self {
            SiteSelection::Named { id } => {
                let entry = catalog
                    .iter()
                    .find(|o| o.id.eq_ignore_ascii_case(id))
                    .ok_or_else(|| CoreError::UnknownObservatory(id.clone()))?;
                let zone = DisplayZone::parse(&entry.timezone).ok_or_else(|| {
                    CoreError::InvalidInput(format!(
                        "Observatory {} has unparseable timezone: {}",
                        entry.id, entry.timezone
                    ))
                })?;
                Ok((Site::new(entry.latitude, entry.longitude), zone))
            }
            SiteSelection::Manual {
                latitude,
                longitude,
                timezone,
            } => {
                if !(-90.0..=90.0).contains(latitude) {
                    return Err(CoreError::InvalidInput(format!(
                        "Latitude out of range: {}",
                        latitude
                    )));
                }
                if !(-180.0..=180.0).contains(longitude) {
                    return Err(CoreError::InvalidInput(format!(
                        "Longitude out of range: {}",
                        longitude
                    )));
                }
                let zone = DisplayZone::parse(timezone).ok_or_else(|| {
                    CoreError::InvalidInput(format!("Unparseable timezone: {}", timezone))
                })?;
                Ok((Site::new(*latitude, *longitude), zone))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn parse_fixed_offsets() {
        assert_eq!(
            DisplayZone::parse("-7"),
            Some(DisplayZone::Fixed(FixedOffset::west_opt(7 * 3600).unwrap()))
        );
        assert_eq!(
            DisplayZone::parse("+05:30"),
            Some(DisplayZone::Fixed(
                FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
            ))
        );
        assert_eq!(DisplayZone::parse("UTC"), Some(DisplayZone::Utc));
        assert_eq!(DisplayZone::parse("not/azone"), None);
    }

    #[test]
    fn parse_named_zone() {
        let zone = DisplayZone::parse("America/Phoenix").unwrap();
        let utc = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        // Phoenix has no DST: always UTC-7
        assert_eq!(zone.to_local(utc).hour(), 5);
    }

    #[test]
    fn resolve_named_observatory() {
        let sel = SiteSelection::Named { id: "FLWO".to_string() };
        let (site, _zone) = sel.resolve(&BUILTIN_OBSERVATORIES).unwrap();
        assert!((site.latitude.value() - 31.6811).abs() < 1e-6);
    }

    #[test]
    fn resolve_unknown_observatory_fails() {
        let sel = SiteSelection::Named { id: "atlantis".to_string() };
        assert!(matches!(
            sel.resolve(&BUILTIN_OBSERVATORIES),
            Err(CoreError::UnknownObservatory(_))
        ));
    }

    #[test]
    fn resolve_manual_rejects_bad_latitude() {
        let sel = SiteSelection::Manual {
            latitude: 95.0,
            longitude: 0.0,
            timezone: "UTC".to_string(),
        };
        assert!(matches!(
            sel.resolve(&BUILTIN_OBSERVATORIES),
            Err(CoreError::InvalidInput(_))
        ));
    }
}
