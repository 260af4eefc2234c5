use anyhow::{Context, Result};
use chrono::{DateTime, Duration, FixedOffset};
use std::io::Write;

use crate::models::event::EventRecord;
use crate::models::site::DisplayZone;

/// Header of the calendar-import CSV.
const HEADER: [&str; 7] = [
    "Subject",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "AllDayFlag",
    "Description",
];

/// Write events as a calendar-import CSV. Times are expressed in the given
/// display zone and rounded to the nearest minute.
pub fn write_calendar_csv<W: Write>(
    writer: W,
    events: &[EventRecord],
    zone: &DisplayZone,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .context("Failed to write calendar CSV header")?;

    for event in events {
        let start = event
            .start_utc()
            .map(|dt| zone.to_local(dt))
            .context("Event start not representable as civil time")?;
        let end = event
            .end_utc()
            .map(|dt| zone.to_local(dt))
            .context("Event end not representable as civil time")?;

        let start = round_to_minute(start);
        let end = round_to_minute(end);

        let description = describe(event);
        csv_writer
            .write_record(&[
                event.target_name.clone(),
                start.format("%m/%d/%Y").to_string(),
                start.format("%H:%M").to_string(),
                end.format("%m/%d/%Y").to_string(),
                end.format("%H:%M").to_string(),
                "FALSE".to_string(),
                description,
            ])
            .with_context(|| format!("Failed to write calendar row for {}", event.target_name))?;
    }

    csv_writer.flush().context("Failed to flush calendar CSV")?;
    Ok(())
}

fn round_to_minute(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let shifted = dt + Duration::seconds(30);
    shifted - Duration::seconds(shifted.timestamp() % 60)
}

fn describe(event: &EventRecord) -> String {
    let mut parts = vec![format!(
        "Elevation {:.0}/{:.0}/{:.0} deg",
        event.start.elevation.value(),
        event.mid.elevation.value(),
        event.end.elevation.value()
    )];
    if let Some(moon) = &event.moon {
        parts.push(format!(
            "Moon {:.0} deg away, {:.0}% illuminated",
            moon.separation.value(),
            moon.illuminated_fraction * 100.0
        ));
    }
    if event.starts_before_sunset {
        parts.push("starts in daylight".to_string());
    }
    if event.ends_after_sunrise {
        parts.push("ends in daylight".to_string());
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventSample;
    use crate::time::JulianDate;
    use crate::units::{Degrees, Hours};
    use chrono::NaiveDate;

    fn sample(jd: f64, elevation: f64) -> EventSample {
        EventSample {
            instant: JulianDate::new(jd),
            elevation: Degrees::new(elevation),
            azimuth: Degrees::new(180.0),
            hour_angle: Hours::new(0.0),
            daytime: false,
        }
    }

    fn record() -> EventRecord {
        EventRecord {
            target_name: "HD 189733 b".to_string(),
            midpoint: JulianDate::new(2_451_545.0),
            start: sample(2_451_544.958, 40.0),
            mid: sample(2_451_545.0, 45.0),
            end: sample(2_451_545.042, 42.0),
            pre_baseline: None,
            post_baseline: None,
            starts_before_sunset: false,
            middle_in_daytime: false,
            ends_after_sunrise: false,
            night_start: JulianDate::new(2_451_544.7),
            night_end: JulianDate::new(2_451_545.2),
            night: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            moon: None,
            night_run: 1,
        }
    }

    #[test]
    fn writes_header_and_one_row_per_event() {
        let mut buffer = Vec::new();
        write_calendar_csv(&mut buffer, &[record()], &DisplayZone::Utc).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Subject,Start Date,Start Time"));
        assert!(lines[1].starts_with("HD 189733 b,"));
    }

    #[test]
    fn times_round_to_the_minute() {
        let mut buffer = Vec::new();
        // start at 2451544.958 JD = 10:59:31 UTC, rounds to 11:00
        write_calendar_csv(&mut buffer, &[record()], &DisplayZone::Utc).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("11:00"), "got: {}", text);
    }

    #[test]
    fn times_follow_the_display_zone() {
        let mut buffer = Vec::new();
        let zone = DisplayZone::parse("-7").unwrap();
        write_calendar_csv(&mut buffer, &[record()], &zone).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        // mid 12:00 UTC -> start 11:00 UTC -> 04:00 local
        assert!(text.contains("04:00"), "got: {}", text);
    }

    #[test]
    fn empty_event_list_writes_header_only() {
        let mut buffer = Vec::new();
        write_calendar_csv(&mut buffer, &[], &DisplayZone::Utc).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
