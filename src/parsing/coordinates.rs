//! Right ascension and declination parsing.
//!
//! Both coordinates accept either colon-separated sexagesimal
//! ("20:00:43.7", "+22:42:39") or plain decimal values. RA is given in
//! hours, declination in degrees.

/// Parse a right ascension in hours. Accepts "hh:mm:ss.s" or decimal hours.
pub fn parse_ra_hours(s: &str) -> Result<f64, String> {
    let hours = parse_sexagesimal(s)?;
    if !(0.0..24.0).contains(&hours) {
        return Err(format!("RA out of range [0, 24): {}", s.trim()));
    }
    Ok(hours)
}

/// Parse a declination in degrees. Accepts "±dd:mm:ss" or decimal degrees.
pub fn parse_dec_degrees(s: &str) -> Result<f64, String> {
    let degrees = parse_sexagesimal(s)?;
    if !(-90.0..=90.0).contains(&degrees) {
        return Err(format!("Dec out of range [-90, 90]: {}", s.trim()));
    }
    Ok(degrees)
}

/// Parse "d:m:s", "d:m" or a plain decimal, preserving the sign of the
/// leading component even when it is "-00".
fn parse_sexagesimal(s: &str) -> Result<f64, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Empty coordinate field".to_string());
    }

    if !trimmed.contains(':') {
        return trimmed
            .parse::<f64>()
            .map_err(|_| format!("Unparseable coordinate: {}", trimmed));
    }

    let negative = trimmed.starts_with('-');
    let unsigned = trimmed.trim_start_matches(['+', '-']);

    let mut value = 0.0;
    let mut scale = 1.0;
    let parts: Vec<&str> = unsigned.split(':').collect();
    if parts.len() > 3 {
        return Err(format!("Too many sexagesimal components: {}", trimmed));
    }
    for part in &parts {
        let component = part
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Unparseable coordinate component: {}", trimmed))?;
        if component < 0.0 {
            return Err(format!("Sign inside sexagesimal component: {}", trimmed));
        }
        value += component / scale;
        scale *= 60.0;
    }

    Ok(if negative { -value } else { value })
}
