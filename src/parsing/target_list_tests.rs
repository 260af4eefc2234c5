use crate::models::target::ObservationType;
use crate::parsing::target_list::parse_target_list;

const FULL_LINE: &str = "HD 189733 b ,. 20:00:43.7 ,. +22:42:39 ,. 7.67 ,. \
    2453988.80336+/-0.00023 ,. 2.21857567+/-0.00000015 ,. 1.827 ,. \
    hot Jupiter, very deep ,. 5.0 ,. 24.1 ,. 1";

#[test]
fn full_line_parses_every_field() {
    let summary = parse_target_list(FULL_LINE);
    assert!(summary.errors.is_empty());
    assert_eq!(summary.targets.len(), 1);

    let t = &summary.targets[0];
    assert_eq!(t.name, "HD 189733 b");
    assert!((t.ra.value() - (20.0 + 43.7 / 3600.0) * 15.0).abs() < 1e-9);
    assert!((t.dec.value() - (22.0 + 42.0 / 60.0 + 39.0 / 3600.0)).abs() < 1e-9);
    assert_eq!(t.magnitude, Some(7.67));
    assert_eq!(t.priority, Some(5.0));
    assert_eq!(t.depth_ppt, Some(24.1));
    assert_eq!(t.observation_type, ObservationType::Periodic);
    // embedded comma survives in the comments field
    assert_eq!(t.comments, "hot Jupiter, very deep");

    let eph = t.ephemeris.expect("ephemeris");
    assert!((eph.epoch.value() - 2_453_988.80336).abs() < 1e-9);
    assert_eq!(eph.epoch_uncertainty, Some(0.00023));
    assert!((eph.period_days - 2.21857567).abs() < 1e-12);
    assert_eq!(eph.period_uncertainty, Some(0.00000015));
    // half-width is half the listed duration
    assert!((eph.half_width.value() - 1.827 / 2.0).abs() < 1e-12);
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let input = format!("# header comment\n\n{}\n   \n", FULL_LINE);
    let summary = parse_target_list(&input);
    assert_eq!(summary.targets.len(), 1);
    assert!(summary.errors.is_empty());
}

#[test]
fn decimal_coordinates_accepted() {
    let summary = parse_target_list("T1 ,. 12.5 ,. -45.25 ,. 9.0");
    assert_eq!(summary.targets.len(), 1);
    let t = &summary.targets[0];
    assert!((t.ra.value() - 12.5 * 15.0).abs() < 1e-9);
    assert!((t.dec.value() + 45.25).abs() < 1e-9);
    assert!(t.ephemeris.is_none());
}

#[test]
fn missing_period_leaves_ephemeris_incomplete() {
    // epoch and duration present, period blank: line parses, no ephemeris
    let summary = parse_target_list(
        "T2 ,. 10:00:00 ,. +10:00:00 ,. 11.0 ,. 2455000.5 ,. ,. 2.0 ,. ,. ,. ,. 1",
    );
    assert!(summary.errors.is_empty());
    assert_eq!(summary.targets.len(), 1);
    assert!(summary.targets[0].ephemeris.is_none());
}

#[test]
fn malformed_line_is_recorded_and_rest_survive() {
    let input = format!(
        "{}\nbroken ,. not-a-coordinate ,. +10:00:00\n{}",
        FULL_LINE,
        "T3 ,. 01:00:00 ,. -05:00:00 ,. 12.0"
    );
    let summary = parse_target_list(&input);
    assert_eq!(summary.targets.len(), 2);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].line, 2);
    assert!(summary.errors[0].message.contains("not-a-coordinate"));
}

#[test]
fn negative_period_is_a_line_error() {
    let summary = parse_target_list(
        "T4 ,. 01:00:00 ,. -05:00:00 ,. 12.0 ,. 2455000.5 ,. -3.0 ,. 2.0",
    );
    assert!(summary.targets.is_empty());
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].message.contains("period"));
}

#[test]
fn observation_type_codes_map() {
    let input = "\
P ,. 01:00:00 ,. 00:00:00 ,. 9.0 ,. 2455000.5 ,. 1.0 ,. 2.0 ,. c ,. 1 ,. 1 ,. 1\n\
A ,. 02:00:00 ,. 00:00:00 ,. 9.0 ,. ,. ,. ,. c ,. 1 ,. 1 ,. 2\n\
B ,. 03:00:00 ,. 00:00:00 ,. 9.0 ,. 2455000.5 ,. 1.0 ,. 2.0 ,. c ,. 1 ,. 1 ,. 3";
    let summary = parse_target_list(input);
    assert!(summary.errors.is_empty());
    let types: Vec<_> = summary
        .targets
        .iter()
        .map(|t| t.observation_type)
        .collect();
    assert_eq!(
        types,
        vec![
            ObservationType::Periodic,
            ObservationType::AnyTime,
            ObservationType::Both
        ]
    );
}

#[test]
fn unknown_type_code_is_rejected() {
    let summary = parse_target_list(
        "T5 ,. 01:00:00 ,. 00:00:00 ,. 9.0 ,. ,. ,. ,. ,. ,. ,. 7",
    );
    assert!(summary.targets.is_empty());
    assert_eq!(summary.errors.len(), 1);
}

#[test]
fn unicode_uncertainty_separator_accepted() {
    let summary =
        parse_target_list("T6 ,. 01:00:00 ,. 00:00:00 ,. 9.0 ,. 2455000.5±0.001 ,. 1.0 ,. 2.0");
    assert!(summary.errors.is_empty());
    let eph = summary.targets[0].ephemeris.unwrap();
    assert_eq!(eph.epoch_uncertainty, Some(0.001));
}

#[test]
fn too_few_fields_is_an_error() {
    let summary = parse_target_list("lonely-name ,. 01:00:00");
    assert!(summary.targets.is_empty());
    assert_eq!(summary.errors.len(), 1);
}
