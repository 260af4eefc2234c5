//! Request orchestration: one call runs the whole visibility pass for a
//! target list against a constraint bundle.
//!
//! Per-target problems (missing ephemeris, bad period) are collected as
//! soft failures and reported in the summary; internal invariant violations
//! abort the request immediately.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::geometry::Provider;
use crate::models::constraints::ConstraintBundle;
use crate::models::event::{EventRecord, PeakRecord};
use crate::models::target::Target;
use crate::services::aggregator::{annotate_night_runs, sort_chronological};
use crate::services::anytime::nightly_peak;
use crate::services::enumerator::enumerate_events;
use crate::services::sun_events::SunEventSet;
use crate::transformations::filter_targets;

/// A target excluded from the run, with the reason shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedTarget {
    pub name: String,
    pub reason: String,
}

/// Everything one request produces: accepted events sorted chronologically
/// and annotated with night runs, any-time peaks, and the incomplete-data
/// summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    pub events: Vec<EventRecord>,
    pub peaks: Vec<PeakRecord>,
    pub skipped: Vec<SkippedTarget>,
}

impl PredictionReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.peaks.is_empty()
    }
}

/// Run the full visibility pass. The target list and bundle are read-only;
/// each target's enumeration is independent of the others.
pub fn run_prediction(
    targets: &[Target],
    bundle: &ConstraintBundle,
    provider: &dyn Provider,
) -> CoreResult<PredictionReport> {
    bundle.validate()?;

    let sun_events = SunEventSet::build(
        provider,
        &bundle.site,
        &bundle.window,
        bundle.twilight_elevation,
    )?;

    let selected = filter_targets(targets, bundle)?;

    let mut events: Vec<EventRecord> = Vec::new();
    let mut peaks: Vec<PeakRecord> = Vec::new();
    let mut skipped: Vec<SkippedTarget> = Vec::new();

    for target in selected {
        if target.observation_type.is_periodic() {
            if !target.has_usable_ephemeris() {
                log::warn!("Skipping {}: incomplete ephemeris", target.name);
                skipped.push(SkippedTarget {
                    name: target.name.clone(),
                    reason: "incomplete ephemeris".to_string(),
                });
            } else {
                match enumerate_events(target, bundle, &sun_events, provider, false) {
                    Ok(out) => events.extend(out.records),
                    Err(e) if e.is_internal() => return Err(e),
                    Err(e) => {
                        log::warn!("Skipping {}: {}", target.name, e);
                        skipped.push(SkippedTarget {
                            name: target.name.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        if target.observation_type.is_any_time() {
            match nightly_peak(target, bundle, &sun_events, provider) {
                Ok(Some(peak)) => peaks.push(peak),
                Ok(None) => {}
                Err(e) if e.is_internal() => return Err(e),
                Err(e) => {
                    log::warn!("Skipping {} (any-time): {}", target.name, e);
                    skipped.push(SkippedTarget {
                        name: target.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    sort_chronological(&mut events);
    annotate_night_runs(&mut events);
    peaks.sort_by(|a, b| {
        a.peak
            .instant
            .value()
            .partial_cmp(&b.peak.instant.value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(PredictionReport {
        events,
        peaks,
        skipped,
    })
}
