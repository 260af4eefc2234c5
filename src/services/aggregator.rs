//! Cross-target aggregation: chronological ordering and the same-night run
//! annotation used to merge rows under one spanning night label.

use std::cmp::Ordering;

use crate::models::event::EventRecord;

/// Sort records by midpoint JD ascending. The sort is stable, so records
/// with identical midpoints keep their input order.
pub fn sort_chronological(records: &mut [EventRecord]) {
    records.sort_by(|a, b| {
        a.midpoint
            .value()
            .partial_cmp(&b.midpoint.value())
            .unwrap_or(Ordering::Equal)
    });
}

/// Recompute the same-night run annotation: the first record of each
/// contiguous run sharing a night label gets the run's length, the rest get
/// zero. Only meaningful on a sorted slice; call it after every sort, never
/// before.
pub fn annotate_night_runs(records: &mut [EventRecord]) {
    let mut i = 0;
    while i < records.len() {
        let mut j = i + 1;
        while j < records.len() && records[j].night == records[i].night {
            j += 1;
        }
        records[i].night_run = (j - i) as u32;
        for k in i + 1..j {
            records[k].night_run = 0;
        }
        i = j;
    }
}
