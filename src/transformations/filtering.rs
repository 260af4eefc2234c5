//! Target selection filters applied before any enumeration runs.

use regex::RegexBuilder;

use crate::error::{CoreError, CoreResult};
use crate::models::constraints::ConstraintBundle;
use crate::models::target::Target;

/// Select the targets passing the bundle's priority, depth, magnitude and
/// name filters. Targets missing a filtered field are kept: a filter only
/// rejects values it can see.
pub fn filter_targets<'a>(
    targets: &'a [Target],
    bundle: &ConstraintBundle,
) -> CoreResult<Vec<&'a Target>> {
    let name_re = match &bundle.name_filter {
        Some(pattern) => Some(
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| CoreError::InvalidInput(format!("Bad name filter pattern: {}", e)))?,
        ),
        None => None,
    };

    Ok(targets
        .iter()
        .filter(|t| {
            if let (Some(min), Some(p)) = (bundle.min_priority, t.priority) {
                if p < min {
                    return false;
                }
            }
            if let (Some(min), Some(d)) = (bundle.min_depth_ppt, t.depth_ppt) {
                if d < min {
                    return false;
                }
            }
            if let (Some(max), Some(m)) = (bundle.max_magnitude, t.magnitude) {
                if m > max {
                    return false;
                }
            }
            if let Some(re) = &name_re {
                if !re.is_match(&t.name) {
                    return false;
                }
            }
            true
        })
        .collect())
}
