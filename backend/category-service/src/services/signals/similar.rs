use crate::models::{CategoryId, DeviceId, PreferenceWeights};
use std::collections::HashSet;

/// Collect the categories preferred by devices similar to `device`.
///
/// A device is similar when its preferred set shares at least one category
/// with `preferred`. The requesting device itself is skipped.
pub fn similar_device_category_ids<'a, I>(
    device: &DeviceId,
    preferred: &HashSet<CategoryId>,
    devices: I,
) -> HashSet<CategoryId>
where
    I: IntoIterator<Item = (&'a DeviceId, &'a PreferenceWeights)>,
{
    let mut result = HashSet::new();
    if preferred.is_empty() {
        return result;
    }

    for (other, weights) in devices {
        if other == device {
            continue;
        }
        let other_preferred = weights.preferred_ids();
        if !other_preferred.is_disjoint(preferred) {
            result.extend(other_preferred);
        }
    }

    result
}
