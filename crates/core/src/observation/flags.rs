//! Boolean flag counter for the observational pipeline.

use std::collections::BTreeMap;

use super::context::Spot;

/// Count truthy occurrences of each configured flag field.
///
/// Each flag reports as the literal string `"<count> of <n> spots"`.
pub fn count(fields: &[String], spots: &[Spot]) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for field in fields {
        let hits = spots.iter().filter(|spot| spot.field(field).is_truthy()).count();
        out.insert(field.clone(), format!("{hits} of {} spots", spots.len()));
    }
    out
}
