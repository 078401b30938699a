use std::collections::{BTreeMap, btree_map::Entry};

use crate::types::RawCandle;

/// Merge page fragments into one ascending series.
///
/// - Candles are keyed by `time`; the first appearance wins for duplicates,
///   so a boundary candle shared by two adjacent pages is kept once.
/// - The result is sorted by timestamp regardless of the fragments' order.
pub fn merge_fragments<I>(fragments: I) -> Vec<RawCandle>
where
    I: IntoIterator<Item = Vec<RawCandle>>,
{
    let mut map: BTreeMap<i64, RawCandle> = BTreeMap::new();
    for fragment in fragments {
        for c in fragment {
            if let Entry::Vacant(v) = map.entry(c.time) {
                v.insert(c);
            }
        }
    }
    map.into_values().collect()
}
