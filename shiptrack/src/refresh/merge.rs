//! Merging freshly listed records into the working set.
//!
//! Only records that are currently in transit are eligible for
//! replacement. Each one is matched against the fresh list first by id,
//! then by tracking code. Every other record is left untouched, so a
//! refresh can never drop or reorder the working set.

use std::collections::HashMap;

use crate::shipment::ShipmentRecord;

/// Counts from one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// In-transit records replaced by a fresh copy.
    pub replaced: usize,
    /// In-transit records with no fresh match, kept as they were.
    pub unmatched: usize,
}

/// Lookup over the fresh records by id and by tracking code.
struct FreshIndex<'a> {
    by_id: HashMap<&'a str, &'a ShipmentRecord>,
    by_code: HashMap<&'a str, &'a ShipmentRecord>,
}

impl<'a> FreshIndex<'a> {
    fn build(fresh: &'a [ShipmentRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(fresh.len());
        let mut by_code = HashMap::with_capacity(fresh.len());

        for record in fresh {
            by_id.entry(record.id.as_str()).or_insert(record);
            if let Some(code) = record.tracking_code() {
                by_code.entry(code).or_insert(record);
            }
        }

        Self { by_id, by_code }
    }

    fn find(&self, current: &ShipmentRecord) -> Option<&'a ShipmentRecord> {
        self.by_id.get(current.id.as_str()).copied().or_else(|| {
            current
                .tracking_code()
                .and_then(|code| self.by_code.get(code).copied())
        })
    }
}

/// Replace in-transit records in `current` with their fresh counterparts.
///
/// Length and order of `current` are preserved.
pub fn merge_in_transit(current: &mut [ShipmentRecord], fresh: &[ShipmentRecord]) -> MergeSummary {
    let index = FreshIndex::build(fresh);
    let mut summary = MergeSummary::default();

    for record in current.iter_mut().filter(|r| r.is_in_transit()) {
        match index.find(record) {
            Some(updated) => {
                *record = updated.clone();
                summary.replaced += 1;
            }
            None => summary.unmatched += 1,
        }
    }

    summary
}
