//! Lot Grouper
//!
//! Partitions raw records by resolved lot id. Records without an id are
//! skipped; within a group, input order is kept.

use std::collections::BTreeMap;

use lot_dashboard_core::RawRecord;

use super::extractor::FieldExtractor;

/// Lot id to the records that resolved to it, in input order
pub type LotGroups<'a> = BTreeMap<String, Vec<&'a RawRecord>>;

/// Groups records using a [`FieldExtractor`]
#[derive(Debug, Clone)]
pub struct LotGrouper {
    extractor: FieldExtractor,
}

impl LotGrouper {
    pub fn new(extractor: FieldExtractor) -> Self {
        Self { extractor }
    }

    /// Group all records in one pass
    pub fn group<'a>(&self, records: &'a [RawRecord]) -> LotGroups<'a> {
        let mut groups = LotGroups::new();
        let skipped = self.group_into(&mut groups, records);
        if skipped > 0 {
            tracing::debug!("[Grouper] {} records had no lot id", skipped);
        }
        groups
    }

    /// Group records in batches, yielding to the runtime between batches.
    ///
    /// Produces exactly the same groups as [`LotGrouper::group`].
    pub async fn group_in_batches<'a>(
        &self,
        records: &'a [RawRecord],
        batch_size: usize,
    ) -> LotGroups<'a> {
        let mut groups = LotGroups::new();
        let mut skipped = 0;
        for batch in records.chunks(batch_size.max(1)) {
            skipped += self.group_into(&mut groups, batch);
            tokio::task::yield_now().await;
        }
        if skipped > 0 {
            tracing::debug!("[Grouper] {} records had no lot id", skipped);
        }
        groups
    }

    /// Returns the number of records skipped
    fn group_into<'a>(&self, groups: &mut LotGroups<'a>, records: &'a [RawRecord]) -> usize {
        let mut skipped = 0;
        for record in records {
            match self.extractor.extract(record) {
                Some(id) => groups.entry(id).or_default().push(record),
                None => skipped += 1,
            }
        }
        skipped
    }
}
