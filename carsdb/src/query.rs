//! Read only query surface over the published snapshot.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use crate::snapshot::Snapshot;
use crate::store::SnapshotRx;
use crate::types::{Field, project};

/// Sort direction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = ();

    /// Parses the wire names `asc` and `desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(()),
        }
    }
}

/// Serves lookup and listing queries against the current snapshot.
///
/// Every operation reads the published snapshot reference exactly once, then
/// works off that snapshot for its whole duration. Operations never block on
/// a refresh in progress and never mutate anything.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    snapshot_rx: SnapshotRx,
}

impl QueryEngine {
    /// Creates an engine reading from the given snapshot receiver.
    pub fn new(snapshot_rx: SnapshotRx) -> Self {
        Self { snapshot_rx }
    }

    /// Returns the sorted, duplicate free list of known brands.
    pub fn brands(&self) -> Vec<String> {
        self.snapshot().brands().to_vec()
    }

    /// Returns the record with the given identifier projected onto the
    /// selected fields, or [`None`] when absent.
    ///
    /// An empty field selection returns the full record.
    pub fn fetch(&self, id: &str, selected_fields: &[String]) -> Option<Value> {
        let snapshot = self.snapshot();

        snapshot
            .record(id)
            .map(|record| project(record, selected_fields))
    }

    /// Returns one [`Self::fetch`] result per input identifier.
    ///
    /// The output list is parallel to the input: order is preserved and
    /// neither hits nor misses are deduplicated.
    pub fn fetch_many(&self, ids: &[String], selected_fields: &[String]) -> Vec<Option<Value>> {
        let snapshot = self.snapshot();

        ids.iter()
            .map(|id| {
                snapshot
                    .record(id)
                    .map(|record| project(record, selected_fields))
            })
            .collect()
    }

    /// Returns the brand's records, sorted and projected.
    ///
    /// Records are deduplicated by identifier while the list is assembled (a
    /// defensive guard, snapshots do not contain duplicate identifiers), then
    /// stably sorted by the given field so tied records keep their brand group
    /// insertion order, then projected onto the selected fields.
    pub fn list(
        &self,
        brand: &str,
        selected_fields: &[String],
        sort_field: Field,
        direction: SortDirection,
    ) -> Vec<Value> {
        let snapshot = self.snapshot();

        let mut records = Vec::new();
        let mut seen_ids = Vec::new();
        for record in snapshot.brand_records(brand) {
            if seen_ids.contains(&record.id.as_str()) {
                continue;
            }

            seen_ids.push(record.id.as_str());
            records.push(record);
        }

        records.sort_by(|a, b| {
            let ordering = sort_field.compare(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        records
            .into_iter()
            .map(|record| project(record, selected_fields))
            .collect()
    }

    /// Reads the published snapshot reference once.
    fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot_rx.borrow().clone()
    }
}
