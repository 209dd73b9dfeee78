//! The immutable, queryable bundle produced by one ingestion pass.

use std::collections::{BTreeMap, HashMap};

use crate::types::CarRecord;

/// One complete, immutable build of the indexed dataset.
///
/// A snapshot is created wholesale by one ingestion pass and never mutated
/// after publication; the next pass supersedes it wholesale. It bundles the
/// ordered record list with the lookup structures built over it.
#[derive(Debug, Default)]
pub struct Snapshot {
    /// Records in first seen order.
    records: Vec<CarRecord>,
    /// Identifier to record position. One entry per record, identifiers are
    /// unique by construction.
    by_id: HashMap<String, usize>,
    /// Brand to record positions, preserving record list order per brand.
    by_brand: BTreeMap<String, Vec<usize>>,
    /// Sorted distinct brand names.
    brands: Vec<String>,
}

impl Snapshot {
    /// Returns an empty snapshot, the state before the first publish.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the lookup structures over a completed record list.
    ///
    /// Pure function of the record list, no external state.
    pub fn build(records: Vec<CarRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_brand: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (pos, record) in records.iter().enumerate() {
            by_id.insert(record.id.clone(), pos);
            by_brand.entry(record.make.clone()).or_default().push(pos);
        }

        let brands = by_brand.keys().cloned().collect();

        Self {
            records,
            by_id,
            by_brand,
            brands,
        }
    }

    /// Returns the records in first seen order.
    pub fn records(&self) -> &[CarRecord] {
        &self.records
    }

    /// Returns the record with the given identifier, if any.
    pub fn record(&self, id: &str) -> Option<&CarRecord> {
        self.by_id.get(id).map(|pos| &self.records[*pos])
    }

    /// Returns the brand's records in record list order.
    ///
    /// An unknown brand yields an empty list.
    pub fn brand_records(&self, brand: &str) -> Vec<&CarRecord> {
        self.by_brand
            .get(brand)
            .map(|positions| positions.iter().map(|pos| &self.records[*pos]).collect())
            .unwrap_or_default()
    }

    /// Returns the sorted distinct brand names.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }
}
