use crate::ingest::parser::ParsedRow;
use crate::types::CarRecord;

/// Folds parsed rows into a canonical, deduplicated record list.
///
/// Rows are consumed in file order. The first row of an identity key creates
/// the record and fixes its position in the list, every later row with the
/// same key only merges its year into the existing record. The scan is linear
/// per row, so a full pass is quadratic in record count; dataset size is
/// bounded and rebuilds are periodic, not per request.
#[derive(Debug, Default)]
pub struct Deduplicator {
    records: Vec<CarRecord>,
}

impl Deduplicator {
    /// Creates an empty deduplicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one parsed row into the record list.
    pub fn fold(&mut self, row: ParsedRow) {
        let existing = self
            .records
            .iter_mut()
            .find(|record| record.matches(&row.make, &row.model, row.class));

        match existing {
            Some(record) => record.merge_year(row.year),
            None => self
                .records
                .push(CarRecord::new(row.make, row.model, row.class, row.year)),
        }
    }

    /// Returns the number of records folded so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no record has been folded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the deduplicator and returns the record list in first seen
    /// order.
    pub fn into_records(self) -> Vec<CarRecord> {
        self.records
    }
}
