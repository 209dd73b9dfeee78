use std::fmt::Write;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::types::ClassBucket;

/// One canonical vehicle record of the dictionary.
///
/// A record is identified by its identity key, the (make, model, class bucket)
/// triple. The identifier is a pure function of that key, so re-ingesting
/// identical data reproduces identical identifiers. Model years are kept
/// unique and ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarRecord {
    /// Digest derived identifier, stable across merges.
    pub id: String,
    pub make: String,
    pub model: String,
    /// Class bucket, serialized under the wire name `type`.
    #[serde(rename = "type")]
    pub class: ClassBucket,
    /// Model years, unique and ascending.
    pub years: Vec<i32>,
}

impl CarRecord {
    /// Creates a record for the given identity key with a single model year.
    ///
    /// The identifier is computed from the identity key at creation time and
    /// never recomputed: merges only ever extend the year set and the identity
    /// key of a record cannot change.
    pub fn new(make: String, model: String, class: ClassBucket, year: i32) -> Self {
        let id = identity_digest(&make, &model, class);

        Self {
            id,
            make,
            model,
            class,
            years: vec![year],
        }
    }

    /// Returns whether this record and the given identity key describe the
    /// same logical vehicle.
    pub fn matches(&self, make: &str, model: &str, class: ClassBucket) -> bool {
        self.make == make && self.model == model && self.class == class
    }

    /// Merges a model year into the record.
    ///
    /// The year set stays unique and ascending. This is the only mutation a
    /// record undergoes after creation.
    pub fn merge_year(&mut self, year: i32) {
        if let Err(pos) = self.years.binary_search(&year) {
            self.years.insert(pos, year);
        }
    }
}

/// Computes the identifier for an identity key.
///
/// The digest is the first 128 bits of SHA-256 over the joined key, rendered
/// as lowercase hex.
pub fn identity_digest(make: &str, model: &str, class: ClassBucket) -> String {
    let digest = Sha256::digest(format!("{make},{model},{class}").as_bytes());

    digest[..16].iter().fold(String::new(), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic_and_key_sensitive() {
        let a = identity_digest("Toyota", "Corolla", ClassBucket::Midsize);
        let b = identity_digest("Toyota", "Corolla", ClassBucket::Midsize);
        let c = identity_digest("Toyota", "Corolla", ClassBucket::Large);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn merge_year_keeps_years_unique_and_ascending() {
        let mut record = CarRecord::new(
            "Toyota".to_owned(),
            "Corolla".to_owned(),
            ClassBucket::Midsize,
            2003,
        );

        record.merge_year(2001);
        record.merge_year(2003);
        record.merge_year(2002);

        assert_eq!(record.years, vec![2001, 2002, 2003]);
    }
}
