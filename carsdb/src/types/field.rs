use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::types::CarRecord;

/// The enumerated set of projectable record fields.
///
/// The query surface addresses fields by their wire names. Unknown names do
/// not resolve to a [`Field`] and are silently omitted from projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Make,
    Model,
    Type,
    Years,
}

impl Field {
    /// All fields, in the order a full record serializes them.
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::Make,
        Field::Model,
        Field::Type,
        Field::Years,
    ];

    /// Resolves a wire name to a field, returning [`None`] for unknown names.
    ///
    /// The singular `year` is accepted as an alias of `years`.
    pub fn from_name(name: &str) -> Option<Field> {
        match name {
            "id" => Some(Field::Id),
            "make" => Some(Field::Make),
            "model" => Some(Field::Model),
            "type" => Some(Field::Type),
            "years" | "year" => Some(Field::Years),
            _ => None,
        }
    }

    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Make => "make",
            Field::Model => "model",
            Field::Type => "type",
            Field::Years => "years",
        }
    }

    /// Extracts the field value of a record as JSON.
    pub fn value_of(&self, record: &CarRecord) -> Value {
        match self {
            Field::Id => Value::String(record.id.clone()),
            Field::Make => Value::String(record.make.clone()),
            Field::Model => Value::String(record.model.clone()),
            Field::Type => Value::String(record.class.as_str().to_owned()),
            Field::Years => Value::Array(record.years.iter().map(|year| (*year).into()).collect()),
        }
    }

    /// Compares two records by this field.
    ///
    /// Strings compare lexicographically, year sets compare as integer
    /// sequences. Used by the listing sort, which relies on a stable sort to
    /// keep tied records in their original order.
    pub fn compare(&self, a: &CarRecord, b: &CarRecord) -> Ordering {
        match self {
            Field::Id => a.id.cmp(&b.id),
            Field::Make => a.make.cmp(&b.make),
            Field::Model => a.model.cmp(&b.model),
            Field::Type => a.class.as_str().cmp(b.class.as_str()),
            Field::Years => a.years.cmp(&b.years),
        }
    }
}

/// Projects a record onto the selected fields.
///
/// An empty selection yields the full record. Names that do not resolve to a
/// [`Field`] are skipped, never an error.
pub fn project(record: &CarRecord, selected_fields: &[String]) -> Value {
    if selected_fields.is_empty() {
        return project_all(record);
    }

    let mut out = Map::new();
    for name in selected_fields {
        let Some(field) = Field::from_name(name) else {
            continue;
        };

        out.insert(field.as_str().to_owned(), field.value_of(record));
    }

    Value::Object(out)
}

/// Serializes the full record through the field accessors.
fn project_all(record: &CarRecord) -> Value {
    let mut out = Map::new();
    for field in Field::ALL {
        out.insert(field.as_str().to_owned(), field.value_of(record));
    }

    Value::Object(out)
}
