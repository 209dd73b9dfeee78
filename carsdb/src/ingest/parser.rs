use crate::types::ClassBucket;

/// Header name carrying the manufacturer.
const MAKE_COLUMN: &str = "make";
/// Header name carrying the model.
const MODEL_COLUMN: &str = "model";
/// Header name carrying the raw vehicle class.
const CLASS_COLUMN: &str = "VClass";
/// Header name carrying the model year.
const YEAR_COLUMN: &str = "year";

/// Sentinel manufacturer value marking a row as unusable.
const MAKE_SENTINEL: &str = "0";

/// One normalized dataset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub make: String,
    pub model: String,
    pub class: ClassBucket,
    pub year: i32,
}

/// Column positions of the consumed fields, established from the header line.
///
/// Positions of fields absent from the header stay unresolved; rows cannot be
/// parsed against an unresolved position and are rejected instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    make: Option<usize>,
    model: Option<usize>,
    class: Option<usize>,
    year: Option<usize>,
}

impl ColumnMap {
    /// Builds the column mapping from the header line.
    ///
    /// Only the four consumed header names are recognized, every other column
    /// is ignored. The separator is a bare comma, quoting is not supported.
    pub fn from_header(line: &str) -> ColumnMap {
        let mut map = ColumnMap::default();

        for (pos, name) in split_line(line).enumerate() {
            match name {
                MAKE_COLUMN => map.make = Some(pos),
                MODEL_COLUMN => map.model = Some(pos),
                CLASS_COLUMN => map.class = Some(pos),
                YEAR_COLUMN => map.year = Some(pos),
                _ => {}
            }
        }

        map
    }

    /// Returns whether all consumed columns were found in the header.
    pub fn is_complete(&self) -> bool {
        self.make.is_some() && self.model.is_some() && self.class.is_some() && self.year.is_some()
    }

    /// Parses one data line against the established mapping.
    ///
    /// Pure function of (mapping, line). Returns [`None`] when the row must be
    /// rejected: the year cell does not parse as an integer, the make cell is
    /// the literal sentinel `"0"`, or a consumed column is unresolved or
    /// missing from the line.
    pub fn parse_row(&self, line: &str) -> Option<ParsedRow> {
        let cells: Vec<&str> = split_line(line).collect();

        let make = *cells.get(self.make?)?;
        if make == MAKE_SENTINEL {
            return None;
        }

        let year: i32 = cells.get(self.year?)?.trim().parse().ok()?;
        let model = *cells.get(self.model?)?;
        let class = ClassBucket::from_raw(cells.get(self.class?)?);

        Some(ParsedRow {
            make: make.to_owned(),
            model: model.to_owned(),
            class,
            year,
        })
    }
}

/// Splits a line on bare commas, stripping a trailing carriage return.
///
/// A literal comma inside a field is not handled, matching the dataset format.
fn split_line(line: &str) -> impl Iterator<Item = &str> {
    line.trim_end_matches('\r').split(',')
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "barrels08,make,model,VClass,year,trany";

    #[test]
    fn header_mapping_resolves_consumed_columns_only() {
        let map = ColumnMap::from_header(HEADER);

        assert!(map.is_complete());
        assert_eq!(
            map,
            ColumnMap {
                make: Some(1),
                model: Some(2),
                class: Some(3),
                year: Some(4),
            }
        );
    }

    #[test]
    fn data_row_parses_against_the_mapping() {
        let map = ColumnMap::from_header(HEADER);
        let row = map
            .parse_row("14.2,Toyota,Corolla,Compact Cars,2001,Manual")
            .unwrap();

        assert_eq!(
            row,
            ParsedRow {
                make: "Toyota".to_owned(),
                model: "Corolla".to_owned(),
                class: ClassBucket::Midsize,
                year: 2001,
            }
        );
    }

    #[test]
    fn sentinel_make_is_rejected() {
        let map = ColumnMap::from_header(HEADER);

        assert_eq!(map.parse_row("14.2,0,Corolla,Compact Cars,2001,Manual"), None);
    }

    #[test]
    fn unparseable_year_is_rejected() {
        let map = ColumnMap::from_header(HEADER);

        assert_eq!(
            map.parse_row("14.2,Toyota,Corolla,Compact Cars,unknown,Manual"),
            None
        );
        assert_eq!(map.parse_row("14.2,Toyota,Corolla,Compact Cars,,Manual"), None);
    }

    #[test]
    fn short_lines_are_rejected() {
        let map = ColumnMap::from_header(HEADER);

        assert_eq!(map.parse_row("14.2,Toyota"), None);
        assert_eq!(map.parse_row(""), None);
    }

    #[test]
    fn unresolved_columns_reject_every_row() {
        let map = ColumnMap::from_header("barrels08,trany");

        assert!(!map.is_complete());
        assert_eq!(map.parse_row("14.2,Manual"), None);
    }

    #[test]
    fn trailing_carriage_return_does_not_leak_into_cells() {
        let map = ColumnMap::from_header("make,model,VClass,year\r");
        let row = map.parse_row("Toyota,Corolla,Compact Cars,2001\r").unwrap();

        assert_eq!(row.year, 2001);
    }
}
