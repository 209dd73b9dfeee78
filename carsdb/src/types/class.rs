use std::fmt;

use serde::Serialize;

/// Coarse vehicle class bucket derived from the raw `VClass` dataset column.
///
/// The raw dataset uses dozens of fine grained category names. Queries only
/// care about a small fixed set of buckets, so every raw category is folded
/// through [`ClassBucket::from_raw`]. Categories absent from the lookup table
/// map to [`ClassBucket::Unknown`], never to an arbitrary bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassBucket {
    Mini,
    Midsize,
    Large,
    Unknown,
}

impl ClassBucket {
    /// Maps a raw vehicle class string to its bucket.
    ///
    /// The table mirrors the category vocabulary of the fueleconomy.gov
    /// vehicles dataset.
    pub fn from_raw(raw: &str) -> ClassBucket {
        match raw {
            "Two Seaters" | "Subcompact Cars" | "Minicompact Cars" => ClassBucket::Mini,
            "Compact Cars" | "Midsize Cars" => ClassBucket::Midsize,
            "Vans"
            | "Vans Passenger"
            | "Large Cars"
            | "Small Station Wagons"
            | "Midsize Station Wagons"
            | "Midsize-Large Station Wagons"
            | "Small Pickup Trucks"
            | "Small Pickup Trucks 2WD"
            | "Small Pickup Trucks 4WD"
            | "Standard Pickup Trucks"
            | "Standard Pickup Trucks 2WD"
            | "Standard Pickup Trucks 4WD"
            | "Standard Pickup Trucks/2wd"
            | "Special Purpose Vehicles"
            | "Special Purpose Vehicles/2wd"
            | "Special Purpose Vehicles/4wd"
            | "Special Purpose Vehicle 2WD"
            | "Special Purpose Vehicle 4WD"
            | "Minivan - 2WD"
            | "Minivan - 4WD"
            | "Sport Utility Vehicle - 2WD"
            | "Sport Utility Vehicle - 4WD"
            | "Small Sport Utility Vehicle 2WD"
            | "Small Sport Utility Vehicle 4WD"
            | "Standard Sport Utility Vehicle 2WD"
            | "Standard Sport Utility Vehicle 4WD" => ClassBucket::Large,
            _ => ClassBucket::Unknown,
        }
    }

    /// Returns the lowercase wire name of the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassBucket::Mini => "mini",
            ClassBucket::Midsize => "midsize",
            ClassBucket::Large => "large",
            ClassBucket::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClassBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_their_bucket() {
        assert_eq!(ClassBucket::from_raw("Two Seaters"), ClassBucket::Mini);
        assert_eq!(ClassBucket::from_raw("Compact Cars"), ClassBucket::Midsize);
        assert_eq!(ClassBucket::from_raw("Vans"), ClassBucket::Large);
    }

    #[test]
    fn unmapped_categories_become_unknown() {
        assert_eq!(ClassBucket::from_raw("Hovercraft"), ClassBucket::Unknown);
        assert_eq!(ClassBucket::from_raw(""), ClassBucket::Unknown);
    }
}
