// realty-core/src/domain/clean/mod.rs
//
// CLEAN STAGE: universal table -> canonical home types, merged parking,
// numeric levels.

pub mod home_type;
pub mod levels;
pub mod parking;
pub mod vocabulary;

use serde::Serialize;

use crate::domain::sql::{ident, literal_list, numeric};

pub use home_type::{HOME_TYPE_COLUMN, HomeType};
pub use levels::LEVELS_COLUMN;
pub use parking::{GARAGE_COLUMN, PARKING_COLUMN};

pub const STAGE: &str = "clean";

/// Output of the clean stage.
pub const CLEANED_RELATION: &str = "cleaned";

/// Columns not needed for analysis. Absent ones are ignored.
pub const CLEAN_DROP_COLUMNS: &[&str] = &[
    "stateId",
    "countyId",
    "cityId",
    "pricePerSquareFoot",
    "EnergyCertificate",
    "street_address",
    "District",
    "town",
    "city",
    "total_rooms",
];

/// Columns every clean rule can rely on.
pub const CLEAN_REQUIRED_COLUMNS: &[&str] = &[
    HOME_TYPE_COLUMN,
    "bedrooms",
    "bathrooms",
    PARKING_COLUMN,
    GARAGE_COLUMN,
    LEVELS_COLUMN,
];

/// One row-dropping rule and how many rows it removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropEntry {
    pub rule: &'static str,
    pub dropped: usize,
}

/// Residential categories with neither bedrooms nor bathrooms (parking lots, towers).
pub fn empty_residential_predicate() -> String {
    let residential: Vec<&str> = HomeType::ALL
        .iter()
        .filter(|t| t.is_residential())
        .map(HomeType::as_str)
        .collect();
    format!(
        "{} IN {} AND {} = 0 AND {} = 0",
        ident(HOME_TYPE_COLUMN),
        literal_list(residential),
        numeric(&ident("bedrooms")),
        numeric(&ident("bathrooms"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_residential_skips_land() {
        let sql = empty_residential_predicate();
        assert!(sql.starts_with("\"home_type\" IN ('House', 'Multi-Unit Housing') AND "));
        assert!(!sql.contains("'Land'"));
    }

    #[test]
    fn test_drop_lists_do_not_touch_required_columns() {
        for column in CLEAN_REQUIRED_COLUMNS {
            assert!(!CLEAN_DROP_COLUMNS.contains(column), "{column}");
        }
    }
}
