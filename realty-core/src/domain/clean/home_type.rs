// realty-core/src/domain/clean/home_type.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::vocabulary::{CALIFORNIA_TYPES, MELBOURNE_TYPES, PORTUGAL_EXCLUDED_TYPES, PORTUGAL_TYPES};
use crate::domain::sql::{case_map, ident, literal, literal_list};

pub const HOME_TYPE_COLUMN: &str = "home_type";

/// Canonical housing category shared by all three markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomeType {
    House,
    Land,
    #[serde(rename = "Multi-Unit Housing")]
    MultiUnitHousing,
}

impl HomeType {
    pub const ALL: [HomeType; 3] = [HomeType::House, HomeType::Land, HomeType::MultiUnitHousing];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeType::House => "House",
            HomeType::Land => "Land",
            HomeType::MultiUnitHousing => "Multi-Unit Housing",
        }
    }

    pub fn is_residential(&self) -> bool {
        matches!(self, HomeType::House | HomeType::MultiUnitHousing)
    }

    /// True for rows of this category once home types are canonical.
    pub fn predicate(&self) -> String {
        format!("{} = {}", ident(HOME_TYPE_COLUMN), literal(self.as_str()))
    }
}

impl fmt::Display for HomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Every known raw type across the three markets.
///
/// The markets share no raw spelling, so a listing resolves the same way
/// whatever its frame says.
pub fn type_vocabulary() -> impl Iterator<Item = (&'static str, HomeType)> {
    PORTUGAL_TYPES
        .iter()
        .chain(CALIFORNIA_TYPES)
        .chain(MELBOURNE_TYPES)
        .copied()
}

/// True for rows whose raw type is a non-housing category.
///
/// Checked before [`canonical_sql`], so `Manor` is excluded even though the
/// Portugal vocabulary maps it.
pub fn excluded_predicate() -> String {
    format!(
        "{} IN {}",
        ident(HOME_TYPE_COLUMN),
        literal_list(PORTUGAL_EXCLUDED_TYPES)
    )
}

/// Canonical name of the raw type, NULL when it is unmapped.
pub fn canonical_sql() -> String {
    case_map(
        &ident(HOME_TYPE_COLUMN),
        type_vocabulary().map(|(key, home_type)| (key, home_type.as_str().to_string())),
    )
}
