// realty-core/src/domain/clean/vocabulary.rs
//
// Literal categorical tables used by the clean stage. Kept as named constants
// so each one can be checked on its own.

use super::home_type::HomeType;
use HomeType::{House, Land, MultiUnitHousing};

// --- HOME TYPE ---

/// Portugal listing types that are not residential housing or land.
pub const PORTUGAL_EXCLUDED_TYPES: [&str; 16] = [
    "Farm",
    "Store",
    "Other - Residential",
    "Building",
    "Transfer of lease",
    "Garage",
    "Other - Commercial",
    "Warehouse",
    "Investment",
    "Hotel",
    "Office",
    "Storage",
    "Industrial",
    "Studio",
    "Estate",
    "Manor",
];

/// Exclusion is checked first, so `Manor` rows are dropped before this table is consulted.
pub const PORTUGAL_TYPES: &[(&str, HomeType)] = &[
    ("House", House),
    ("Land", Land),
    ("Mansion", House),
    ("Manor", House),
    ("Apartment", MultiUnitHousing),
    ("Duplex", MultiUnitHousing),
];

pub const CALIFORNIA_TYPES: &[(&str, HomeType)] = &[
    ("SINGLE_FAMILY", House),
    ("TOWNHOUSE", House),
    ("MULTI_FAMILY", MultiUnitHousing),
    ("LOT", Land),
    ("CONDO", MultiUnitHousing),
    ("APARTMENT", MultiUnitHousing),
];

/// h = house, t = townhouse, u = unit. Melbourne has no land listings.
pub const MELBOURNE_TYPES: &[(&str, HomeType)] =
    &[("h", House), ("t", House), ("u", MultiUnitHousing)];

// --- LEVELS ---

/// Floor descriptors that mean nothing for vacant land.
pub const LAND_LEVELS: &[(&str, f64)] = &[
    ("One Story", 0.0),
    ("Ground Floor", 0.0),
    ("2nd Floor", 0.0),
    ("3rd Floor", 0.0),
];

/// Irregular or multi-level descriptors that cannot be expressed as a story count.
pub const HOUSE_EXCLUDED_LEVELS: [&str; 22] = [
    "Top Floor",
    "Service Floor",
    "Attic",
    "Other-One",
    "Split Level",
    "Multi-Level",
    "Mezzanine",
    "Basement",
    "Basement Level",
    "Triplex",
    "Duplex",
    "Multi/Split",
    "Three or More Stories-Three Or More",
    "Multi/Split-Tri-Level",
    "Three Or More-Split Level",
    "Tri-Level-Two",
    "Multi/Split-Three Or More",
    "One-Multi/Split",
    "One-Two-Three Or More",
    "Two-Three Or More",
    "Two Story-One",
    "Other",
];

/// Story count of a house.
pub const HOUSE_LEVELS: &[(&str, f64)] = &[
    ("One Story", 1.0),
    ("Ground Floor", 1.0),
    ("Two Story", 1.0),
    ("One", 1.0),
    ("Two", 2.0),
    ("Three Or More", 3.0),
    ("One-Two", 1.0),
    ("Three", 3.0),
    ("Tri-Level", 3.0),
    ("Three Or More-Multi/Split", 3.0),
    ("Three or More Stories", 3.0),
    ("One Story-One", 1.0),
    ("Two-Multi/Split", 2.0),
    ("Two Story-Two", 2.0),
    ("Multi/Split-One", 1.0),
    ("Multi/Split-Two", 2.0),
    ("One-Two-Multi/Split", 1.0),
    ("One-Three Or More", 1.0),
    ("4+", 4.0),
    ("Tri-Level-Three Or More", 3.0),
    ("Three or More Stories-Two", 1.0),
    ("Three Or More-Two", 1.0),
    ("Three or More Stories-One-Two", 2.0),
    ("Two Story-Three Or More", 2.0),
    ("Two-One", 1.0),
    ("1st Floor", 1.0),
    ("2nd Floor", 1.0),
    ("3rd Floor", 1.0),
    ("0", 1.0),
];

pub const MULTI_UNIT_EXCLUDED_LEVELS: [&str; 10] = [
    "Two-Three Or More-Multi/Split",
    "Multi/Split-Two",
    "Two-Multi/Split",
    "One Story-Two",
    "Tri-Level-Three Or More",
    "Three Or More-Multi/Split",
    "Two Story-Three Or More",
    "Three or More Stories-Two",
    "One-Three Or More",
    "Two Story",
];

/// Floor on which the unit sits, 1 being the ground floor.
pub const MULTI_UNIT_LEVELS: &[(&str, f64)] = &[
    ("One Story", 1.0),
    ("One", 1.0),
    ("Two", 2.0),
    ("0", 1.0),
    ("Three Or More", 3.0),
    ("Tri-Level", 3.0),
    ("Four", 4.0),
    ("One Story-Three Or More", 3.0),
    ("One Story-One", 1.0),
    ("One-Two", 2.0),
    ("Two Story-Two", 2.0),
    ("Three or More Stories-One", 1.0),
    ("Five or More", 5.0),
    ("Ground Floor", 1.0),
    ("1st Floor", 1.0),
    ("Three or More Stories", 1.0),
    ("2nd Floor", 1.0),
    ("3rd Floor", 1.0),
    ("4th Floor", 1.0),
    ("Above 10th Floor", 10.0),
    ("5th Floor", 5.0),
    ("6th Floor", 6.0),
    ("9th Floor", 9.0),
    ("7th Floor", 7.0),
    ("8th Floor", 8.0),
];
