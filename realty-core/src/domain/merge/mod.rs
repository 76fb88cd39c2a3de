// realty-core/src/domain/merge/mod.rs
//
// MERGE STAGE: raw sources -> one universal table with structural gaps filled.

pub mod consolidate;
pub mod fill;
pub mod unify;

pub use consolidate::{consolidate_projection, consolidate_sql, split_suffix};
pub use fill::{FILL_POLICY, FillRule, FillStrategy, validate_policy};
pub use unify::{align_sql, empty_source_sql, seed_columns, unify_sql};

pub const STAGE: &str = "merge";

/// Positional merge of the unified sources, before consolidation.
pub const ALIGNED_RELATION: &str = "aligned";

/// Output of the merge stage.
pub const MERGED_RELATION: &str = "merged";

/// Columns with no analytical use, dropped right after consolidation when present.
pub const MERGE_DROP_COLUMNS: &[&str] = &[
    "id",
    "ElectricCarsCharging",
    "PublishDate",
    "EnergyEfficiencyLevel",
    "SellerG",
    "ConservationStatus",
    "latitude",
    "longitude",
    "GrossArea",
    "HasParking",
    "Propertycount",
    "Regionname",
    "CouncilArea",
    "Date",
    "country",
    "Unnamed: 0",
    "datePostedString",
    "is_bankOwned",
    "is_forAuction",
    "event",
    "time",
    "state",
    "zipcode",
    "hasBadGeocode",
    "description",
    "currency",
    "livingAreaValue",
    "hasGarage",
    "pool",
    "spa",
    "isNewConstruction",
    "hasPetsAllowed",
    "county",
    "Rooms",
    "Method",
    "Distance",
    "Postcode",
    "NumberOfWC",
    "lot_size",
    "building_area",
];
