// realty-core/src/domain/merge/unify.rs

use crate::domain::source::{FRAME_COLUMN, Frame};
use crate::domain::sql::{ROW_COLUMN, ident, literal, raw_cell};

// --- COLUMN RENAME TABLES (source name -> universal name) ---

pub const CALIFORNIA_COLUMNS: &[(&str, &str)] = &[
    ("price", "price"),
    ("city", "city"),
    ("state", "state"),
    ("streetAddress", "street_address"),
    ("bedrooms", "bedrooms"),
    ("bathrooms", "bathrooms"),
    ("buildingArea", "building_area"),
    ("livingArea", "living_area"),
    ("lotAreaUnits", "lot_size"),
    ("yearBuilt", "year_built"),
    ("longitude", "longitude"),
    ("latitude", "latitude"),
    ("parking", "parking_spaces"),
    ("garageSpaces", "garage_spaces"),
    ("levels", "levels"),
    ("pool", "pool"),
    ("homeType", "home_type"),
    ("country", "country"),
];

pub const MELBOURNE_COLUMNS: &[(&str, &str)] = &[
    ("Price", "price"),
    ("Suburb", "city"),
    ("Address", "street_address"),
    ("Bedroom2", "bedrooms"),
    ("Bathroom", "bathrooms"),
    ("BuildingArea", "building_area"),
    ("Landsize", "lot_size"),
    ("YearBuilt", "year_built"),
    ("Longtitude", "longitude"),
    ("Lattitude", "latitude"),
    ("Car", "parking_spaces"),
    ("Type", "home_type"),
];

pub const PORTUGAL_COLUMNS: &[(&str, &str)] = &[
    ("Price", "price"),
    ("City", "city"),
    ("Town", "town"),
    ("Type", "home_type"),
    ("NumberOfBedrooms", "bedrooms"),
    ("NumberOfBathrooms", "bathrooms"),
    ("BuiltArea", "building_area"),
    ("LivingArea", "living_area"),
    ("LotSize", "lot_size"),
    ("ConstructionYear", "year_built"),
    ("Parking", "parking_spaces"),
    ("Garage", "garage_spaces"),
    ("Floor", "levels"),
    ("TotalRooms", "total_rooms"),
];

pub fn column_mapping(frame: Frame) -> &'static [(&'static str, &'static str)] {
    match frame {
        Frame::California => CALIFORNIA_COLUMNS,
        Frame::Melbourne => MELBOURNE_COLUMNS,
        Frame::Portugal => PORTUGAL_COLUMNS,
    }
}

/// Portugal columns that keep their native name and that later stages read.
pub const PORTUGAL_NATIVE_COLUMNS: &[&str] = &["TotalArea", "Elevator", "District", "EnergyCertificate"];

/// Universal name of a raw source column. Unmapped columns keep their name.
pub fn renamed(frame: Frame, column: &str) -> &str {
    column_mapping(frame)
        .iter()
        .find(|(from, _)| *from == column)
        .map_or(column, |(_, to)| to)
}

/// Schema given to a source whose file is empty: every column the mapping
/// knows, plus the native columns the fill policy and the views rely on.
pub fn seed_columns(frame: Frame) -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = column_mapping(frame).iter().map(|(from, _)| *from).collect();
    if frame == Frame::Portugal {
        columns.extend_from_slice(PORTUGAL_NATIVE_COLUMNS);
    }
    columns
}

pub fn empty_source_sql(frame: Frame) -> String {
    let columns: Vec<String> = seed_columns(frame)
        .into_iter()
        .map(|name| format!("{} VARCHAR", ident(name)))
        .collect();
    format!(
        "CREATE OR REPLACE TABLE {} ({})",
        ident(&frame.source_relation()),
        columns.join(", ")
    )
}

/// Rename a raw source to the universal schema, tag it with its frame and
/// number its rows in file order.
///
/// Cells are trimmed and the null tokens become NULL. When two raw columns
/// land on the same name the first one wins.
pub fn unify_sql(frame: Frame, raw_columns: &[String]) -> String {
    let mut seen: Vec<&str> = vec![ROW_COLUMN, FRAME_COLUMN];
    let mut select = vec![format!("rowid AS {}", ident(ROW_COLUMN))];
    for column in raw_columns {
        let target = renamed(frame, column);
        if seen.contains(&target) {
            continue;
        }
        seen.push(target);
        select.push(format!("{} AS {}", raw_cell(column), ident(target)));
    }
    select.push(format!("{} AS {}", literal(frame.as_str()), ident(FRAME_COLUMN)));

    format!(
        "SELECT {} FROM {} ORDER BY rowid",
        select.join(", "),
        ident(&frame.source_relation())
    )
}

/// Positional outer merge of the unified sources.
///
/// Row `i` of every source lands on row `i` of the result, which is as tall as
/// the tallest source; shorter sources are padded with NULL. Each source's
/// columns carry its [`Frame::merge_suffix`], so `name`, `name_melb` and
/// `name_port` sit side by side, ready for consolidation.
pub fn align_sql(unified: &[(Frame, Vec<String>)]) -> String {
    let mut select = Vec::new();
    let mut from = Vec::new();
    for (frame, columns) in unified {
        let alias = ident(frame.as_str());
        for column in columns {
            select.push(format!(
                "{}.{} AS {}",
                alias,
                ident(column),
                ident(&format!("{}{}", column, frame.merge_suffix()))
            ));
        }
        from.push(format!("{} AS {}", ident(&frame.unified_relation()), alias));
    }
    format!("SELECT {} FROM {}", select.join(", "), from.join(" POSITIONAL JOIN "))
}
