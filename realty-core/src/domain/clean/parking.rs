// realty-core/src/domain/clean/parking.rs

use crate::domain::sql::{ident, numeric};

pub const PARKING_COLUMN: &str = "parking_spaces";
pub const GARAGE_COLUMN: &str = "garage_spaces";

/// `parking_spaces + garage_spaces`.
///
/// Booleans are presence flags worth one space or none, and a missing cell
/// means no spaces. Text must be rejected before this runs.
pub fn total_parking_sql() -> String {
    format!(
        "COALESCE({}, 0) + COALESCE({}, 0)",
        numeric(&ident(PARKING_COLUMN)),
        numeric(&ident(GARAGE_COLUMN))
    )
}
