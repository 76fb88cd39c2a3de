// realty-core/src/domain/clean/levels.rs

use super::home_type::HomeType;
use super::vocabulary::{
    HOUSE_EXCLUDED_LEVELS, HOUSE_LEVELS, LAND_LEVELS, MULTI_UNIT_EXCLUDED_LEVELS,
    MULTI_UNIT_LEVELS,
};
use crate::domain::sql::{case_map, ident, literal_list, lookup_key, numeric};
use crate::domain::table::Value;

pub const LEVELS_COLUMN: &str = "levels";

pub fn excluded_levels(home_type: HomeType) -> &'static [&'static str] {
    match home_type {
        HomeType::Land => &[],
        HomeType::House => &HOUSE_EXCLUDED_LEVELS,
        HomeType::MultiUnitHousing => &MULTI_UNIT_EXCLUDED_LEVELS,
    }
}

pub fn level_table(home_type: HomeType) -> &'static [(&'static str, f64)] {
    match home_type {
        HomeType::Land => LAND_LEVELS,
        HomeType::House => HOUSE_LEVELS,
        HomeType::MultiUnitHousing => MULTI_UNIT_LEVELS,
    }
}

pub fn excluded_rule(home_type: HomeType) -> &'static str {
    match home_type {
        HomeType::Land => "excluded_land_levels",
        HomeType::House => "excluded_house_levels",
        HomeType::MultiUnitHousing => "excluded_multi_unit_levels",
    }
}

pub fn unmappable_rule(home_type: HomeType) -> &'static str {
    match home_type {
        HomeType::Land => "unmappable_land_levels",
        HomeType::House => "unmappable_house_levels",
        HomeType::MultiUnitHousing => "unmappable_multi_unit_levels",
    }
}

/// Rows of `home_type` whose levels are in the category's exclusion table.
/// `None` when the category excludes nothing.
pub fn excluded_predicate(home_type: HomeType) -> Option<String> {
    let excluded = excluded_levels(home_type);
    if excluded.is_empty() {
        return None;
    }
    Some(format!(
        "{} AND {} IN {}",
        home_type.predicate(),
        lookup_key(&ident(LEVELS_COLUMN)),
        literal_list(excluded.iter().copied())
    ))
}

/// Resolved level of a row of `home_type`, as text; NULL when unmappable.
///
/// The vocabulary wins. Values outside it pass through when they already are
/// a non-negative number.
pub fn level_sql(home_type: HomeType) -> String {
    let column = ident(LEVELS_COLUMN);
    let mapped = case_map(
        &lookup_key(&column),
        level_table(home_type)
            .iter()
            .map(|(key, level)| (*key, Value::Number(*level).to_string())),
    );
    let number = numeric(&column);
    format!(
        "COALESCE({mapped}, CASE WHEN isfinite({number}) AND {number} >= 0 THEN CAST({number} AS VARCHAR) END)"
    )
}

/// New `levels` for one category pass; other categories keep their value.
pub fn resolved_levels_sql(home_type: HomeType) -> String {
    format!(
        "CASE WHEN {} THEN {} ELSE CAST({} AS VARCHAR) END",
        home_type.predicate(),
        level_sql(home_type),
        ident(LEVELS_COLUMN)
    )
}

pub fn unmappable_predicate(home_type: HomeType) -> String {
    format!("{} AND ({}) IS NULL", home_type.predicate(), level_sql(home_type))
}

/// Land with both bedrooms and bathrooms is not vacant land. A missing count
/// counts as non-zero.
pub fn occupied_land_predicate() -> String {
    format!(
        "{} AND {} IS DISTINCT FROM 0 AND {} IS DISTINCT FROM 0",
        HomeType::Land.predicate(),
        numeric(&ident("bedrooms")),
        numeric(&ident("bathrooms"))
    )
}

/// Cells the final conversion cannot turn into a non-negative number.
pub fn invalid_level_predicate() -> String {
    let number = format!("TRY_CAST({} AS DOUBLE)", ident(LEVELS_COLUMN));
    format!("NOT COALESCE(isfinite({number}) AND {number} >= 0, false)")
}

pub fn coerce_levels_sql() -> String {
    format!("CAST({} AS DOUBLE)", ident(LEVELS_COLUMN))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_land_has_no_exclusions() {
        assert!(excluded_predicate(HomeType::Land).is_none());
        let house = excluded_predicate(HomeType::House).unwrap();
        assert!(house.starts_with("\"home_type\" = 'House' AND "));
        assert!(house.contains("'Split Level'"));
    }

    #[test]
    fn test_level_sql_renders_story_counts() {
        let sql = level_sql(HomeType::MultiUnitHousing);
        assert!(sql.contains("WHEN '5th Floor' THEN '5'"));
        assert!(sql.contains("WHEN 'Above 10th Floor' THEN '10'"));
        let land = level_sql(HomeType::Land);
        assert!(land.contains("WHEN 'One Story' THEN '0'"));
    }

    #[test]
    fn test_category_pass_leaves_other_rows() {
        let sql = resolved_levels_sql(HomeType::House);
        assert!(sql.starts_with("CASE WHEN \"home_type\" = 'House' THEN COALESCE("));
        assert!(sql.ends_with("ELSE CAST(\"levels\" AS VARCHAR) END"));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(excluded_rule(HomeType::MultiUnitHousing), "excluded_multi_unit_levels");
        assert_eq!(unmappable_rule(HomeType::Land), "unmappable_land_levels");
    }
}
