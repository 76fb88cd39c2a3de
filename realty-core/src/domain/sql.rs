// realty-core/src/domain/sql.rs
//
// SQL fragments shared by every stage. Identifiers are always double-quoted and
// literals single-quoted, so column names such as `Unnamed: 0` stay safe.

use crate::domain::table::value::NULL_TOKENS;

/// Ordinal of a listing within its source, carried through every stage.
pub const ROW_COLUMN: &str = "_row";

pub fn ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// `('a', 'b', ...)`
pub fn literal_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let items: Vec<String> = items.into_iter().map(literal).collect();
    format!("({})", items.join(", "))
}

/// Raw CSV text, trimmed, with the null tokens turned into NULL.
pub fn raw_cell(column: &str) -> String {
    let column = ident(column);
    format!(
        "CASE WHEN trim({column}) IN {} THEN NULL ELSE trim({column}) END",
        literal_list(NULL_TOKENS)
    )
}

/// Explicit numeric reading of a cell.
///
/// Booleans count as `1`/`0` and numeric text is parsed. Anything else reads as
/// NULL, so callers check [`not_numeric`] first when text must be fatal.
pub fn numeric(expr: &str) -> String {
    format!(
        "CASE lower(CAST({expr} AS VARCHAR)) WHEN 'true' THEN 1.0::DOUBLE WHEN 'false' THEN 0.0::DOUBLE ELSE TRY_CAST({expr} AS DOUBLE) END"
    )
}

/// True for a present cell that [`numeric`] cannot read as a finite number.
pub fn not_numeric(expr: &str) -> String {
    let number = numeric(expr);
    format!("({expr} IS NOT NULL AND ({number} IS NULL OR NOT isfinite({number})))")
}

/// Text used to look a cell up in a vocabulary table.
///
/// Integral numbers use their shortest spelling, so `0.0` finds the `"0"` entry.
pub fn lookup_key(expr: &str) -> String {
    let number = format!("TRY_CAST({expr} AS DOUBLE)");
    format!(
        "CASE WHEN isfinite({number}) AND {number} = trunc({number}) AND abs({number}) < 1e15 \
         THEN CAST(CAST({number} AS BIGINT) AS VARCHAR) ELSE CAST({expr} AS VARCHAR) END"
    )
}

/// `CASE expr WHEN 'key' THEN 'value' ... END`, NULL for anything else.
pub fn case_map<'a>(expr: &str, pairs: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let arms: Vec<String> = pairs
        .into_iter()
        .map(|(key, value)| format!("WHEN {} THEN {}", literal(key), literal(&value)))
        .collect();
    format!("CASE {expr} {} ELSE NULL END", arms.join(" "))
}

/// Select list over `columns`, in order.
///
/// `replace` swaps a column's expression in place and `drop` leaves columns
/// out. Names that are not in `columns` are ignored by both.
pub fn projection(columns: &[String], replace: &[(&str, String)], drop: &[&str]) -> String {
    columns
        .iter()
        .filter(|column| !drop.contains(&column.as_str()))
        .map(|column| match replace.iter().find(|(name, _)| name == column) {
            Some((_, expr)) => format!("{} AS {}", expr, ident(column)),
            None => ident(column),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keep rows for which `predicate` is not true. NULL counts as not true.
pub fn unless(predicate: &str) -> String {
    format!("NOT COALESCE(({predicate}), false)")
}

pub fn count_rows(relation: &str, filter: Option<&str>) -> String {
    match filter {
        Some(filter) => format!(
            "SELECT CAST(count(*) AS UBIGINT) FROM {} WHERE {}",
            ident(relation),
            filter
        ),
        None => format!("SELECT CAST(count(*) AS UBIGINT) FROM {}", ident(relation)),
    }
}
