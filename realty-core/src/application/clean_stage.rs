// realty-core/src/application/clean_stage.rs

use tracing::{info, instrument, warn};

use crate::application::stage::{StageResult, StageRunner};
use crate::domain::clean::home_type::{canonical_sql, excluded_predicate};
use crate::domain::clean::levels::{
    coerce_levels_sql, excluded_predicate as excluded_levels_predicate, excluded_rule,
    invalid_level_predicate, occupied_land_predicate, resolved_levels_sql, unmappable_predicate,
    unmappable_rule,
};
use crate::domain::clean::parking::total_parking_sql;
use crate::domain::clean::{
    CLEAN_DROP_COLUMNS, CLEAN_REQUIRED_COLUMNS, CLEANED_RELATION, DropEntry, GARAGE_COLUMN,
    HOME_TYPE_COLUMN, HomeType, LEVELS_COLUMN, PARKING_COLUMN, STAGE, empty_residential_predicate,
};
use crate::error::RealtyError;
use crate::ports::connector::Connector;

/// Clean stage result: the cleaned relation and what each rule removed.
#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub result: StageResult,
    pub drops: Vec<DropEntry>,
}

#[derive(Default)]
struct Ledger {
    drops: Vec<DropEntry>,
}

impl Ledger {
    fn record(&mut self, rule: &'static str, dropped: usize, remaining: usize) {
        if dropped > 0 {
            info!(rule, dropped, remaining, "Rows dropped");
        }
        self.drops.push(DropEntry { rule, dropped });
    }

    fn remove(
        &mut self,
        runner: &mut StageRunner<'_>,
        rule: &'static str,
        predicate: &str,
    ) -> Result<usize, RealtyError> {
        let dropped = runner.remove_rows(rule, predicate)?;
        self.record(rule, dropped, runner.rows());
        Ok(dropped)
    }
}

/// Run every clean-stage rule in order over the merged relation.
#[instrument(skip(connector))]
pub fn run_clean(connector: &dyn Connector, merged: &str) -> Result<CleanOutput, RealtyError> {
    let mut ledger = Ledger::default();
    let mut runner = StageRunner::start(connector, STAGE, merged)?;

    runner.project("drop_columns", &[], CLEAN_DROP_COLUMNS)?;
    for column in CLEAN_REQUIRED_COLUMNS {
        runner.require(column)?;
    }

    // 1. Home type: exclusions first, then the union of the market vocabularies
    ledger.remove(&mut runner, "excluded_home_type", &excluded_predicate())?;
    let canonical = canonical_sql();
    let keep = format!("({canonical}) IS NOT NULL");
    let sql = runner.select_sql(&[(HOME_TYPE_COLUMN, canonical)], &[], Some(&keep));
    let unmapped = runner.step("unmapped_home_type", &sql)?;
    ledger.record("unmapped_home_type", unmapped, runner.rows());
    if unmapped > 0 {
        warn!(rows = unmapped, "Rows with a missing or unknown home type were dropped");
    }

    // 2. Residential listings without any room
    ledger.remove(&mut runner, "empty_residential", &empty_residential_predicate())?;

    // 3. Parking
    runner.require_numeric(PARKING_COLUMN)?;
    runner.require_numeric(GARAGE_COLUMN)?;
    runner.project(
        "parking",
        &[(PARKING_COLUMN, total_parking_sql())],
        &[GARAGE_COLUMN],
    )?;

    // 4. Levels, category by category
    ledger.remove(&mut runner, "occupied_land", &occupied_land_predicate())?;
    for home_type in [HomeType::Land, HomeType::House, HomeType::MultiUnitHousing] {
        if let Some(predicate) = excluded_levels_predicate(home_type) {
            ledger.remove(&mut runner, excluded_rule(home_type), &predicate)?;
        }

        let rule = unmappable_rule(home_type);
        let keep = format!("NOT ({})", unmappable_predicate(home_type));
        let sql = runner.select_sql(
            &[(LEVELS_COLUMN, resolved_levels_sql(home_type))],
            &[],
            Some(&keep),
        );
        let unmappable = runner.step(rule, &sql)?;
        ledger.record(rule, unmappable, runner.rows());
        if unmappable > 0 {
            warn!(
                home_type = %home_type,
                rows = unmappable,
                "Rows with unmappable levels were dropped"
            );
        }
    }

    // Every pass drops what it cannot map, so a leftover here is a gap in the tables
    runner.reject_first(LEVELS_COLUMN, &invalid_level_predicate())?;
    runner.project("levels", &[(LEVELS_COLUMN, coerce_levels_sql())], &[])?;

    let result = runner.finish(CLEANED_RELATION)?;
    info!(
        rows = result.rows,
        columns = result.columns.len(),
        "Clean stage complete"
    );
    Ok(CleanOutput {
        result,
        drops: ledger.drops,
    })
}
