// realty-core/src/domain/views.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::clean::{HOME_TYPE_COLUMN, HomeType};
use crate::domain::error::DomainError;
use crate::domain::source::{FRAME_COLUMN, Frame};
use crate::domain::sql::{ROW_COLUMN, ident, literal, numeric};
use crate::domain::table::Table;

pub const STAGE: &str = "views";

/// The four analytical slices handed to reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Non-Melbourne listings: price against total area, per market.
    PriceArea,
    /// Multi-unit housing: elevator availability against price.
    ElevatorPrice,
    /// Every listing: parking capacity against price, per market.
    ParkingPrice,
    /// Californian two-bedroom multi-unit housing: price against construction year.
    CaliforniaTwoBed,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::PriceArea,
        ViewKind::ElevatorPrice,
        ViewKind::ParkingPrice,
        ViewKind::CaliforniaTwoBed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::PriceArea => "price_area",
            ViewKind::ElevatorPrice => "elevator_price",
            ViewKind::ParkingPrice => "parking_price",
            ViewKind::CaliforniaTwoBed => "california_two_bed",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ViewKind::PriceArea => &["price", "TotalArea", FRAME_COLUMN],
            ViewKind::ElevatorPrice => &["Elevator", "price"],
            ViewKind::ParkingPrice => &["parking_spaces", "price", FRAME_COLUMN],
            ViewKind::CaliforniaTwoBed => &["price", "year_built"],
        }
    }

    /// Row filter over the cleaned relation; `None` keeps every row.
    pub fn predicate(&self) -> Option<String> {
        let frame = ident(FRAME_COLUMN);
        match self {
            ViewKind::PriceArea => Some(format!(
                "{frame} IS DISTINCT FROM {}",
                literal(Frame::Melbourne.as_str())
            )),
            ViewKind::ElevatorPrice => Some(HomeType::MultiUnitHousing.predicate()),
            ViewKind::ParkingPrice => None,
            ViewKind::CaliforniaTwoBed => Some(format!(
                "{frame} = {} AND {} = 2 AND {}",
                literal(Frame::California.as_str()),
                numeric(&ident("bedrooms")),
                HomeType::MultiUnitHousing.predicate()
            )),
        }
    }

    /// Every column the view reads, selected or filtered on.
    pub fn required_columns(&self) -> Vec<&'static str> {
        let filtered: &[&'static str] = match self {
            ViewKind::PriceArea => &[FRAME_COLUMN],
            ViewKind::ElevatorPrice => &[HOME_TYPE_COLUMN],
            ViewKind::ParkingPrice => &[],
            ViewKind::CaliforniaTwoBed => &[FRAME_COLUMN, "bedrooms", HOME_TYPE_COLUMN],
        };
        let mut columns = self.columns().to_vec();
        for column in filtered {
            if !columns.contains(column) {
                columns.push(*column);
            }
        }
        columns.push(ROW_COLUMN);
        columns
    }

    /// Read-only slice of `relation`, in row order.
    pub fn sql(&self, relation: &str) -> String {
        let columns: Vec<String> = self.columns().iter().map(|c| ident(c)).collect();
        let filter = self
            .predicate()
            .map(|p| format!(" WHERE {p}"))
            .unwrap_or_default();
        format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            columns.join(", "),
            ident(relation),
            filter,
            ident(ROW_COLUMN)
        )
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| DomainError::UnknownView(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct AnalyticalViews {
    pub price_area: Table,
    pub elevator_price: Table,
    pub parking_price: Table,
    pub california_two_bed: Table,
}

impl AnalyticalViews {
    pub fn get(&self, kind: ViewKind) -> &Table {
        match kind {
            ViewKind::PriceArea => &self.price_area,
            ViewKind::ElevatorPrice => &self.elevator_price,
            ViewKind::ParkingPrice => &self.parking_price,
            ViewKind::CaliforniaTwoBed => &self.california_two_bed,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewKind, &Table)> {
        ViewKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}
