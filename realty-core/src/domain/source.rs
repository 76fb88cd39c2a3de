// realty-core/src/domain/source.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Name of the provenance column added to every record at merge time.
pub const FRAME_COLUMN: &str = "frame";

/// Provenance tag: which market a listing came from.
///
/// The declaration order is the merge priority: when several sources have a
/// value for the same cell, California wins over Melbourne, which wins over
/// Portugal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    California,
    Melbourne,
    Portugal,
}

impl Frame {
    pub const ALL: [Frame; 3] = [Frame::California, Frame::Melbourne, Frame::Portugal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frame::California => "california",
            Frame::Melbourne => "melbourne",
            Frame::Portugal => "portugal",
        }
    }

    /// Suffix carried by this source's columns in the positionally aligned table.
    pub fn merge_suffix(&self) -> &'static str {
        match self {
            Frame::California => "",
            Frame::Melbourne => "_melb",
            Frame::Portugal => "_port",
        }
    }

    /// Relation holding this source's raw CSV rows.
    pub fn source_relation(&self) -> String {
        format!("{}_source", self.as_str())
    }

    /// Relation holding this source under the universal column names.
    pub fn unified_relation(&self) -> String {
        format!("{}_unified", self.as_str())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frame {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frame::ALL
            .into_iter()
            .find(|frame| frame.as_str() == s)
            .ok_or_else(|| DomainError::UnknownFrame(s.to_string()))
    }
}
