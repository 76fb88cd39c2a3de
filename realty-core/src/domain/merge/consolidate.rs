// realty-core/src/domain/merge/consolidate.rs

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::source::Frame;
use crate::domain::sql::ident;

fn re_suffixed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<base>.+)_(?P<suffix>melb|port)$").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Split an aligned column name into its base name and originating frame.
pub fn split_suffix(name: &str) -> (&str, Frame) {
    match re_suffixed().captures(name) {
        Some(caps) => {
            let base = caps.name("base").map_or(name, |m| m.as_str());
            let frame = match caps.name("suffix").map(|m| m.as_str()) {
                Some("melb") => Frame::Melbourne,
                _ => Frame::Portugal,
            };
            (base, frame)
        }
        None => (name, Frame::California),
    }
}

/// Aligned columns folded into one universal column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub base: String,
    /// Aligned column names, in frame priority order.
    pub members: Vec<String>,
}

/// Group aligned columns by base name.
///
/// Groups keep the position of their first member.
pub fn group_columns(columns: &[String]) -> Vec<ColumnGroup> {
    let mut groups: Vec<(ColumnGroup, Vec<Frame>)> = Vec::new();
    for column in columns {
        let (base, frame) = split_suffix(column);
        match groups.iter_mut().find(|(g, _)| g.base == base) {
            Some((group, frames)) => {
                let at = frames.iter().position(|f| *f > frame).unwrap_or(frames.len());
                frames.insert(at, frame);
                group.members.insert(at, column.clone());
            }
            None => groups.push((
                ColumnGroup {
                    base: base.to_string(),
                    members: vec![column.clone()],
                },
                vec![frame],
            )),
        }
    }
    groups.into_iter().map(|(group, _)| group).collect()
}

/// Select list folding `name`, `name_melb` and `name_port` into `name`.
///
/// For each row the first non-NULL value wins, in frame priority order. A
/// relation without suffixed columns maps to itself.
pub fn consolidate_projection(columns: &[String]) -> String {
    group_columns(columns)
        .iter()
        .map(|group| match group.members.as_slice() {
            [only] if *only == group.base => ident(only),
            [only] => format!("{} AS {}", ident(only), ident(&group.base)),
            members => {
                let members: Vec<String> = members.iter().map(|m| ident(m)).collect();
                format!("COALESCE({}) AS {}", members.join(", "), ident(&group.base))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn consolidate_sql(relation: &str, columns: &[String]) -> String {
    format!("SELECT {} FROM {}", consolidate_projection(columns), ident(relation))
}
