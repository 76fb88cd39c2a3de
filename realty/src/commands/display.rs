// realty/src/commands/display.rs
//
// Terminal rendering of listing tables.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table as Grid};
use realty_core::domain::Table;

/// First `limit` rows of `table` as a printable grid.
pub fn render(table: &Table, limit: usize) -> Grid {
    let mut grid = Grid::new();
    grid.load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(table.column_names());

    for row in 0..table.height().min(limit) {
        grid.add_row(
            table
                .columns()
                .iter()
                .map(|column| column.values[row].to_string()),
        );
    }
    grid
}
