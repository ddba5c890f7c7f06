//! Plain-text rendering of a grid snapshot.

use gridcalc_core::{CellId, GridDims, GridState};

/// Render every cell's display value as a table with column letters across the
/// top and 1-based row numbers down the side. Columns are as wide as their
/// widest value; trailing blanks are trimmed from each line.
pub fn render_table(state: &GridState, dims: GridDims) -> String {
    let label_width = dims.rows.to_string().len();
    let widths: Vec<usize> = (0..dims.cols)
        .map(|col| {
            (0..dims.rows)
                .map(|row| state.display(&CellId::new(row, col)).chars().count())
                .max()
                .unwrap_or(0)
                .max(1)
        })
        .collect();

    let mut out = String::new();

    let mut header = " ".repeat(label_width);
    for (col, width) in widths.iter().enumerate() {
        header.push_str(&format!(" {:<width$}", CellId::col_to_letter(col)));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for row in 0..dims.rows {
        let mut line = format!("{:>label_width$}", row + 1);
        for (col, width) in widths.iter().enumerate() {
            let display = state.display(&CellId::new(row, col));
            line.push_str(&format!(" {display:<width$}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
