//! Pipe table layout.

use crate::block::{Align, TableProperty};
use crate::util::escape_table_cell;

/// Why a table cannot be laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ShapeMismatch {
    pub cells: usize,
}

/// Check that the declared dimensions are usable and match the cell count.
pub(crate) fn check_shape(property: TableProperty, cells: usize) -> Result<(), ShapeMismatch> {
    let TableProperty { rows, columns } = property;
    if rows == 0 || columns == 0 || rows.checked_mul(columns) != Some(cells) {
        return Err(ShapeMismatch { cells });
    }
    Ok(())
}

fn alignment_marker(align: Align) -> &'static str {
    match align {
        Align::Left => "-",
        Align::Center => ":-:",
        Align::Right => "-:",
    }
}

fn row(cells: &[String]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push_str(&escape_table_cell(cell));
        line.push('|');
    }
    line
}

/// Lay out cells (row-major, already shape-checked) as a pipe table.
///
/// `header_align` holds the alignment of each header cell; missing entries
/// default to left.
pub(crate) fn render_table(columns: usize, cells: &[String], header_align: &[Align]) -> String {
    let mut lines = Vec::with_capacity(cells.len() / columns.max(1) + 1);
    for (index, chunk) in cells.chunks(columns.max(1)).enumerate() {
        lines.push(row(chunk));
        if index == 0 {
            let mut separator = String::from("|");
            for column in 0..columns {
                let align = header_align.get(column).copied().unwrap_or_default();
                separator.push_str(alignment_marker(align));
                separator.push('|');
            }
            lines.push(separator);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(|&item| item.to_owned()).collect()
    }

    #[test]
    fn test_check_shape() {
        let property = TableProperty {
            rows: 2,
            columns: 2,
        };
        assert!(check_shape(property, 4).is_ok());
        assert_eq!(check_shape(property, 3), Err(ShapeMismatch { cells: 3 }));
    }

    #[test]
    fn test_check_shape_rejects_empty_dimensions() {
        let property = TableProperty {
            rows: 0,
            columns: 3,
        };
        assert!(check_shape(property, 0).is_err());
    }

    #[test]
    fn test_two_by_two() {
        let result = render_table(2, &cells(&["h1", "h2", "a", "b"]), &[]);
        assert_eq!(result, "|h1|h2|\n|-|-|\n|a|b|");
    }

    #[test]
    fn test_header_alignment() {
        let result = render_table(
            3,
            &cells(&["l", "c", "r"]),
            &[Align::Left, Align::Center, Align::Right],
        );
        assert_eq!(result, "|l|c|r|\n|-|:-:|-:|");
    }

    #[test]
    fn test_cell_content_is_escaped() {
        let result = render_table(1, &cells(&["a|b", "x\ny"]), &[]);
        assert_eq!(result, "|a\\|b|\n|-|\n|x<br/>y|");
    }
}
