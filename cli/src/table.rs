//! Simple table formatting for CLI output.
//!
//! Clean, minimal tables with auto-calculated column widths.
//! No borders, just whitespace alignment. Numeric columns can be
//! right-aligned so amounts line up on the decimal point.

use colored::{ColoredString, Colorize};

/// A simple table for CLI output.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    right_aligned: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
            right_aligned: Vec::new(),
        }
    }

    /// Right-align the given columns.
    pub fn align_right(&mut self, columns: &[usize]) -> &mut Self {
        self.right_aligned.extend_from_slice(columns);
        self
    }

    /// Add a row with owned strings.
    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.rows.push(cells);
        self
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|c| c.chars().count())
                    .fold(h.chars().count(), usize::max)
            })
            .collect()
    }

    fn pad(&self, column: usize, text: &str, width: usize) -> String {
        let padding = " ".repeat(width.saturating_sub(text.chars().count()));
        if self.right_aligned.contains(&column) {
            format!("{padding}{text}")
        } else {
            format!("{text}{padding}")
        }
    }

    /// Render the table as text, one line per row.
    pub fn render(&self) -> String {
        self.render_with(|_, cell| cell.normal())
    }

    /// Render with a custom formatter for each cell.
    /// The formatter receives (column_index, cell_value) and returns a ColoredString.
    pub fn render_with<F>(&self, formatter: F) -> String
    where
        F: Fn(usize, &str) -> ColoredString,
    {
        let widths = self.widths();

        let header_line: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| self.pad(i, h, widths[i]))
            .collect();
        let mut out = format!("  {}\n", header_line.join("  ").dimmed());

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let width = widths.get(i).copied().unwrap_or(0);
                    // Pad the plain text so escape codes don't skew alignment.
                    let padded = self.pad(i, cell, width);
                    let visible = formatter(i, cell).to_string();
                    padded.replacen(cell.as_str(), &visible, 1)
                })
                .collect();
            out.push_str(&format!("  {}\n", cells.join("  ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_cover_headers_and_cells() {
        let mut table = Table::new(&["ID", "AMOUNT"]);
        table.row(vec!["12345".into(), "1.00".into()]);
        assert_eq!(table.widths(), vec![5, 6]);
    }

    #[test]
    fn test_right_alignment() {
        let mut table = Table::new(&["AMOUNT"]);
        table.align_right(&[0]);
        assert_eq!(table.pad(0, "1.00", 6), "  1.00");
        assert_eq!(table.pad(1, "x", 3), "x  ");
    }

    #[test]
    fn test_render_lines() {
        colored::control::set_override(false);
        let mut table = Table::new(&["ID", "AMOUNT"]);
        table.align_right(&[1]);
        table.row(vec!["7".into(), "1.00".into()]);
        table.row(vec!["12345".into(), "250.50".into()]);

        assert_eq!(
            table.render(),
            "  ID     AMOUNT\n  7        1.00\n  12345  250.50\n"
        );
    }
}
