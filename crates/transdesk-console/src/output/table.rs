//! Table formatting for CLI output.

use serde_json::Value;

/// Column alignment
#[derive(Debug, Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Table column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub alignment: Alignment,
    pub min_width: usize,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Left,
            min_width: 0,
            max_width: None,
        }
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Plain text table.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<impl Into<String>>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.header.chars().count().max(c.min_width))
            .collect();

        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for (width, col) in widths.iter_mut().zip(&self.columns) {
            if let Some(max) = col.max_width {
                *width = (*width).min(max);
            }
        }

        widths
    }

    /// Render the header, a dashed separator and the rows.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut output = String::new();

        let header: Vec<_> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| format_cell(&col.header, w, col.alignment))
            .collect();
        push_line(&mut output, &header);

        let sep: Vec<_> = widths.iter().map(|&w| "-".repeat(w)).collect();
        push_line(&mut output, &sep);

        for row in &self.rows {
            let cells: Vec<_> = row
                .iter()
                .zip(&self.columns)
                .zip(&widths)
                .map(|((cell, col), &w)| format_cell(cell, w, col.alignment))
                .collect();
            push_line(&mut output, &cells);
        }

        output
    }

    /// Rows as JSON objects keyed by lowercased header.
    pub fn to_json_rows(&self) -> Vec<serde_json::Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(col, cell)| (col.header.to_lowercase(), Value::String(cell.clone())))
                    .collect()
            })
            .collect()
    }
}

fn push_line(output: &mut String, cells: &[String]) {
    output.push_str(cells.join("   ").trim_end());
    output.push('\n');
}

fn format_cell(content: &str, width: usize, alignment: Alignment) -> String {
    let content = if content.chars().count() > width {
        let kept: String = content.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        content.to_string()
    };

    match alignment {
        Alignment::Left => format!("{content:<width$}"),
        Alignment::Right => format!("{content:>width$}"),
    }
}
