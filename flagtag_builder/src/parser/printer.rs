use terminal_size::{terminal_size, Width};

use crate::parser::interface::Columns;

/// One rendered usage row: names, usage text and the environment variable (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    left: String,
    middle: String,
    right: Option<String>,
}

impl Row {
    pub(crate) fn new(left: String, middle: String, right: Option<String>) -> Self {
        Self {
            left,
            middle,
            right,
        }
    }
}

pub(crate) struct Printer {
    rows: Vec<Row>,
    terminal_width: Option<usize>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 2;
// Assumed when not attached to a terminal.
const DEFAULT_TOTAL_WIDTH: usize = 80;

impl Printer {
    pub(crate) fn terminal(rows: Vec<Row>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(rows, terminal_width)
    }

    pub(crate) fn new(rows: Vec<Row>, terminal_width: Option<usize>) -> Self {
        Self {
            rows,
            terminal_width,
        }
    }

    /// Render every row, in order, into aligned columns.
    pub(crate) fn render(&self) -> String {
        if self.rows.is_empty() {
            return String::default();
        }

        let widest = |column: fn(&Row) -> Option<&String>| {
            self.rows
                .iter()
                .filter_map(column)
                .map(|text| text.chars().count())
                .max()
        };
        let columns = Columns {
            padding: PADDING_WIDTH,
            left: widest(|row| Some(&row.left)).unwrap_or_default(),
            middle: widest(|row| Some(&row.middle)).unwrap_or_default(),
            right: widest(|row| row.right.as_ref()).filter(|width| *width > 0),
        }
        .fit(self.terminal_width.unwrap_or(DEFAULT_TOTAL_WIDTH));

        self.rows
            .iter()
            .flat_map(|Row { left, middle, right }| {
                columns.render(MAIN_INDENT, left, middle, right.as_deref())
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
