//! Table extraction
//!
//! Finds every `<table>` in a parsed document and turns it into a grid of
//! cell strings that renders as a markdown pipe table. Markup that yields no
//! cells is not a table; it is skipped rather than reported.

use scraper::{ElementRef, Html, Selector};

/// Upper bound for `colspan`, so one bad attribute cannot blow up a row
const MAX_COLSPAN: usize = 100;

/// A table pulled out of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column headings; numbered from 0 when the table has no header row
    pub header: Vec<String>,

    /// Body rows, each padded to the header width
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of columns
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Renders the table as a markdown pipe grid with padded columns
    pub fn to_markdown(&self) -> String {
        let mut widths: Vec<usize> = self
            .header
            .iter()
            .map(|h| h.chars().count().max(3))
            .collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &self.header, &widths);
        out.push('|');
        for width in &widths {
            out.push_str(&"-".repeat(width + 2));
            out.push('|');
        }
        out.push('\n');
        for row in &self.rows {
            push_row(&mut out, row, &widths);
        }

        // drop the final newline; callers add their own framing
        out.pop();
        out
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad + 1));
        out.push('|');
    }
    out.push('\n');
}

/// Extracts every table in the document, in document order
///
/// Tables with no cells are skipped. Rows of a nested table belong to the
/// nested table only.
pub fn extract_tables(document: &Html) -> Vec<Table> {
    let Ok(table_selector) = Selector::parse("table") else {
        return Vec::new();
    };

    document
        .select(&table_selector)
        .filter_map(parse_table)
        .collect()
}

/// Extracts and renders the tables of a document as numbered text blocks
///
/// Numbering starts at 1 within the page: `"Table 1:\n<grid>\n"`.
pub fn render_tables(document: &Html) -> Vec<String> {
    extract_tables(document)
        .iter()
        .enumerate()
        .map(|(i, table)| format!("Table {}:\n{}\n", i + 1, table.to_markdown()))
        .collect()
}

struct Cell {
    text: String,
    is_heading: bool,
}

fn parse_table(table: ElementRef) -> Option<Table> {
    let row_selector = Selector::parse("tr").ok()?;

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for row in table.select(&row_selector) {
        if !is_own_row(row, table) {
            continue;
        }

        let cells = parse_row(row);
        if cells.is_empty() {
            continue;
        }

        let is_heading_row =
            in_thead(row, table) || cells.iter().all(|cell| cell.is_heading);
        let texts: Vec<String> = cells.into_iter().map(|cell| cell.text).collect();

        if header.is_none() && rows.is_empty() && is_heading_row {
            header = Some(texts);
        } else {
            rows.push(texts);
        }
    }

    let width = rows
        .iter()
        .map(Vec::len)
        .chain(header.iter().map(Vec::len))
        .max()
        .unwrap_or(0);
    if width == 0 {
        return None;
    }

    let mut header = header.unwrap_or_else(|| (0..width).map(|i| i.to_string()).collect());
    header.resize(width, String::new());
    for row in &mut rows {
        row.resize(width, String::new());
    }

    Some(Table { header, rows })
}

fn parse_row(row: ElementRef) -> Vec<Cell> {
    let mut cells = Vec::new();

    for child in row.children().filter_map(ElementRef::wrap) {
        let name = child.value().name();
        if name != "td" && name != "th" {
            continue;
        }

        let text = child
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
            .replace('|', "\\|");

        let span = child
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_COLSPAN);

        for _ in 0..span {
            cells.push(Cell {
                text: text.clone(),
                is_heading: name == "th",
            });
        }
    }

    cells
}

/// True if the nearest enclosing `<table>` of `row` is `table`
fn is_own_row(row: ElementRef, table: ElementRef) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
        == Some(table)
}

fn in_thead(row: ElementRef, table: ElementRef) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|el| *el != table)
        .any(|el| el.value().name() == "thead")
}
