// Row mapper: loosely typed sheet rows in, typed entity records out.
//
// Coercion and defaults are driven by the column tables in
// `adbook_core::columns`; mapping a row never fails. The only rows an
// import refuses are handled by the skip rule in `import.rs`.

use std::collections::HashMap;

use chrono::NaiveDate;

use adbook_core::columns::{normalize_header, ColumnKind, ColumnSpec, AD_COLUMNS, CONTRACT_COLUMNS};
use adbook_core::{Ad, Contract, PartyRef};

/// One spreadsheet cell as parsers deliver it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

/// A parsed sheet: a header-derived column-name set plus body rows in file
/// order. Headers are stored normalized (see `normalize_header`).
#[derive(Debug, Clone)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RowSet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let headers = headers.iter().map(|h| normalize_header(h)).collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, spec: &ColumnSpec) -> Option<usize> {
        self.headers.iter().position(|h| spec.matches(h))
    }

    fn cell(&self, index: usize, col: Option<usize>) -> &Cell {
        col.and_then(|c| self.rows.get(index).and_then(|row| row.get(c)))
            .unwrap_or(&Cell::Empty)
    }
}

/// One row coerced against a column table: every expected column is present
/// with its type-appropriate value (or default).
pub struct MappedRow {
    text: HashMap<&'static str, String>,
    numbers: HashMap<&'static str, f64>,
    dates: HashMap<&'static str, Option<NaiveDate>>,
}

impl MappedRow {
    pub fn text(&self, name: &str) -> &str {
        self.text.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn number(&self, name: &str) -> f64 {
        self.numbers.get(name).copied().unwrap_or(0.0)
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.dates.get(name).copied().flatten()
    }
}

/// Coerce row `index` of `set` against `columns`. Missing columns and
/// malformed cells take the column kind's default; this never fails.
pub fn map_row(set: &RowSet, index: usize, columns: &'static [ColumnSpec]) -> MappedRow {
    let mut mapped = MappedRow {
        text: HashMap::new(),
        numbers: HashMap::new(),
        dates: HashMap::new(),
    };

    for spec in columns {
        let cell = set.cell(index, set.column_index(spec));
        match spec.kind {
            ColumnKind::Text => {
                mapped.text.insert(spec.name, text_value(cell));
            }
            ColumnKind::Number | ColumnKind::Money => {
                mapped.numbers.insert(spec.name, number_value(cell));
            }
            ColumnKind::Date => {
                mapped.dates.insert(spec.name, date_value(cell));
            }
        }
    }

    mapped
}

/// Map one row to an Ad insert. The `name` column becomes the client
/// reference text; bulk-loaded rows are never linked to a record id.
pub fn ad_from_row(set: &RowSet, index: usize) -> Ad {
    let row = map_row(set, index, AD_COLUMNS);
    Ad {
        id: 0,
        company: PartyRef::Unlinked(row.text("company").to_string()),
        client: PartyRef::Unlinked(row.text("name").to_string()),
        location: row.text("location").to_string(),
        bank_number: row.text("bank_number").to_string(),
        check_name: row.text("check_name").to_string(),
        status: row.text("status").to_string(),
        date: row.date("date"),
        amount: row.number("money"),
        notes: row.text("notes").to_string(),
        attachment: None,
    }
}

/// Map one row to a Contract insert.
pub fn contract_from_row(set: &RowSet, index: usize) -> Contract {
    let row = map_row(set, index, CONTRACT_COLUMNS);
    Contract {
        id: 0,
        invoke_number: row.number("invoke_number") as i64,
        company: PartyRef::Unlinked(row.text("company").to_string()),
        client: PartyRef::Unlinked(row.text("name").to_string()),
        location: row.text("location").to_string(),
        bank_number: row.text("bank_number").to_string(),
        check_name: row.text("check_name").to_string(),
        date_start: row.date("date_start"),
        date_finish: row.date("date_finish"),
        amount: row.number("money"),
        notes: row.text("notes").to_string(),
        attachment: None,
    }
}

// ---------------------------------------------------------------------------
// Cell coercions
// ---------------------------------------------------------------------------

/// Text coercion: numeric cells become their textual representation
/// (integers without a trailing `.0`).
pub fn text_value(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
    }
}

/// Numeric coercion: text parses as f64, anything else defaults to 0.
pub fn number_value(cell: &Cell) -> f64 {
    match cell {
        Cell::Empty => 0.0,
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse().unwrap_or(0.0),
    }
}

/// Date coercion: numeric cells are Excel 1900-system serials, text cells
/// accept ISO-8601 and day-first renderings. Unreadable cells count as
/// absent.
pub fn date_value(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => excel_serial_to_date(*n),
        Cell::Text(s) => parse_date_text(s),
    }
}

pub fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%d-%m-%Y"))
        .ok()
        // Datetime text (e.g. "2025-06-01 00:00:00") keeps its date part
        .or_else(|| s.get(..10).and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()))
}

/// Excel date serial to calendar date, 1900 date system (the same
/// assumption the xlsx reader makes for `DateTime` cells). The time
/// fraction is discarded.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Serial 2958465 = 9999-12-31; anything outside is not a date cell
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .checked_add_signed(chrono::Duration::days(serial.floor() as i64))
}
