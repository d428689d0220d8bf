//! Column schema tables for the spreadsheet wire contract.
//!
//! Import and export both consult these tables instead of reading cells ad
//! hoc: every expected column carries its storage name, the label a report
//! prints, the value kind (which fixes coercion and the default for a
//! missing cell), and any accepted header aliases.

/// Value kind of a column. Decides coercion on import and rendering on
/// export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free text. Numeric cells coerce to their textual representation.
    /// Missing cells default to the empty string.
    Text,
    /// Plain number (e.g. a contract counter). Renders as text in reports.
    /// Missing or malformed cells default to 0.
    Number,
    /// Monetary amount. Renders with a fixed two-decimal format and is
    /// summed into the report's Total row. Missing or malformed cells
    /// default to 0.
    Money,
    /// ISO-8601 calendar date. Unreadable cells count as absent.
    Date,
}

/// One column of an entity's import/export contract.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Storage column name; also the expected spreadsheet header on import.
    pub name: &'static str,
    /// Display label used for report headers.
    pub label: &'static str,
    pub kind: ColumnKind,
    /// Additional header spellings accepted on import (after
    /// normalization), e.g. a template that says `amount` for `money`.
    pub aliases: &'static [&'static str],
}

impl ColumnSpec {
    const fn new(name: &'static str, label: &'static str, kind: ColumnKind) -> Self {
        Self { name, label, kind, aliases: &[] }
    }

    const fn with_aliases(
        name: &'static str,
        label: &'static str,
        kind: ColumnKind,
        aliases: &'static [&'static str],
    ) -> Self {
        Self { name, label, kind, aliases }
    }

    /// True if a normalized header cell addresses this column.
    pub fn matches(&self, normalized: &str) -> bool {
        self.name == normalized || self.aliases.contains(&normalized)
    }
}

/// Normalize a spreadsheet header for matching: trim, lowercase, spaces to
/// underscores. Makes `"Bank Number"` address `bank_number`.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_ascii_lowercase().replace(' ', "_")
}

/// Columns of the ads import/export contract, in report order.
pub const AD_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("company", "Company", ColumnKind::Text),
    ColumnSpec::new("name", "Name", ColumnKind::Text),
    ColumnSpec::new("location", "Location", ColumnKind::Text),
    ColumnSpec::new("bank_number", "Bank Number", ColumnKind::Text),
    ColumnSpec::new("check_name", "Check Name", ColumnKind::Text),
    ColumnSpec::new("status", "Status", ColumnKind::Text),
    ColumnSpec::new("date", "Date", ColumnKind::Date),
    ColumnSpec::with_aliases("money", "Amount", ColumnKind::Money, &["amount"]),
    ColumnSpec::new("notes", "Notes", ColumnKind::Text),
];

/// Columns of the contracts import/export contract, in report order.
pub const CONTRACT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::with_aliases("invoke_number", "Invoke Number", ColumnKind::Number, &["contract_number"]),
    ColumnSpec::new("company", "Company", ColumnKind::Text),
    ColumnSpec::new("name", "Name", ColumnKind::Text),
    ColumnSpec::new("location", "Location", ColumnKind::Text),
    ColumnSpec::new("bank_number", "Bank Number", ColumnKind::Text),
    ColumnSpec::new("check_name", "Check Name", ColumnKind::Text),
    ColumnSpec::new("date_start", "Date Start", ColumnKind::Date),
    ColumnSpec::new("date_finish", "Date Finish", ColumnKind::Date),
    ColumnSpec::with_aliases("money", "Amount", ColumnKind::Money, &["amount"]),
    ColumnSpec::new("notes", "Notes", ColumnKind::Text),
];

/// Header row of the downloadable blank ads template. A simplified
/// user-facing column set: `amount` maps onto `money` and `client` is
/// not part of the import contract, so it is ignored on load.
pub const TEMPLATE_COLUMNS: &[&str] = &["name", "date", "company", "client", "amount", "notes"];

/// Position of the amount column within a column table, if any.
pub fn amount_column(columns: &[ColumnSpec]) -> Option<usize> {
    columns.iter().position(|c| c.kind == ColumnKind::Money)
}
