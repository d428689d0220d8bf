// Spreadsheet I/O - row mapping, bulk import, styled report export

pub mod import;
pub mod report;
pub mod rows;

/// MIME type callers should attach when serving a generated report.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
