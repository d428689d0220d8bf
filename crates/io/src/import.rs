// Bulk import: spreadsheet/CSV files into entity tables.
//
// The file extension selects the parser. A stream that does not parse is a
// hard error surfaced before any insert; after that, rows are inserted
// independently in file order with no spanning transaction.

use std::fmt;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use adbook_core::columns::{normalize_header, ColumnSpec, AD_COLUMNS, CONTRACT_COLUMNS};
use adbook_store::{RecordStore, StoreError};

use crate::rows::{ad_from_row, contract_from_row, text_value, Cell, RowSet};

#[derive(Debug)]
pub enum ImportError {
    /// Extension is not a recognized spreadsheet/CSV format.
    UnsupportedExtension(String),
    /// The stream is not a well-formed spreadsheet/CSV. The whole import
    /// aborts before any row is inserted.
    Parse(String),
    /// A single row's insert failed. Prior rows stay inserted.
    Store(StoreError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedExtension(ext) => {
                write!(f, "unsupported import format: .{ext}")
            }
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<StoreError> for ImportError {
    fn from(e: StoreError) -> Self {
        ImportError::Store(e)
    }
}

/// Which entity table a file loads into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Ads,
    Contracts,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Ads => "ads",
            ImportKind::Contracts => "contracts",
        }
    }

    /// Expected column set for this kind.
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            ImportKind::Ads => AD_COLUMNS,
            ImportKind::Contracts => CONTRACT_COLUMNS,
        }
    }
}

/// Parse and load `path` into the store. Returns the number of inserted
/// rows; skipped ad rows are excluded from the count.
pub fn import_file(
    store: &RecordStore,
    path: &Path,
    kind: ImportKind,
) -> Result<usize, ImportError> {
    let set = read_rows(path, kind)?;
    import_rows(store, &set, kind)
}

/// Load already-parsed rows in file order.
///
/// Skip rule (ads only): a row whose name or date is missing or empty is
/// dropped silently — not inserted, not counted, no diagnostic.
pub fn import_rows(
    store: &RecordStore,
    set: &RowSet,
    kind: ImportKind,
) -> Result<usize, ImportError> {
    let mut inserted = 0;
    for index in 0..set.len() {
        match kind {
            ImportKind::Ads => {
                let ad = ad_from_row(set, index);
                if ad.client.is_empty() || ad.date.is_none() {
                    continue;
                }
                store.save_ad(&ad)?;
            }
            ImportKind::Contracts => {
                let contract = contract_from_row(set, index);
                store.save_contract(&contract)?;
            }
        }
        inserted += 1;
    }
    Ok(inserted)
}

/// Parse a file into rows with a header-derived column set, dispatching on
/// extension.
///
/// The header row is the first row containing a cell that addresses one of
/// the kind's expected columns — so a report re-imports past its title and
/// spacing rows. Files whose headers match nothing fall back to the first
/// row. Rows with no content at all are dropped.
pub fn read_rows(path: &Path, kind: ImportKind) -> Result<RowSet, ImportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let raw = match ext.as_str() {
        "csv" => read_csv_raw(path)?,
        "xlsx" | "xls" | "xlsb" | "ods" => read_sheet_raw(path)?,
        other => return Err(ImportError::UnsupportedExtension(other.to_string())),
    };

    into_rowset(raw, kind.columns())
}

fn into_rowset(
    mut raw: Vec<Vec<Cell>>,
    columns: &[ColumnSpec],
) -> Result<RowSet, ImportError> {
    raw.retain(|row| row.iter().any(|cell| *cell != Cell::Empty));
    if raw.is_empty() {
        return Err(ImportError::Parse("file has no header row".to_string()));
    }

    let header_idx = raw
        .iter()
        .position(|row| {
            row.iter().any(|cell| match cell {
                Cell::Text(s) => {
                    let normalized = normalize_header(s);
                    columns.iter().any(|spec| spec.matches(&normalized))
                }
                _ => false,
            })
        })
        .unwrap_or(0);

    let rows = raw.split_off(header_idx + 1);
    let headers = raw
        .pop()
        .map(|row| row.iter().map(text_value).collect())
        .unwrap_or_default();

    Ok(RowSet::new(headers, rows))
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252 CSVs
/// exported by Excel).
fn read_file_as_utf8(path: &Path) -> Result<String, ImportError> {
    let mut file = std::fs::File::open(path).map_err(|e| ImportError::Parse(e.to_string()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ImportError::Parse(e.to_string()))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across
/// the first few lines. The delimiter producing the most consistent field
/// count (>1 field) wins; ties break toward more columns.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

fn read_csv_raw(path: &Path) -> Result<Vec<Vec<Cell>>, ImportError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::Parse(e.to_string()))?;
        let cells = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(cells);
    }

    Ok(rows)
}

/// Read the first sheet of an Excel-family workbook, as `pd.read_excel`
/// reads an upload.
fn read_sheet_raw(path: &Path) -> Result<Vec<Vec<Cell>>, ImportError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ImportError::Parse(format!("failed to open spreadsheet: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| ImportError::Parse("spreadsheet contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| ImportError::Parse(format!("failed to read sheet '{first}': {e}")))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect())
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        // Date serials stay numeric; the mapper's date coercion converts
        // them (1900 date system)
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
