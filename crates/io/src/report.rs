// Styled spreadsheet reports.
//
// Fixed layout regardless of dataset size: merged title row, two spacing
// rows, shaded header row, bordered data rows, and a Total row summing the
// amount column. Produces an in-memory xlsx byte buffer plus a suggested
// file name; delivery (attachment headers, MIME type) is the caller's job.

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use adbook_core::columns::{amount_column, ColumnSpec, AD_COLUMNS, CONTRACT_COLUMNS, TEMPLATE_COLUMNS};
use adbook_core::{Ad, Contract};

/// Uniform display width applied to every report column.
pub const REPORT_COLUMN_WIDTH: f64 = 18.0;

const HEADER_SHADE: Color = Color::RGB(0xD9D9D9);
const AMOUNT_NUM_FORMAT: &str = "0.00";

/// Subtitle value meaning "no qualifier" (the company picker's catch-all).
pub const SUBTITLE_ALL: &str = "all";

/// One data cell of a report. Amounts get the two-decimal numeric format;
/// everything else — including numbers in non-amount columns — renders as
/// plain bordered text.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportCell {
    Text(String),
    Amount(f64),
}

/// A report ready to render: title, column table, and data rows already
/// filtered/sorted by the caller.
#[derive(Debug, Clone)]
pub struct ReportSheet {
    pub title: String,
    pub subtitle: Option<String>,
    pub columns: &'static [ColumnSpec],
    pub rows: Vec<Vec<ReportCell>>,
    pub file_name: String,
}

/// A rendered document: complete xlsx bytes plus the suggested attachment
/// name.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Project ads into a report sheet.
pub fn ads_report(ads: &[Ad], title: &str, subtitle: Option<&str>) -> ReportSheet {
    ReportSheet {
        title: title.to_string(),
        subtitle: subtitle.map(|s| s.to_string()),
        columns: AD_COLUMNS,
        rows: ads.iter().map(ad_cells).collect(),
        file_name: "ads_report.xlsx".to_string(),
    }
}

/// Project contracts into a report sheet.
pub fn contracts_report(contracts: &[Contract], title: &str, subtitle: Option<&str>) -> ReportSheet {
    ReportSheet {
        title: title.to_string(),
        subtitle: subtitle.map(|s| s.to_string()),
        columns: CONTRACT_COLUMNS,
        rows: contracts.iter().map(contract_cells).collect(),
        file_name: "contracts_report.xlsx".to_string(),
    }
}

fn ad_cells(ad: &Ad) -> Vec<ReportCell> {
    // Order matches AD_COLUMNS
    vec![
        ReportCell::Text(ad.company.display().to_string()),
        ReportCell::Text(ad.client.display().to_string()),
        ReportCell::Text(ad.location.clone()),
        ReportCell::Text(ad.bank_number.clone()),
        ReportCell::Text(ad.check_name.clone()),
        ReportCell::Text(ad.status.clone()),
        date_cell(ad.date),
        ReportCell::Amount(ad.amount),
        ReportCell::Text(ad.notes.clone()),
    ]
}

fn contract_cells(contract: &Contract) -> Vec<ReportCell> {
    // Order matches CONTRACT_COLUMNS; the counter is a non-amount number
    // and renders as text
    vec![
        ReportCell::Text(contract.invoke_number.to_string()),
        ReportCell::Text(contract.company.display().to_string()),
        ReportCell::Text(contract.client.display().to_string()),
        ReportCell::Text(contract.location.clone()),
        ReportCell::Text(contract.bank_number.clone()),
        ReportCell::Text(contract.check_name.clone()),
        date_cell(contract.date_start),
        date_cell(contract.date_finish),
        ReportCell::Amount(contract.amount),
        ReportCell::Text(contract.notes.clone()),
    ]
}

fn date_cell(date: Option<NaiveDate>) -> ReportCell {
    ReportCell::Text(date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default())
}

/// Render a report to xlsx bytes. Cannot fail for a well-formed sheet; the
/// error arm only carries writer failures through.
pub fn render(sheet: &ReportSheet) -> Result<RenderedReport, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let title_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_background_color(HEADER_SHADE);
    let body_format = Format::new().set_border(FormatBorder::Thin);
    let amount_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_num_format(AMOUNT_NUM_FORMAT);
    let total_label_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    let total_amount_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_num_format(AMOUNT_NUM_FORMAT);

    let last_col = sheet.columns.len().saturating_sub(1) as u16;

    // Row 0: title, merged across all data columns
    let title_text = match &sheet.subtitle {
        Some(s) if !s.trim().is_empty() && !s.trim().eq_ignore_ascii_case(SUBTITLE_ALL) => {
            format!("{} - {}", sheet.title, s.trim())
        }
        _ => sheet.title.clone(),
    };
    if last_col > 0 {
        worksheet
            .merge_range(0, 0, 0, last_col, &title_text, &title_format)
            .map_err(|e| format!("Failed to write title: {e}"))?;
    } else {
        worksheet
            .write_string_with_format(0, 0, &title_text, &title_format)
            .map_err(|e| format!("Failed to write title: {e}"))?;
    }

    // Rows 1-2 stay blank; row 3: column headers
    for (col, spec) in sheet.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(3, col as u16, spec.label, &header_format)
            .map_err(|e| format!("Failed to write header: {e}"))?;
    }

    // Rows 4..: data
    let mut row = 4u32;
    for cells in &sheet.rows {
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                ReportCell::Text(s) => worksheet
                    .write_string_with_format(row, col as u16, s, &body_format)
                    .map_err(|e| format!("Failed to write cell: {e}"))?,
                ReportCell::Amount(v) => worksheet
                    .write_number_with_format(row, col as u16, *v, &amount_format)
                    .map_err(|e| format!("Failed to write cell: {e}"))?,
            };
        }
        row += 1;
    }

    // Total row, only when the projection carries an amount column. Emitted
    // even for zero data rows (showing 0.00).
    if let Some(amount_idx) = amount_column(sheet.columns) {
        let total: f64 = sheet
            .rows
            .iter()
            .filter_map(|cells| match cells.get(amount_idx) {
                Some(ReportCell::Amount(v)) => Some(*v),
                _ => None,
            })
            .sum();
        worksheet
            .write_string_with_format(row, 0, "Total", &total_label_format)
            .map_err(|e| format!("Failed to write total label: {e}"))?;
        worksheet
            .write_number_with_format(row, amount_idx as u16, total, &total_amount_format)
            .map_err(|e| format!("Failed to write total: {e}"))?;
    }

    for col in 0..=last_col {
        worksheet
            .set_column_width(col, REPORT_COLUMN_WIDTH)
            .map_err(|e| format!("Failed to set column width: {e}"))?;
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| format!("Failed to save report: {e}"))?;

    Ok(RenderedReport { bytes, file_name: sheet.file_name.clone() })
}

/// The downloadable blank ads import template: a header-only sheet with the
/// user-facing column set.
pub fn blank_template() -> Result<RenderedReport, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_background_color(HEADER_SHADE);

    for (col, header) in TEMPLATE_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("Failed to write header: {e}"))?;
        worksheet
            .set_column_width(col as u16, REPORT_COLUMN_WIDTH)
            .map_err(|e| format!("Failed to set column width: {e}"))?;
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| format!("Failed to save template: {e}"))?;

    Ok(RenderedReport { bytes, file_name: "ads_template.xlsx".to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use calamine::{Data, Range, Reader, Xlsx};

    use adbook_core::PartyRef;

    fn read_back(bytes: &[u8]) -> Range<Data> {
        let mut workbook = Xlsx::new(Cursor::new(bytes.to_vec())).unwrap();
        let name = workbook.sheet_names()[0].clone();
        workbook.worksheet_range(&name).unwrap()
    }

    fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
        match range.get_value((row, col)) {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Float(n)) => n.to_string(),
            Some(Data::Empty) | None => String::new(),
            Some(other) => format!("{other:?}"),
        }
    }

    fn cell_number(range: &Range<Data>, row: u32, col: u32) -> f64 {
        match range.get_value((row, col)) {
            Some(Data::Float(n)) => *n,
            Some(Data::Int(n)) => *n as f64,
            other => panic!("expected number at ({row},{col}), got {other:?}"),
        }
    }

    fn sample_ads() -> Vec<Ad> {
        vec![
            Ad {
                company: PartyRef::Unlinked("Acme".into()),
                client: PartyRef::Unlinked("Jane".into()),
                status: "pending".into(),
                date: NaiveDate::from_ymd_opt(2025, 6, 1),
                amount: 100.25,
                ..Default::default()
            },
            Ad {
                company: PartyRef::Unlinked("Globex".into()),
                client: PartyRef::Unlinked("Bob".into()),
                status: "done".into(),
                date: NaiveDate::from_ymd_opt(2025, 6, 2),
                amount: 49.75,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn layout_title_headers_data_total() {
        let ads = sample_ads();
        let rendered = render(&ads_report(&ads, "Ads Report", Some("Acme"))).unwrap();
        assert_eq!(rendered.file_name, "ads_report.xlsx");

        let range = read_back(&rendered.bytes);

        // Row 0: merged title with subtitle qualifier
        assert_eq!(cell_text(&range, 0, 0), "Ads Report - Acme");
        // Rows 1-2 blank
        assert_eq!(cell_text(&range, 1, 0), "");
        assert_eq!(cell_text(&range, 2, 0), "");
        // Row 3: headers in column-table order
        assert_eq!(cell_text(&range, 3, 0), "Company");
        assert_eq!(cell_text(&range, 3, 7), "Amount");
        assert_eq!(cell_text(&range, 3, 8), "Notes");
        // Rows 4-5: data, dates as ISO text, amounts numeric
        assert_eq!(cell_text(&range, 4, 0), "Acme");
        assert_eq!(cell_text(&range, 4, 1), "Jane");
        assert_eq!(cell_text(&range, 4, 6), "2025-06-01");
        assert_eq!(cell_number(&range, 4, 7), 100.25);
        assert_eq!(cell_number(&range, 5, 7), 49.75);
        // Row 6: total
        assert_eq!(cell_text(&range, 6, 0), "Total");
        assert!((cell_number(&range, 6, 7) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn all_subtitle_is_dropped() {
        let rendered = render(&ads_report(&[], "Ads Report", Some("all"))).unwrap();
        let range = read_back(&rendered.bytes);
        assert_eq!(cell_text(&range, 0, 0), "Ads Report");
    }

    #[test]
    fn zero_rows_still_emit_skeleton_and_zero_total() {
        let rendered = render(&contracts_report(&[], "Contracts Report", None)).unwrap();
        let range = read_back(&rendered.bytes);

        assert_eq!(cell_text(&range, 0, 0), "Contracts Report");
        assert_eq!(cell_text(&range, 3, 0), "Invoke Number");
        // No data rows; total directly after the header block
        assert_eq!(cell_text(&range, 4, 0), "Total");
        assert_eq!(cell_number(&range, 4, 8), 0.0);
    }

    #[test]
    fn non_amount_numbers_render_as_text() {
        let contracts = vec![Contract {
            invoke_number: 42,
            company: PartyRef::Unlinked("Acme".into()),
            client: PartyRef::Unlinked("Jane".into()),
            amount: 10.0,
            ..Default::default()
        }];
        let rendered = render(&contracts_report(&contracts, "Contracts Report", None)).unwrap();
        let range = read_back(&rendered.bytes);

        // The counter lives in a text cell, not a numeric one
        assert_eq!(range.get_value((4, 0)), Some(&Data::String("42".to_string())));
        assert_eq!(cell_number(&range, 4, 8), 10.0);
    }

    #[test]
    fn total_sums_to_two_decimal_precision() {
        let ads: Vec<Ad> = [10.005, 20.115, 0.38]
            .iter()
            .map(|amount| Ad {
                client: PartyRef::Unlinked("x".into()),
                date: NaiveDate::from_ymd_opt(2025, 1, 1),
                amount: *amount,
                ..Default::default()
            })
            .collect();
        let rendered = render(&ads_report(&ads, "Ads Report", None)).unwrap();
        let range = read_back(&rendered.bytes);

        let total = cell_number(&range, 7, 7);
        assert!((total - 30.5).abs() < 1e-9);
    }

    #[test]
    fn render_is_structurally_idempotent() {
        let ads = sample_ads();
        let sheet = ads_report(&ads, "Ads Report", Some("Acme"));
        let first = read_back(&render(&sheet).unwrap().bytes);
        let second = read_back(&render(&sheet).unwrap().bytes);

        assert_eq!(first.get_size(), second.get_size());
        let (rows, cols) = first.get_size();
        for row in 0..rows as u32 {
            for col in 0..cols as u32 {
                assert_eq!(first.get_value((row, col)), second.get_value((row, col)));
            }
        }
    }

    #[test]
    fn template_exposes_the_ads_column_set() {
        let rendered = blank_template().unwrap();
        assert_eq!(rendered.file_name, "ads_template.xlsx");

        let range = read_back(&rendered.bytes);
        for (col, header) in TEMPLATE_COLUMNS.iter().enumerate() {
            assert_eq!(cell_text(&range, 0, col as u32), *header);
        }
        // Header only, no data rows
        assert_eq!(range.get_size().0, 1);
    }
}
