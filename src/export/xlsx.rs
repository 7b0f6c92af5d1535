// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{DATE_NUM_FORMAT, HOURS_NUM_FORMAT, date_to_excel_serial};
use crate::export::model::{MonthSection, grand_total_hours, sheet_headers};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const COL_DATE: u16 = 0;
const COL_DESC: u16 = 1;
const COL_HOURS: u16 = 2;

/// Cell formats used by the summary sheet.
struct SheetStyles {
    header: Format,
    month: Format,
    date: Format,
    text: Format,
    hours: Format,
    subtotal_label: Format,
    subtotal_value: Format,
}

impl SheetStyles {
    fn new() -> Self {
        let base = Format::new().set_border(FormatBorder::Thin);

        Self {
            header: base
                .clone()
                .set_bold()
                .set_font_color(Color::RGB(0xFFFFFF))
                .set_background_color(Color::RGB(0x2F75B5))
                .set_pattern(FormatPattern::Solid),
            month: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0xEAF3FB))
                .set_pattern(FormatPattern::Solid),
            date: base.clone().set_num_format(DATE_NUM_FORMAT),
            text: base.clone(),
            hours: base
                .clone()
                .set_num_format(HOURS_NUM_FORMAT)
                .set_align(FormatAlign::Right),
            subtotal_label: base.clone().set_bold().set_italic(),
            subtotal_value: base
                .set_bold()
                .set_num_format(HOURS_NUM_FORMAT)
                .set_align(FormatAlign::Right)
                .set_border_top(FormatBorder::Double),
        }
    }
}

/// Monthly summary workbook: one sheet, a block per month with its rows and
/// a subtotal, then the grand total.
pub(crate) fn export_xlsx(sections: &[MonthSection], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(title))
        .map_err(to_export_error)?;

    let styles = SheetStyles::new();
    let headers = sheet_headers();

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &styles.header)
            .map_err(to_export_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut desc_width = UnicodeWidthStr::width(headers[1]);
    let mut row: u32 = 1;

    for section in sections {
        // month header
        worksheet
            .write_with_format(row, COL_DATE, section.title(), &styles.month)
            .map_err(to_export_error)?;
        row += 1;

        for item in &section.rows {
            worksheet
                .write_with_format(row, COL_DATE, date_to_excel_serial(item.date), &styles.date)
                .map_err(to_export_error)?;
            worksheet
                .write_with_format(row, COL_DESC, item.description.as_str(), &styles.text)
                .map_err(to_export_error)?;
            worksheet
                .write_with_format(row, COL_HOURS, item.hours, &styles.hours)
                .map_err(to_export_error)?;

            desc_width = desc_width.max(UnicodeWidthStr::width(item.description.as_str()));
            row += 1;
        }

        write_total(
            worksheet,
            row,
            &format!("Total {}", section.title()),
            section.subtotal_hours,
            &styles,
        )?;
        row += 2;
    }

    write_total(
        worksheet,
        row,
        "Grand total",
        grand_total_hours(sections),
        &styles,
    )?;

    worksheet
        .set_column_width(COL_DATE, 16)
        .map_err(to_export_error)?;
    worksheet
        .set_column_width(COL_DESC, (desc_width.min(80) + 2) as f64)
        .map_err(to_export_error)?;
    worksheet
        .set_column_width(COL_HOURS, 14)
        .map_err(to_export_error)?;

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_total(
    worksheet: &mut Worksheet,
    row: u32,
    label: &str,
    hours: f64,
    styles: &SheetStyles,
) -> AppResult<()> {
    worksheet
        .write_with_format(row, COL_DESC, label, &styles.subtotal_label)
        .map_err(to_export_error)?;
    worksheet
        .write_with_format(row, COL_HOURS, hours, &styles.subtotal_value)
        .map_err(to_export_error)?;
    Ok(())
}

/// Excel limits sheet names to 31 chars and forbids a few symbols.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '-',
            other => other,
        })
        .take(31)
        .collect();

    if cleaned.trim().is_empty() {
        "Tasks".to_string()
    } else {
        cleaned
    }
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
