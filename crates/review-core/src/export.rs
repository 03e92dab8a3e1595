//! Serialize the combined dataset as CSV, pretty JSON or an Excel workbook.

use review_models::{CombinedRecord, COLUMNS};
use rust_xlsxwriter::{ColNum, ExcelDateTime, Format, RowNum, Workbook, Worksheet, XlsxError};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

const DATE_CELL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SHEET_NAME: &str = "reviews";
const EXCEL_DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
/// Longest string an Excel cell accepts, in characters
const EXCEL_MAX_STRING_CHARS: usize = 32_767;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Excel export failed: {0}")]
    Excel(#[from] XlsxError),
}

impl ExportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "excel",
        };
        write!(f, "{}", name)
    }
}

/// Parse `format` and export. An unknown format fails before `path` is touched.
pub fn export_str<P: AsRef<Path>>(records: &[CombinedRecord], path: P, format: &str) -> Result<(), ExportError> {
    let format = format.parse::<ExportFormat>()?;
    export(records, path, format)
}

/// Write `records` to `path` in `format`, creating parent directories as needed.
pub fn export<P: AsRef<Path>>(records: &[CombinedRecord], path: P, format: ExportFormat) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }
    }

    debug!(path = %path.display(), %format, records = records.len(), "Exporting combined records");
    match format {
        ExportFormat::Csv => write_csv(records, path)?,
        ExportFormat::Json => write_json(records, path)?,
        ExportFormat::Excel => write_excel(records, path)?,
    }

    info!(path = %path.display(), %format, records = records.len(), "Export complete");
    Ok(())
}

/// Read a JSON export back into records.
pub fn read_json_export<P: AsRef<Path>>(path: P) -> Result<Vec<CombinedRecord>, ExportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn write_csv(records: &[CombinedRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(text_row(record)?)?;
    }
    writer.flush().map_err(|e| ExportError::io(path, e))
}

fn write_json(records: &[CombinedRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::io(path, e))
}

fn write_excel(records: &[CombinedRecord], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    let date_format = Format::new().set_num_format(EXCEL_DATE_FORMAT);

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as ColNum, *name)?;
    }
    for (i, record) in records.iter().enumerate() {
        write_excel_row(worksheet, (i + 1) as RowNum, record, &date_format)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_excel_row(
    sheet: &mut Worksheet,
    row: RowNum,
    combined: &CombinedRecord,
    date_format: &Format,
) -> Result<(), ExportError> {
    let record = &combined.record;
    let images = serde_json::to_string(&record.images)?;

    if let Some(rating) = record.rating {
        sheet.write_number(row, 0, rating)?;
    }
    sheet.write_string(row, 1, excel_text(&record.title, row, "title"))?;
    sheet.write_string(row, 2, excel_text(&record.text, row, "text"))?;
    sheet.write_string(row, 3, excel_text(&images, row, "images"))?;
    sheet.write_string(row, 4, excel_text(&record.asin, row, "asin"))?;
    sheet.write_string(row, 5, excel_text(&record.parent_asin, row, "parent_asin"))?;
    sheet.write_string(row, 6, excel_text(&record.user_id, row, "user_id"))?;
    sheet.write_number(row, 7, record.timestamp as f64)?;
    sheet.write_number(row, 8, record.helpful_vote as f64)?;
    sheet.write_boolean(row, 9, record.verified_purchase)?;
    sheet.write_string(row, 10, excel_text(&record.category, row, "category"))?;
    if let Some(date) = combined.review_date {
        // Excel cannot represent dates before 1900; those stay as text
        match ExcelDateTime::from_timestamp(date.timestamp()) {
            Ok(datetime) => {
                sheet.write_datetime_with_format(row, 11, &datetime, date_format)?;
            }
            Err(_) => {
                sheet.write_string(row, 11, date.format(DATE_CELL_FORMAT).to_string())?;
            }
        }
    }
    Ok(())
}

/// `value` cut to the longest string an Excel cell holds.
fn excel_text<'a>(value: &'a str, row: RowNum, column: &str) -> &'a str {
    match value.char_indices().nth(EXCEL_MAX_STRING_CHARS) {
        Some((cut, _)) => {
            debug!(row, column, chars = value.chars().count(), "Truncating cell to Excel's string limit");
            &value[..cut]
        }
        None => value,
    }
}

/// One CSV row in [`COLUMNS`] order. Absent values become empty cells.
fn text_row(combined: &CombinedRecord) -> Result<[String; 12], ExportError> {
    let record = &combined.record;
    Ok([
        record.rating.map(|r| format!("{:?}", r)).unwrap_or_default(),
        record.title.clone(),
        record.text.clone(),
        serde_json::to_string(&record.images)?,
        record.asin.clone(),
        record.parent_asin.clone(),
        record.user_id.clone(),
        record.timestamp.to_string(),
        record.helpful_vote.to_string(),
        record.verified_purchase.to_string(),
        record.category.clone(),
        combined
            .review_date
            .map(|d| d.format(DATE_CELL_FORMAT).to_string())
            .unwrap_or_default(),
    ])
}
