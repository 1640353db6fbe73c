//! Participant export
//!
//! Turns an event's metadata and its participant list into a single-sheet
//! `.xlsx` workbook. The sheet is first built as a plain row model, then
//! rendered; the file only appears under its final name once fully written.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use rust_xlsxwriter::Workbook;
use tracing::{debug, warn};

use crate::config::settings::ExportConfig;
use crate::models::{EventDetails, Participant};
use crate::utils::errors::{ExportError, ExportResult};
use crate::utils::helpers::{format_event_date, sanitize_file_stem};
use crate::utils::logging::log_export;

pub const SHEET_NAME: &str = "Participants";
pub const COLUMN_HEADERS: [&str; 6] = ["S.No", "Student ID", "Name", "Email", "Department", "Contact No"];
pub const COLUMN_WIDTHS: [f64; 6] = [8.0, 15.0, 25.0, 30.0, 20.0, 15.0];

const MISSING: &str = "N/A";
const FALLBACK_EVENT_NAME: &str = "Event";

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn or_missing(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => Cell::text(value),
            None => Cell::text(MISSING),
        }
    }
}

/// Row model of the participants sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSheet {
    pub rows: Vec<Vec<Cell>>,
    /// Index of the column header row
    pub header_row: usize,
}

impl ParticipantSheet {
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        &self.rows[self.header_row + 1..]
    }
}

/// Lay out the metadata block, a blank row, the column headers and one row
/// per participant.
pub fn build_participant_sheet(
    details: &EventDetails,
    participants: &[Participant],
    date_format: &str,
) -> ParticipantSheet {
    let date = details
        .date
        .as_deref()
        .map(|raw| format_event_date(raw, date_format));
    let club = details.club.as_ref().and_then(|club| club.name.as_deref());

    let mut rows = vec![
        vec![Cell::text("Event Details")],
        vec![Cell::text("Event Name"), Cell::or_missing(details.name.as_deref())],
        vec![Cell::text("Date"), Cell::or_missing(date.as_deref())],
        vec![Cell::text("Time"), Cell::or_missing(details.time.as_deref())],
        vec![Cell::text("Venue"), Cell::or_missing(details.venue.as_deref())],
        vec![Cell::text("Club"), Cell::or_missing(club)],
        vec![Cell::text("Total Participants"), Cell::Number(participants.len() as f64)],
        vec![Cell::Empty],
    ];

    let header_row = rows.len();
    rows.push(COLUMN_HEADERS.iter().map(|h| Cell::text(*h)).collect());

    for (index, participant) in participants.iter().enumerate() {
        rows.push(vec![
            Cell::Number((index + 1) as f64),
            Cell::or_missing(participant.student_id.as_deref()),
            Cell::or_missing(Some(participant.name.as_str())),
            Cell::or_missing(Some(participant.email.as_str())),
            Cell::or_missing(participant.department.as_deref()),
            Cell::or_missing(participant.contact_no.as_deref()),
        ]);
    }

    ParticipantSheet { rows, header_row }
}

/// `<sanitized name>_Participants_<YYYY-MM-DD>.xlsx`
pub fn export_filename(event_name: Option<&str>, date: NaiveDate) -> String {
    let name = event_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_EVENT_NAME);
    format!("{}_Participants_{}.xlsx", sanitize_file_stem(name), date.format("%Y-%m-%d"))
}

/// Render the row model into workbook bytes
pub fn render_workbook(sheet: &ParticipantSheet) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (row, cells) in sheet.rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row as u32, col as u16, text)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row as u32, col as u16, *number)?;
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Writes participant workbooks into the configured output directory
#[derive(Debug, Clone)]
pub struct ParticipantExporter {
    output_dir: PathBuf,
    date_format: String,
}

impl ParticipantExporter {
    /// Create a new ParticipantExporter instance
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            date_format: config.date_format.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export the participants of one event. Returns the written file's path.
    ///
    /// An empty list is rejected before anything touches the filesystem.
    pub async fn export(&self, details: &EventDetails, participants: &[Participant]) -> ExportResult<PathBuf> {
        let event_name = details.name.as_deref().unwrap_or(FALLBACK_EVENT_NAME);

        if participants.is_empty() {
            log_export(event_name, 0, None);
            return Err(ExportError::NothingToExport);
        }

        let sheet = build_participant_sheet(details, participants, &self.date_format);
        let bytes = render_workbook(&sheet)?;

        let file_name = export_filename(details.name.as_deref(), Utc::now().date_naive());
        let target = self.output_dir.join(&file_name);
        write_atomically(&target, &bytes).await?;

        log_export(event_name, participants.len(), Some(&file_name));
        Ok(target)
    }
}

async fn write_atomically(target: &Path, bytes: &[u8]) -> ExportResult<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    tokio::fs::create_dir_all(dir).await?;

    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = dir.join(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4().simple()));

    debug!(path = %temp.display(), "Writing export to temporary file");
    if let Err(e) = tokio::fs::write(&temp, bytes).await {
        discard_temp(&temp).await;
        return Err(e.into());
    }

    if let Err(e) = tokio::fs::rename(&temp, target).await {
        discard_temp(&temp).await;
        return Err(e.into());
    }

    Ok(())
}

async fn discard_temp(temp: &Path) {
    if let Err(e) = tokio::fs::remove_file(temp).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %temp.display(), error = %e, "Failed to remove temporary export file");
        }
    }
}
