use crate::errors::{AppError, AppResult, ValidationError};
use crate::models::Note;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// chrono alone accepts single-digit months and days; the archive layout does not.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));

pub fn parse_note_date(value: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn validate_note(note: &Note) -> Result<(), ValidationError> {
    if note.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if note.date.trim().is_empty() {
        return Err(ValidationError::MissingDate);
    }
    if parse_note_date(&note.date).is_none() {
        return Err(ValidationError::InvalidDate(note.date.clone()));
    }
    Ok(())
}

/// Checks every note before anything is written; the first failure wins.
pub fn validate_all(notes: &[Note]) -> AppResult<()> {
    for (position, note) in notes.iter().enumerate() {
        if let Err(source) = validate_note(note) {
            tracing::warn!(
                note = position + 1,
                title = %note.title,
                date = %note.date,
                error = %source,
                "note failed validation"
            );
            return Err(AppError::Validation {
                index: position + 1,
                source,
            });
        }
    }
    Ok(())
}
