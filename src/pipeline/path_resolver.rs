use crate::errors::{AppError, AppResult};
use crate::pipeline::validator::parse_note_date;
use chrono::Datelike;
use std::path::{Path, PathBuf};

/// `base/YYYY/MM/DD.md`. Only called on validated notes, so an unparseable
/// date here is an internal fault.
pub fn archive_path(base: &Path, date: &str) -> AppResult<PathBuf> {
    let parsed = parse_note_date(date)
        .ok_or_else(|| AppError::Internal(format!("cannot resolve archive path for date '{}'", date)))?;

    Ok(base
        .join(format!("{:04}", parsed.year()))
        .join(format!("{:02}", parsed.month()))
        .join(format!("{:02}.md", parsed.day())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_date_to_day_file() {
        let path = archive_path(Path::new("/archive"), "2024-09-12").expect("path");
        assert_eq!(path, PathBuf::from("/archive/2024/09/12.md"));

        let path = archive_path(Path::new("notes"), "2023-01-05").expect("path");
        assert_eq!(path, Path::new("notes").join("2023").join("01").join("05.md"));
    }

    #[test]
    fn unvalidated_date_is_internal_fault() {
        let error = archive_path(Path::new("/archive"), "2024-9-12").expect_err("invalid");
        assert!(matches!(error, AppError::Internal(_)));
    }
}
