use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("Missing required fields ({0})")]
    MissingFields(&'static str),
    #[error("Invalid date format")]
    InvalidDate,
    #[error("Invalid number for {0}")]
    InvalidNumber(String),
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct ImportReport {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn record_success(&mut self) {
        self.success += 1;
    }

    /// `index` is the zero-based data row; sheet row numbers start after the header.
    pub fn record_failure(&mut self, index: usize, reason: impl std::fmt::Display) {
        self.failed += 1;
        self.errors.push(format!("Row {}: {}", index + 2, reason));
    }

    pub fn message(&self) -> String {
        format!(
            "Import completed: {} successful, {} failed",
            self.success, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ImportReport, RowError};

    #[test]
    fn failures_are_numbered_by_sheet_row() {
        let mut report = ImportReport::default();
        report.record_success();
        report.record_failure(1, RowError::InvalidDate);

        assert_eq!(report.errors, vec!["Row 3: Invalid date format"]);
        assert_eq!(report.message(), "Import completed: 1 successful, 1 failed");
    }
}
