//! Export formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Paginated PDF report
    Document,
    /// Delimited text with a status column
    Spreadsheet,
    /// Delimited text with a date column
    FlatText,
}

impl ExportFormat {
    /// All formats, in menu order
    pub const ALL: [ExportFormat; 3] = [Self::Document, Self::Spreadsheet, Self::FlatText];

    /// File extension of the produced artifact
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Document => "pdf",
            Self::Spreadsheet | Self::FlatText => "csv",
        }
    }

    /// MIME type of the produced artifact
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Document => "application/pdf",
            Self::Spreadsheet | Self::FlatText => "text/csv; charset=utf-8",
        }
    }

    /// Label shown to the user in notifications
    pub fn label(&self) -> &'static str {
        match self {
            Self::Document => "PDF",
            Self::Spreadsheet => "Excel/CSV",
            Self::FlatText => "CSV",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::FlatText => "flat-text",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "document" | "pdf" => Ok(Self::Document),
            "spreadsheet" | "excel" => Ok(Self::Spreadsheet),
            "flat-text" | "flat_text" | "flattext" | "csv" => Ok(Self::FlatText),
            other => Err(format!(
                "Unknown export format '{other}'. Must be one of: document, spreadsheet, flat-text"
            )),
        }
    }
}
