use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CsvSettings {
    pub delimiter: u8,
    /// Reject rows whose field count differs from the header.
    pub strict_width: bool,
}

impl CsvSettings {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Default::default()
        }
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            delimiter: b',',
            strict_width: true,
        }
    }
}
