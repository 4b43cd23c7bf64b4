use crate::error::{PipelineError, Result};
use crate::process::utils::clean_str;

/// A wide extract held in memory: one row per geographic area, one column
/// per (survey, year) compound key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names from the header row, as the file claims them.
    pub headers: Vec<String>,
    /// Each data row, one String per field.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Every row must have exactly one cell per header.
    pub fn check_shape(&self) -> Result<()> {
        if self.headers.is_empty() {
            return Err(PipelineError::Input("raw table has no header row".into()));
        }
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != self.headers.len() {
                return Err(PipelineError::Input(format!(
                    "row {} has {} cells, expected {}",
                    idx,
                    row.len(),
                    self.headers.len()
                )));
            }
        }
        Ok(())
    }

    /// Position of `name` among the headers, compared after cleaning.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| clean_str(h) == name)
    }
}
