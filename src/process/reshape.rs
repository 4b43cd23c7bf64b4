use crate::error::{PipelineError, Result};
use crate::process::raw_table::RawTable;
use crate::process::utils::{clean_str, parse_value};
use tracing::debug;

/// Which columns of a wide extract identify the area, and which suffix marks
/// the value columns worth keeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapeOptions {
    pub name_column: String,
    pub code_column: String,
    pub suffix: char,
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self {
            name_column: "Area_name".to_string(),
            code_column: "STCOU".to_string(),
            suffix: 'D',
        }
    }
}

/// One (area, compound key) cell of the wide table.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub area_name: String,
    pub area_code: String,
    /// Original column name, e.g. `EDU010187D`.
    pub key: String,
    pub value: Option<f64>,
}

/// Long form of one extract; `value_label` names the metric held in `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    pub value_label: String,
    pub rows: Vec<LongRecord>,
}

/// Keep the identifying columns plus every column ending in `opts.suffix`,
/// then emit one row per (area, value column). Rows come out area-major, in
/// the original column order within each area.
pub fn reshape(raw: &RawTable, value_label: &str, opts: &ReshapeOptions) -> Result<LongTable> {
    raw.check_shape()?;
    let name_idx = raw.column_index(&opts.name_column).ok_or_else(|| {
        PipelineError::Schema(format!("missing identifying column `{}`", opts.name_column))
    })?;
    let code_idx = raw.column_index(&opts.code_column).ok_or_else(|| {
        PipelineError::Schema(format!("missing identifying column `{}`", opts.code_column))
    })?;

    let value_cols: Vec<(usize, String)> = raw
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != name_idx && *i != code_idx)
        .map(|(i, h)| (i, clean_str(h)))
        .filter(|(_, h)| h.ends_with(opts.suffix))
        .collect();

    if value_cols.is_empty() {
        return Err(PipelineError::Schema(format!(
            "no value columns end in `{}` (headers: {})",
            opts.suffix,
            raw.headers.join(",")
        )));
    }

    let mut rows = Vec::with_capacity(raw.rows.len() * value_cols.len());
    for record in &raw.rows {
        let area_name = clean_str(&record[name_idx]);
        let area_code = clean_str(&record[code_idx]);
        for (idx, key) in &value_cols {
            rows.push(LongRecord {
                area_name: area_name.clone(),
                area_code: area_code.clone(),
                key: key.clone(),
                value: parse_value(&record[*idx]),
            });
        }
    }

    debug!(
        value_columns = value_cols.len(),
        raw_rows = raw.rows.len(),
        long_rows = rows.len(),
        "reshaped"
    );

    Ok(LongTable {
        value_label: value_label.to_string(),
        rows,
    })
}
