// src/dataset/mod.rs

pub mod arrow;
pub mod export;
mod frame;
mod merge;

pub use merge::{merge, merge_all};

use crate::error::{PipelineError, Result};
use crate::geo::Division;
use serde::Serialize;
use std::collections::HashSet;

/// Fixed columns every row carries after its geography columns.
pub const ROW_COLUMNS: &[&str] = &["area_code", "survey_id", "year"];

/// Geographic part of a row; the rest (code, survey, year, values) is shared.
pub trait Geography: Clone + Sized {
    /// Output column names, in the order `cells` returns them.
    const COLUMNS: &'static [&'static str];
    fn cells(&self) -> Vec<&str>;
    /// Rebuild from cells in `COLUMNS` order.
    fn from_cells(cells: &[&str]) -> Result<Self>;
}

/// True when `name` would clash with a fixed output column of either table.
pub fn is_reserved_column(name: &str) -> bool {
    ROW_COLUMNS
        .iter()
        .chain(County::COLUMNS)
        .chain(StateArea::COLUMNS)
        .any(|c| *c == name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct County {
    pub county: String,
    pub state: String,
}

impl Geography for County {
    const COLUMNS: &'static [&'static str] = &["county", "state"];
    fn cells(&self) -> Vec<&str> {
        vec![self.county.as_str(), self.state.as_str()]
    }
    fn from_cells(cells: &[&str]) -> Result<Self> {
        match cells {
            [county, state] => Ok(County {
                county: county.to_string(),
                state: state.to_string(),
            }),
            _ => Err(PipelineError::Shape(format!(
                "county geography needs 2 cells, got {}",
                cells.len()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateArea {
    pub area_name: String,
    pub division: Division,
}

impl Geography for StateArea {
    const COLUMNS: &'static [&'static str] = &["area_name", "division"];
    fn cells(&self) -> Vec<&str> {
        vec![self.area_name.as_str(), self.division.as_str()]
    }
    fn from_cells(cells: &[&str]) -> Result<Self> {
        match cells {
            [area_name, label] => Ok(StateArea {
                area_name: area_name.to_string(),
                division: Division::from_label(label).ok_or_else(|| {
                    PipelineError::Shape(format!("unknown division `{}`", label))
                })?,
            }),
            _ => Err(PipelineError::Shape(format!(
                "state geography needs 2 cells, got {}",
                cells.len()
            ))),
        }
    }
}

/// One output row. `values` is aligned with the owning table's value columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<G> {
    pub geo: G,
    pub area_code: String,
    pub survey_id: String,
    pub year: i32,
    pub values: Vec<Option<f64>>,
}

/// A value column resolved against one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef(usize);

impl ColumnRef {
    pub fn get<G>(self, row: &Row<G>) -> Option<f64> {
        row.values.get(self.0).copied().flatten()
    }
}

/// Rows of one geographic class plus the names of their value columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<G> {
    columns: Vec<String>,
    rows: Vec<Row<G>>,
}

pub type CountyTable = Table<County>;
pub type StateTable = Table<StateArea>;

impl<G> Default for Table<G> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl<G: Geography> Table<G> {
    pub fn from_parts(columns: Vec<String>, rows: Vec<Row<G>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for c in &columns {
            if is_reserved_column(c) {
                return Err(PipelineError::Shape(format!(
                    "value column `{}` clashes with a fixed column",
                    c
                )));
            }
            if !seen.insert(c.as_str()) {
                return Err(PipelineError::Shape(format!("duplicate value column `{}`", c)));
            }
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.values.len() != columns.len() {
                return Err(PipelineError::Shape(format!(
                    "row {} carries {} values for {} value columns",
                    idx,
                    row.values.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }
}

impl<G> Table<G> {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row<G>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Result<ColumnRef> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(ColumnRef)
            .ok_or_else(|| {
                PipelineError::Schema(format!(
                    "no value column `{}` (have: {})",
                    name,
                    self.columns.join(",")
                ))
            })
    }
}

/// County and state tables produced from one or more extracts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub county: CountyTable,
    pub state: StateTable,
}

impl Dataset {
    pub fn new(county: CountyTable, state: StateTable) -> Self {
        Self { county, state }
    }
}
