use super::{Geography, Row, Table, ROW_COLUMNS};
use crate::error::{PipelineError, Result};
use polars::prelude::*;

fn str_cell<'a>(ca: &'a StringChunked, name: &str, idx: usize) -> Result<&'a str> {
    ca.get(idx)
        .ok_or_else(|| PipelineError::Shape(format!("null `{}` at row {}", name, idx)))
}

impl<G: Geography> Table<G> {
    /// Polars view of the table: geography columns, `area_code`,
    /// `survey_id`, `year`, then one Float64 column per value column.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut cols: Vec<Column> = Vec::with_capacity(G::COLUMNS.len() + 3 + self.columns.len());
        for (i, name) in G::COLUMNS.iter().enumerate() {
            let cells: Vec<&str> = self.rows.iter().map(|r| r.geo.cells()[i]).collect();
            cols.push(Column::new((*name).into(), cells));
        }
        let codes: Vec<&str> = self.rows.iter().map(|r| r.area_code.as_str()).collect();
        cols.push(Column::new("area_code".into(), codes));
        let surveys: Vec<&str> = self.rows.iter().map(|r| r.survey_id.as_str()).collect();
        cols.push(Column::new("survey_id".into(), surveys));
        let years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        cols.push(Column::new("year".into(), years));
        for (i, c) in self.columns.iter().enumerate() {
            let values: Vec<Option<f64>> = self.rows.iter().map(|r| r.values[i]).collect();
            cols.push(Column::new(c.as_str().into(), values));
        }
        Ok(DataFrame::new(cols)?)
    }

    /// Inverse of [`Table::to_frame`]. Every column that is not a fixed one
    /// is read back as a nullable value column, in frame order.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let mut geo_cols = Vec::with_capacity(G::COLUMNS.len());
        for name in G::COLUMNS {
            geo_cols.push(df.column(name)?.str()?);
        }
        let codes = df.column("area_code")?.str()?;
        let surveys = df.column("survey_id")?.str()?;
        let years = df.column("year")?.i32()?;

        let value_names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .filter(|n| !G::COLUMNS.contains(&n.as_str()) && !ROW_COLUMNS.contains(&n.as_str()))
            .collect();
        let mut value_cols = Vec::with_capacity(value_names.len());
        for name in &value_names {
            let cast = df.column(name)?.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = cast.f64()?.into_iter().collect();
            value_cols.push(values);
        }

        let mut rows = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let cells = G::COLUMNS
                .iter()
                .zip(&geo_cols)
                .map(|(name, ca)| str_cell(ca, name, idx))
                .collect::<Result<Vec<_>>>()?;
            rows.push(Row {
                geo: G::from_cells(&cells)?,
                area_code: str_cell(codes, "area_code", idx)?.to_string(),
                survey_id: str_cell(surveys, "survey_id", idx)?.to_string(),
                year: years
                    .get(idx)
                    .ok_or_else(|| PipelineError::Shape(format!("null `year` at row {}", idx)))?,
                values: value_cols.iter().map(|v| v[idx]).collect(),
            });
        }

        Table::from_parts(value_names, rows)
    }
}
