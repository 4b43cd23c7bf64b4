use crate::dataset::StateTable;
use crate::error::{PipelineError, Result};
use crate::geo::Division;
use polars::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionPoint {
    pub year: i32,
    pub division: Division,
    pub mean_value: Option<f64>,
}

/// Mean of `column` per (year, division), skipping rows tagged ERROR.
/// Nulls are ignored; a group with only nulls has no mean. Points come out
/// ordered by year, then division name.
pub fn division_trend(table: &StateTable, column: &str) -> Result<Vec<DivisionPoint>> {
    table.column(column)?;

    let df = table
        .to_frame()?
        .lazy()
        .filter(col("division").neq(lit(Division::Unmatched.as_str())))
        .group_by([col("year"), col("division")])
        .agg([col(column).mean().alias("mean_value")])
        .sort(["year", "division"], Default::default())
        .collect()?;

    let years = df.column("year")?.i32()?;
    let divisions = df.column("division")?.str()?;
    let means = df.column("mean_value")?.f64()?;

    (0..df.height())
        .map(|i| {
            let label = divisions.get(i).unwrap_or_default();
            Ok(DivisionPoint {
                year: years
                    .get(i)
                    .ok_or_else(|| PipelineError::Shape(format!("null year in trend row {}", i)))?,
                division: Division::from_label(label).ok_or_else(|| {
                    PipelineError::Shape(format!("unknown division `{}`", label))
                })?,
                mean_value: means.get(i),
            })
        })
        .collect()
}
