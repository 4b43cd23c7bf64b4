use crate::dataset::CountyTable;
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Highest means first.
    #[default]
    Top,
    /// Lowest means first.
    Bottom,
}

impl FromStr for Direction {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Direction::Top),
            "bottom" => Ok(Direction::Bottom),
            other => Err(PipelineError::Input(format!(
                "direction must be `top` or `bottom`, got `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankOptions {
    pub column: String,
    /// State abbreviation as it appears in the county table, e.g. "NC".
    pub state: String,
    pub direction: Direction,
    pub n: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            column: "enrollment_count".to_string(),
            state: "NC".to_string(),
            direction: Direction::Top,
            n: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyMean {
    pub county: String,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyPoint {
    pub year: i32,
    pub county: String,
    pub value: Option<f64>,
}

const ROW_NR: &str = "__row_nr";

/// In-state rows (tagged with their original position) and the ranked
/// county means, both still lazy.
fn ranked_frames(table: &CountyTable, opts: &RankOptions) -> Result<(LazyFrame, LazyFrame)> {
    if opts.n == 0 {
        return Err(PipelineError::Input("ranking needs n >= 1".into()));
    }
    table.column(&opts.column)?;

    let in_state = table
        .to_frame()?
        .lazy()
        .with_row_index(ROW_NR, None)
        .filter(col("state").eq(lit(opts.state.as_str())));

    let descending = opts.direction == Direction::Top;
    let ranked = in_state
        .clone()
        .group_by([col("county")])
        .agg([col(opts.column.as_str()).mean().alias("mean")])
        .sort(
            ["mean", "county"],
            SortMultipleOptions::default()
                .with_order_descending_multi([descending, false])
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .limit(IdxSize::try_from(opts.n).unwrap_or(IdxSize::MAX));

    Ok((in_state, ranked))
}

/// The `n` highest (or lowest) counties of one state by mean of the chosen
/// column. Ties fall back to county-name order. Counties with no non-null
/// value sort last either way.
pub fn rank_counties(table: &CountyTable, opts: &RankOptions) -> Result<Vec<CountyMean>> {
    let (_, ranked) = ranked_frames(table, opts)?;
    let df = ranked.collect()?;

    let counties = df.column("county")?.str()?;
    let means = df.column("mean")?.f64()?;
    let out: Vec<CountyMean> = counties
        .into_iter()
        .zip(means)
        .map(|(county, mean)| CountyMean {
            county: county.unwrap_or_default().to_string(),
            mean,
        })
        .collect();

    debug!(
        state = %opts.state,
        direction = %opts.direction,
        selected = out.len(),
        "ranked counties"
    );
    Ok(out)
}

/// Every original row of the selected counties as (year, county, value),
/// in table order, for one line per county.
pub fn county_series(table: &CountyTable, opts: &RankOptions) -> Result<Vec<CountyPoint>> {
    let (in_state, ranked) = ranked_frames(table, opts)?;
    let df = in_state
        .join(
            ranked.select([col("county")]),
            [col("county")],
            [col("county")],
            JoinArgs::new(JoinType::Semi),
        )
        .sort([ROW_NR], Default::default())
        .select([
            col("year"),
            col("county"),
            col(opts.column.as_str()).alias("value"),
        ])
        .collect()?;

    let years = df.column("year")?.i32()?;
    let counties = df.column("county")?.str()?;
    let values = df.column("value")?.f64()?;
    (0..df.height())
        .map(|i| {
            Ok(CountyPoint {
                year: years
                    .get(i)
                    .ok_or_else(|| PipelineError::Shape(format!("null year in series row {}", i)))?,
                county: counties.get(i).unwrap_or_default().to_string(),
                value: values.get(i),
            })
        })
        .collect()
}
