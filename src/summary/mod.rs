// src/summary/mod.rs
//! Chart-ready views over merged datasets. Nothing here renders; each helper
//! returns the points a plotting collaborator draws.

mod rank;
mod trend;

pub use rank::{county_series, rank_counties, CountyMean, CountyPoint, Direction, RankOptions};
pub use trend::{division_trend, DivisionPoint};
