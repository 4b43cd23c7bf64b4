// src/cli.rs
//! The work behind the `run` and `rank` subcommands, kept out of `main` so it
//! can be driven from tests.

use crate::{
    config::RunConfig,
    dataset::{export::write_csv, merge_all, Dataset},
    load::load_csv,
    process::process_with,
    summary::{county_series, division_trend, rank_counties, CountyMean, RankOptions},
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::info;

/// Load, process and merge every source of a run file, in listed order.
pub fn build_dataset(cfg: &RunConfig) -> Result<Dataset> {
    let mut parts = Vec::with_capacity(cfg.sources.len());
    for src in &cfg.sources {
        let raw = load_csv(&src.path)?;
        let ds = process_with(
            &raw,
            &src.value_label,
            src.year_cutoff,
            &cfg.reshape_options(src),
        )
        .with_context(|| format!("processing {:?}", src.path))?;
        info!(
            source = %src.path.display(),
            label = %src.value_label,
            county_rows = ds.county.len(),
            state_rows = ds.state.len(),
            "source done"
        );
        parts.push(ds);
    }
    Ok(merge_all(&parts)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("writing {:?}", path))?;
    Ok(())
}

/// Writes `county.csv`, `state.csv` and `division_trend.json` into `out`.
/// The trend column defaults to the first source's label.
pub fn run_pipeline(cfg: &RunConfig, out: &Path, trend_column: Option<&str>) -> Result<Dataset> {
    let merged = build_dataset(cfg)?;

    fs::create_dir_all(out).with_context(|| format!("creating {:?}", out))?;
    let county_path = out.join("county.csv");
    write_csv(&merged.county, BufWriter::new(File::create(&county_path)?))
        .with_context(|| format!("writing {:?}", county_path))?;
    let state_path = out.join("state.csv");
    write_csv(&merged.state, BufWriter::new(File::create(&state_path)?))
        .with_context(|| format!("writing {:?}", state_path))?;

    let column = trend_column.unwrap_or(cfg.sources[0].value_label.as_str());
    let points = division_trend(&merged.state, column)?;
    write_json(&out.join("division_trend.json"), &points)?;

    info!(
        county_rows = merged.county.len(),
        state_rows = merged.state.len(),
        trend_points = points.len(),
        out = %out.display(),
        "all done"
    );
    Ok(merged)
}

/// `<state>_<direction>_<n>.json`, state lowercased.
pub fn series_file_name(opts: &RankOptions) -> String {
    format!(
        "{}_{}_{}.json",
        opts.state.to_lowercase(),
        opts.direction,
        opts.n
    )
}

/// Ranks the counties of the merged run. With `out`, the selected counties'
/// series is also written there and its path returned.
pub fn rank_report(
    cfg: &RunConfig,
    opts: &RankOptions,
    out: Option<&Path>,
) -> Result<(Vec<CountyMean>, Option<PathBuf>)> {
    let merged = build_dataset(cfg)?;
    let ranked = rank_counties(&merged.county, opts)?;

    let written = match out {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
            let series = county_series(&merged.county, opts)?;
            let path = dir.join(series_file_name(opts));
            write_json(&path, &series)?;
            info!(points = series.len(), path = %path.display(), "wrote county series");
            Some(path)
        }
        None => None,
    };
    Ok((ranked, written))
}
