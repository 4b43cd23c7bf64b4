// src/process/mod.rs
pub mod keys;
pub mod raw_table;
pub mod reshape;
pub mod split;
pub mod utils;

pub use keys::{parse_keys, ParsedRecord, ParsedTable};
pub use raw_table::RawTable;
pub use reshape::{reshape, LongRecord, LongTable, ReshapeOptions};
pub use split::split_and_enrich;

use crate::dataset::{is_reserved_column, Dataset};
use crate::error::{PipelineError, Result};
use tracing::info;

/// Wide extract → (county table, state table).
///
/// Reshapes the suffix-filtered value columns, resolves each compound key
/// into a survey id and a 4-digit year using `year_cutoff`, then partitions
/// the rows into county and state tables. The value column of both tables is
/// named `value_label`. Pure: no I/O and `raw` is not modified.
///
/// Uses the default layout (`Area_name`, `STCOU`, suffix `D`).
pub fn process(raw: &RawTable, value_label: &str, year_cutoff: u8) -> Result<Dataset> {
    process_with(raw, value_label, year_cutoff, &ReshapeOptions::default())
}

/// [`process`] with explicit identifying columns and value-column suffix.
#[tracing::instrument(level = "info", skip(raw, opts), fields(rows = raw.rows.len()))]
pub fn process_with(
    raw: &RawTable,
    value_label: &str,
    year_cutoff: u8,
    opts: &ReshapeOptions,
) -> Result<Dataset> {
    if value_label.trim().is_empty() {
        return Err(PipelineError::Input("value label must be non-empty text".into()));
    }
    if is_reserved_column(value_label.trim()) {
        return Err(PipelineError::Input(format!(
            "value label `{}` clashes with a fixed output column",
            value_label
        )));
    }

    let long = reshape(raw, value_label, opts)?;
    let parsed = parse_keys(long, year_cutoff)?;
    let (county, state) = split_and_enrich(parsed)?;

    info!(
        county_rows = county.len(),
        state_rows = state.len(),
        "processed extract"
    );
    Ok(Dataset::new(county, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Division;
    use crate::test_support::init_test_logging;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn albany_end_to_end() -> anyhow::Result<()> {
        init_test_logging();
        let raw = RawTable::new(
            strings(&["Area_name", "STCOU", "EDU010187D", "EDU010205D"]),
            vec![strings(&["ALBANY, NY", "36001", "500", "700"])],
        );
        let ds = process(&raw, "enrollment", 87)?;
        assert!(ds.state.is_empty());
        assert_eq!(ds.county.columns(), &["enrollment"]);

        let rows = ds.county.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].survey_id, "EDU0101");
        assert_eq!(rows[0].year, 1987);
        assert_eq!(rows[0].values, vec![Some(500.0)]);
        assert_eq!(rows[1].survey_id, "EDU0102");
        assert_eq!(rows[1].year, 2005);
        assert_eq!(rows[1].values, vec![Some(700.0)]);
        for row in rows {
            assert_eq!(row.geo.county, "ALBANY");
            assert_eq!(row.geo.state, "NY");
            assert_eq!(row.area_code, "36001");
        }
        Ok(())
    }

    #[test]
    fn national_row_is_kept_with_sentinel() -> anyhow::Result<()> {
        let raw = RawTable::new(
            strings(&["Area_name", "STCOU", "EDU010187D"]),
            vec![
                strings(&["United States", "00000", "40024299"]),
                strings(&["NEW YORK", "36000", "2600000"]),
            ],
        );
        let ds = process(&raw, "enrollment_count", 87)?;
        assert_eq!(ds.state.len(), 2);
        assert_eq!(ds.state.rows()[0].geo.division, Division::Unmatched);
        assert_eq!(ds.state.rows()[1].geo.division, Division::MidAtlantic);
        Ok(())
    }

    #[test]
    fn cutoff_is_caller_supplied() -> anyhow::Result<()> {
        let raw = RawTable::new(
            strings(&["Area_name", "STCOU", "PST045230D"]),
            vec![strings(&["Wake, NC", "37183", "1"])],
        );
        let early = process(&raw, "population", 26)?;
        let late = process(&raw, "population", 87)?;
        assert_eq!(early.county.rows()[0].year, 1930);
        assert_eq!(late.county.rows()[0].year, 2030);
        Ok(())
    }

    #[test]
    fn blank_label_is_an_input_error() {
        let raw = RawTable::new(strings(&["Area_name", "STCOU", "EDU010187D"]), vec![]);
        let err = process(&raw, "  ", 87).unwrap_err();
        assert!(matches!(err, PipelineError::Input(_)));
    }

    #[test]
    fn fixed_column_name_is_not_a_value_label() {
        let raw = RawTable::new(
            strings(&["Area_name", "STCOU", "EDU010187D"]),
            vec![strings(&["ALBANY, NY", "36001", "500"])],
        );
        for label in ["year", "county", "division", " state "] {
            let err = process(&raw, label, 87).unwrap_err();
            assert!(matches!(err, PipelineError::Input(_)), "{}", label);
        }
        assert!(process(&raw, "Year", 87).is_ok());
    }

    #[test]
    fn ragged_table_is_an_input_error() {
        let raw = RawTable::new(
            strings(&["Area_name", "STCOU", "EDU010187D"]),
            vec![strings(&["ALBANY, NY", "36001"])],
        );
        let err = process(&raw, "enrollment", 87).unwrap_err();
        assert!(matches!(err, PipelineError::Input(_)));
    }

    #[test]
    fn malformed_key_surfaces_parse_error() {
        let raw = RawTable::new(
            strings(&["Area_name", "STCOU", "EDU1D"]),
            vec![strings(&["ALBANY, NY", "36001", "1"])],
        );
        let err = process(&raw, "enrollment", 87).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }
}
