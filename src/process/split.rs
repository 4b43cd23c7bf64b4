use crate::dataset::{County, CountyTable, Row, StateArea, StateTable};
use crate::error::{PipelineError, Result};
use crate::geo::{division_of, is_county};
use crate::process::keys::{ParsedRecord, ParsedTable};
use tracing::{debug, warn};

/// `"ALBANY, NY"` → `("ALBANY", "NY")`, splitting on the first comma.
pub fn split_county_name(area_name: &str) -> Result<County> {
    let (county, state) = area_name.split_once(',').ok_or_else(|| {
        PipelineError::Format(format!(
            "county row `{}` has no comma separating county and state",
            area_name
        ))
    })?;
    Ok(County {
        county: county.to_string(),
        state: state.trim().to_string(),
    })
}

fn county_row(rec: ParsedRecord) -> Result<Row<County>> {
    Ok(Row {
        geo: split_county_name(&rec.area_name)?,
        area_code: rec.area_code,
        survey_id: rec.survey_id,
        year: rec.year,
        values: vec![rec.value],
    })
}

fn state_row(rec: ParsedRecord) -> Row<StateArea> {
    let division = division_of(&rec.area_name);
    Row {
        geo: StateArea {
            area_name: rec.area_name,
            division,
        },
        area_code: rec.area_code,
        survey_id: rec.survey_id,
        year: rec.year,
        values: vec![rec.value],
    }
}

/// Route each row to the county or state table and attach the derived
/// geography. Every input row lands in exactly one output table.
pub fn split_and_enrich(parsed: ParsedTable) -> Result<(CountyTable, StateTable)> {
    let (county_recs, state_recs): (Vec<_>, Vec<_>) = parsed
        .rows
        .into_iter()
        .partition(|rec| is_county(&rec.area_name));

    let county_rows = county_recs
        .into_iter()
        .map(county_row)
        .collect::<Result<Vec<_>>>()?;
    let state_rows: Vec<_> = state_recs.into_iter().map(state_row).collect();

    let unmatched = state_rows
        .iter()
        .filter(|r| r.geo.division.is_unmatched())
        .count();
    if unmatched > 0 {
        warn!(unmatched, "state rows with no census division, tagged ERROR");
    }
    debug!(
        county_rows = county_rows.len(),
        state_rows = state_rows.len(),
        "split"
    );

    let columns = vec![parsed.value_label];
    Ok((
        CountyTable::from_parts(columns.clone(), county_rows)?,
        StateTable::from_parts(columns, state_rows)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Division;

    fn parsed(names: &[&str]) -> ParsedTable {
        ParsedTable {
            value_label: "enrollment_count".into(),
            rows: names
                .iter()
                .enumerate()
                .map(|(i, n)| ParsedRecord {
                    area_name: n.to_string(),
                    area_code: format!("{:05}", i),
                    survey_id: "EDU0101".into(),
                    year: 1987,
                    value: Some(i as f64),
                })
                .collect(),
        }
    }

    #[test]
    fn partition_is_complete() -> anyhow::Result<()> {
        let names = [
            "UNITED STATES",
            "NEW YORK",
            "ALBANY, NY",
            "Allegany, NY",
            "NORTH CAROLINA",
            "Wake, NC",
        ];
        let (county, state) = split_and_enrich(parsed(&names))?;
        assert_eq!(county.len() + state.len(), names.len());
        assert_eq!(county.len(), 3);
        assert_eq!(state.len(), 3);
        Ok(())
    }

    #[test]
    fn county_names_are_split_and_trimmed() -> anyhow::Result<()> {
        let (county, _) = split_and_enrich(parsed(&["ALBANY,   NY "]))?;
        let row = &county.rows()[0];
        assert_eq!(row.geo.county, "ALBANY");
        assert_eq!(row.geo.state, "NY");
        assert_eq!(county.columns(), &["enrollment_count"]);
        Ok(())
    }

    #[test]
    fn only_first_comma_splits() -> anyhow::Result<()> {
        let geo = split_county_name("Juneau, City and Borough, AK")?;
        assert_eq!(geo.county, "Juneau");
        assert_eq!(geo.state, "City and Borough, AK");
        Ok(())
    }

    #[test]
    fn state_rows_get_divisions_and_sentinel() -> anyhow::Result<()> {
        let (_, state) = split_and_enrich(parsed(&["UNITED STATES", "NEW YORK", "TEXAS"]))?;
        let divisions: Vec<Division> = state.rows().iter().map(|r| r.geo.division).collect();
        assert_eq!(
            divisions,
            vec![
                Division::Unmatched,
                Division::MidAtlantic,
                Division::WestSouthCentral
            ]
        );
        assert_eq!(state.rows()[0].geo.area_name, "UNITED STATES");
        Ok(())
    }

    #[test]
    fn comma_free_name_is_a_format_error() {
        let err = split_county_name("ALBANY NY").unwrap_err();
        assert!(matches!(err, PipelineError::Format(msg) if msg.contains("ALBANY NY")));
    }
}
