use super::{Dataset, Geography, Table};
use crate::error::{PipelineError, Result};
use polars::lazy::dsl::concat;
use polars::prelude::*;
use tracing::debug;

/// Row union of two tables via a diagonal concat: value columns are the
/// first-seen union of both inputs and cells a row's source never had are
/// null. Nothing is deduplicated.
fn concat_tables<G: Geography>(a: &Table<G>, b: &Table<G>) -> Result<Table<G>> {
    let frames = [a.to_frame()?.lazy(), b.to_frame()?.lazy()];
    let df = concat(
        frames,
        UnionArgs {
            parallel: false,
            rechunk: true,
            diagonal: true,
            maintain_order: true,
            ..Default::default()
        },
    )?
    .collect()?;
    Table::from_frame(&df)
}

/// Concatenate the county tables and the state tables of two datasets.
/// Inputs are left untouched; the result is a fresh pair.
pub fn merge(a: &Dataset, b: &Dataset) -> Result<Dataset> {
    let merged = Dataset {
        county: concat_tables(&a.county, &b.county)?,
        state: concat_tables(&a.state, &b.state)?,
    };
    debug!(
        county_rows = merged.county.len(),
        state_rows = merged.state.len(),
        "merged datasets"
    );
    Ok(merged)
}

/// Left fold of [`merge`] over every dataset, in order.
pub fn merge_all<'a, I>(datasets: I) -> Result<Dataset>
where
    I: IntoIterator<Item = &'a Dataset>,
{
    let mut iter = datasets.into_iter();
    let first = iter
        .next()
        .ok_or_else(|| PipelineError::Shape("merge_all needs at least one dataset".into()))?;
    iter.try_fold(first.clone(), |acc, next| merge(&acc, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{county_row, state_row};
    use crate::dataset::{CountyTable, StateTable};
    use crate::geo::Division;

    fn dataset(label: &str, counties: &[(&str, f64)], year: i32) -> Dataset {
        let county = CountyTable::from_parts(
            vec![label.into()],
            counties
                .iter()
                .map(|(name, v)| county_row(name, "NC", year, vec![Some(*v)]))
                .collect(),
        )
        .unwrap();
        let state = StateTable::from_parts(
            vec![label.into()],
            vec![state_row("NORTH CAROLINA", Division::SouthAtlantic, year, vec![Some(1.0)])],
        )
        .unwrap();
        Dataset::new(county, state)
    }

    /// Order-independent view of a table for multiset comparison.
    fn multiset<G: std::fmt::Debug>(table: &Table<G>) -> Vec<String> {
        let mut out: Vec<String> = table
            .rows()
            .iter()
            .map(|r| {
                let named: Vec<String> = table
                    .columns()
                    .iter()
                    .zip(&r.values)
                    .map(|(c, v)| format!("{}={:?}", c, v))
                    .collect();
                format!("{:?}|{}|{}|{}", r.geo, r.survey_id, r.year, named.join(","))
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn missing_columns_become_null() -> anyhow::Result<()> {
        let a = dataset("enrollment_count", &[("Wake", 10.0)], 1987);
        let b = dataset("income", &[("Wake", 20.0)], 2005);
        let merged = merge(&a, &b)?;
        assert_eq!(merged.county.columns(), &["enrollment_count", "income"]);
        assert_eq!(merged.county.rows()[0].values, vec![Some(10.0), None]);
        assert_eq!(merged.county.rows()[1].values, vec![None, Some(20.0)]);
        assert_eq!(merged.state.len(), 2);
        Ok(())
    }

    #[test]
    fn shared_columns_line_up_and_duplicates_stay() -> anyhow::Result<()> {
        let a = dataset("enrollment_count", &[("Wake", 10.0)], 1987);
        let merged = merge(&a, &a)?;
        assert_eq!(merged.county.columns(), &["enrollment_count"]);
        assert_eq!(merged.county.len(), 2);
        assert_eq!(merged.county.rows()[0], merged.county.rows()[1]);
        Ok(())
    }

    #[test]
    fn inputs_are_not_mutated() -> anyhow::Result<()> {
        let a = dataset("enrollment_count", &[("Wake", 10.0)], 1987);
        let b = dataset("income", &[("Durham", 3.0)], 2005);
        let before = a.clone();
        let _ = merge(&a, &b)?;
        assert_eq!(a, before);
        Ok(())
    }

    #[test]
    fn merge_is_associative() -> anyhow::Result<()> {
        let a = dataset("enrollment_count", &[("Wake", 10.0), ("Orange", 4.0)], 1987);
        let b = dataset("income", &[("Wake", 20.0)], 2005);
        let c = dataset("enrollment_count", &[("Durham", 7.0)], 1996);

        let left = merge(&merge(&a, &b)?, &c)?;
        let right = merge(&a, &merge(&b, &c)?)?;
        assert_eq!(left.county.columns(), right.county.columns());
        assert_eq!(multiset(&left.county), multiset(&right.county));
        assert_eq!(multiset(&left.state), multiset(&right.state));
        Ok(())
    }

    #[test]
    fn merge_keeps_row_order_and_sentinel() -> anyhow::Result<()> {
        let a = dataset("enrollment_count", &[("Wake", 10.0), ("Orange", 4.0)], 1987);
        let mut b = dataset("income", &[("Durham", 3.0)], 2005);
        b.state = StateTable::from_parts(
            vec!["income".into()],
            vec![state_row("UNITED STATES", Division::Unmatched, 2005, vec![None])],
        )?;
        let merged = merge(&a, &b)?;
        let counties: Vec<&str> = merged
            .county
            .rows()
            .iter()
            .map(|r| r.geo.county.as_str())
            .collect();
        assert_eq!(counties, vec!["Wake", "Orange", "Durham"]);
        assert_eq!(merged.state.rows()[1].geo.division, Division::Unmatched);
        assert_eq!(merged.state.rows()[1].values, vec![None, None]);
        Ok(())
    }

    #[test]
    fn merge_all_folds_and_rejects_empty() -> anyhow::Result<()> {
        let a = dataset("enrollment_count", &[("Wake", 10.0)], 1987);
        let b = dataset("income", &[("Wake", 20.0)], 2005);
        let c = dataset("population", &[("Wake", 30.0)], 2009);
        let all = merge_all([&a, &b, &c])?;
        assert_eq!(all.county.len(), 3);
        assert_eq!(all.county.columns().len(), 3);

        let none: Vec<Dataset> = Vec::new();
        assert!(matches!(merge_all(&none), Err(PipelineError::Shape(_))));
        Ok(())
    }
}
