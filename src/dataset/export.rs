use super::{Geography, Table};
use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;

/// Write a table as CSV with the same column order as its Arrow schema.
/// Null values are written as empty fields.
pub fn write_csv<G: Geography, W: Write>(table: &Table<G>, out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);

    let mut header: Vec<&str> = G::COLUMNS.to_vec();
    header.extend(["area_code", "survey_id", "year"]);
    header.extend(table.columns().iter().map(String::as_str));
    wtr.write_record(&header).context("writing CSV header")?;

    for (idx, row) in table.rows().iter().enumerate() {
        let mut record: Vec<String> = row.geo.cells().into_iter().map(str::to_string).collect();
        record.push(row.area_code.clone());
        record.push(row.survey_id.clone());
        record.push(row.year.to_string());
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)
            .with_context(|| format!("writing CSV row {}", idx))?;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}
