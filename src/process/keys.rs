use crate::error::{PipelineError, Result};
use crate::process::reshape::{LongRecord, LongTable};

/// Long row with the compound key resolved into survey id and 4-digit year.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub area_name: String,
    pub area_code: String,
    pub survey_id: String,
    pub year: i32,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub value_label: String,
    pub rows: Vec<ParsedRecord>,
}

/// Fixed-position split of `"EDU010187D"` → `("EDU0101", "87")`.
pub fn split_key(key: &str) -> Result<(&str, &str)> {
    if key.len() < 9 {
        return Err(PipelineError::Parse(format!(
            "compound key `{}` is shorter than 9 characters",
            key
        )));
    }
    match (key.get(0..7), key.get(7..9)) {
        (Some(survey), Some(year)) => Ok((survey, year)),
        _ => Err(PipelineError::Parse(format!(
            "compound key `{}` is not plain ASCII",
            key
        ))),
    }
}

/// `1900 + yy` when `yy >= cutoff`, otherwise `2000 + yy`.
pub fn resolve_year(two_digit: &str, cutoff: u8) -> Result<i32> {
    if two_digit.len() != 2 || !two_digit.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PipelineError::Parse(format!(
            "year field `{}` is not two digits",
            two_digit
        )));
    }
    let n: i32 = two_digit
        .parse()
        .map_err(|e| PipelineError::Parse(format!("year field `{}`: {}", two_digit, e)))?;
    Ok(if n >= i32::from(cutoff) { 1900 + n } else { 2000 + n })
}

fn parse_record(rec: LongRecord, cutoff: u8) -> Result<ParsedRecord> {
    let (survey, yy) = split_key(&rec.key)?;
    let year = resolve_year(yy, cutoff)
        .map_err(|e| PipelineError::Parse(format!("{} (area `{}`)", e, rec.area_name)))?;
    Ok(ParsedRecord {
        survey_id: survey.to_string(),
        year,
        area_name: rec.area_name,
        area_code: rec.area_code,
        value: rec.value,
    })
}

pub fn parse_keys(long: LongTable, cutoff: u8) -> Result<ParsedTable> {
    let rows = long
        .rows
        .into_iter()
        .map(|rec| parse_record(rec, cutoff))
        .collect::<Result<Vec<_>>>()?;
    Ok(ParsedTable {
        value_label: long.value_label,
        rows,
    })
}
