use super::{Geography, Table};
use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, Int32Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Arrow schema for a table: geography columns, `area_code`, `survey_id`,
/// `year`, then one nullable Float64 per value column.
pub fn table_schema<G: Geography>(table: &Table<G>) -> Schema {
    let mut fields: Vec<Field> = G::COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, false))
        .collect();
    fields.push(Field::new("area_code", DataType::Utf8, false));
    fields.push(Field::new("survey_id", DataType::Utf8, false));
    fields.push(Field::new("year", DataType::Int32, false));
    for c in table.columns() {
        fields.push(Field::new(c, DataType::Float64, true));
    }
    Schema::new(fields)
}

impl<G: Geography> Table<G> {
    /// Columnar copy of the table for charting or export.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let schema = Arc::new(table_schema(self));
        let mut cols: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

        for i in 0..G::COLUMNS.len() {
            let arr: StringArray = self.rows.iter().map(|r| Some(r.geo.cells()[i])).collect();
            cols.push(Arc::new(arr));
        }
        let codes: StringArray = self.rows.iter().map(|r| Some(r.area_code.as_str())).collect();
        cols.push(Arc::new(codes));
        let surveys: StringArray = self.rows.iter().map(|r| Some(r.survey_id.as_str())).collect();
        cols.push(Arc::new(surveys));
        cols.push(Arc::new(Int32Array::from_iter_values(
            self.rows.iter().map(|r| r.year),
        )));
        for i in 0..self.columns.len() {
            let arr: Float64Array = self.rows.iter().map(|r| r.values[i]).collect();
            cols.push(Arc::new(arr));
        }

        RecordBatch::try_new(schema, cols).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use crate::dataset::fixtures::{county_row, state_row};
    use crate::dataset::{CountyTable, StateTable};
    use crate::geo::Division;
    use arrow::array::{Array, Float64Array, Int32Array, StringArray};

    #[test]
    fn county_batch_has_typed_columns() -> anyhow::Result<()> {
        let table = CountyTable::from_parts(
            vec!["enrollment_count".into()],
            vec![
                county_row("Wake", "NC", 1987, vec![Some(5.0)]),
                county_row("Durham", "NC", 2005, vec![None]),
            ],
        )?;
        let batch = table.to_record_batch()?;
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 6);

        let county = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(county.value(1), "Durham");
        let year = batch
            .column(4)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        assert_eq!(year.value(0), 1987);
        let value = batch
            .column(5)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(value.value(0), 5.0);
        assert!(value.is_null(1));
        Ok(())
    }

    #[test]
    fn state_batch_labels_divisions() -> anyhow::Result<()> {
        let table = StateTable::from_parts(
            vec!["enrollment_count".into()],
            vec![state_row("UNITED STATES", Division::Unmatched, 1987, vec![Some(1.0)])],
        )?;
        let batch = table.to_record_batch()?;
        let division = batch
            .column_by_name("division")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(division.value(0), "ERROR");
        Ok(())
    }
}
