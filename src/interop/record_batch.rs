//! Frame ⇄ Arrow `RecordBatch`
//!
//! Factors travel as `Dictionary(Int32, Utf8)` arrays with 0-based keys.
//! The frame's `class` and explicit row names ride along in the schema
//! metadata as JSON strings.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, DictionaryArray, Float64Array, Int32Array,
    StringArray, UInt8Array,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType as ArrowType, Field, Float64Type, Int32Type, Schema, UInt8Type};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use indexmap::IndexSet;
use log::debug;

use crate::convert::extract_headers;
use crate::error::{ConvertError, Result};
use crate::model::{Column, Frame, FrameAttributes, RowNames, Vector, DATA_FRAME_CLASS};

/// Schema metadata key holding the frame's class tags
pub const CLASS_METADATA_KEY: &str = "class";

/// Schema metadata key holding explicit row names
pub const ROW_NAMES_METADATA_KEY: &str = "row.names";

/// Convert a frame into a record batch
pub fn frame_to_record_batch(frame: &Frame) -> Result<RecordBatch> {
    let names = extract_headers(frame)?;

    let mut fields = Vec::with_capacity(names.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(names.len());
    for (name, column) in names.iter().zip(&frame.columns) {
        let array = column_to_array(name, column)?;
        fields.push(Field::new(name, array.data_type().clone(), true));
        arrays.push(array);
    }

    let mut metadata = HashMap::new();
    metadata.insert(
        CLASS_METADATA_KEY.to_string(),
        serde_json::to_string(&frame.attributes.class)?,
    );
    if let Some(RowNames::Labels(labels)) = &frame.attributes.row_names {
        metadata.insert(
            ROW_NAMES_METADATA_KEY.to_string(),
            serde_json::to_string(labels)?,
        );
    }

    let schema = Arc::new(Schema::new_with_metadata(fields, metadata));
    let options = RecordBatchOptions::new().with_row_count(Some(frame.row_count()));
    let batch = RecordBatch::try_new_with_options(schema, arrays, &options)?;

    debug!(
        "frame -> record batch: {} columns, {} rows",
        batch.num_columns(),
        batch.num_rows()
    );
    Ok(batch)
}

/// Convert a record batch into a data frame
pub fn record_batch_to_frame(batch: &RecordBatch) -> Result<Frame> {
    let schema = batch.schema();

    let mut names = Vec::with_capacity(batch.num_columns());
    let mut columns = Vec::with_capacity(batch.num_columns());
    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        names.push(field.name().clone());
        columns.push(array_to_column(field.name(), array)?);
    }

    let metadata = schema.metadata();
    let class = metadata
        .get(CLASS_METADATA_KEY)
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
        .unwrap_or_else(|| vec![DATA_FRAME_CLASS.to_string()]);
    let row_names = metadata
        .get(ROW_NAMES_METADATA_KEY)
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
        .filter(|labels| labels.len() == batch.num_rows())
        .map(RowNames::Labels)
        .unwrap_or(RowNames::Automatic(batch.num_rows()));

    Ok(Frame::new(
        columns,
        FrameAttributes {
            names: Some(names),
            row_names: Some(row_names),
            class,
        },
    ))
}

fn column_to_array(name: &str, column: &Column) -> Result<ArrayRef> {
    if let Some(levels) = &column.levels {
        let Vector::Integer(codes) = &column.vector else {
            return Err(ConvertError::MalformedFrame(format!(
                "factor column `{}` is stored as {}, not integer codes",
                name,
                column.vector.kind()
            )));
        };
        return factor_to_dictionary(name, codes, levels);
    }

    let array: ArrayRef = match &column.vector {
        Vector::Integer(v) => Arc::new(Int32Array::from(v.clone())),
        Vector::Double(v) => Arc::new(Float64Array::from(v.clone())),
        Vector::Logical(v) => Arc::new(BooleanArray::from(v.clone())),
        Vector::Character(v) => Arc::new(StringArray::from(v.clone())),
        Vector::Raw(v) => Arc::new(UInt8Array::from(v.clone())),
        Vector::Complex(_) | Vector::List(_) => {
            return Err(ConvertError::UnsupportedColumnType {
                column: name.to_string(),
                kind: column.vector.kind(),
            })
        }
    };
    Ok(array)
}

fn factor_to_dictionary(
    name: &str,
    codes: &[Option<i32>],
    levels: &IndexSet<String>,
) -> Result<ArrayRef> {
    let keys = codes
        .iter()
        .enumerate()
        .map(|(row, code)| match code {
            None => Ok(None),
            Some(code) if *code >= 1 && (*code as usize) <= levels.len() => Ok(Some(code - 1)),
            Some(code) => Err(ConvertError::CorruptCategoricalIndex {
                column: name.to_string(),
                row,
                code: *code,
                levels: levels.len(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    let values: ArrayRef = Arc::new(StringArray::from_iter_values(levels.iter()));
    let dictionary = DictionaryArray::<Int32Type>::try_new(Int32Array::from(keys), values)?;
    Ok(Arc::new(dictionary))
}

fn array_to_column(name: &str, array: &ArrayRef) -> Result<Column> {
    let vector = match array.data_type() {
        ArrowType::Int32 => Vector::Integer(array.as_primitive::<Int32Type>().iter().collect()),
        ArrowType::Int8 | ArrowType::Int16 | ArrowType::UInt16 => {
            let widened = cast(array, &ArrowType::Int32)?;
            Vector::Integer(widened.as_primitive::<Int32Type>().iter().collect())
        }
        ArrowType::Float64 => Vector::Double(array.as_primitive::<Float64Type>().iter().collect()),
        ArrowType::Float16
        | ArrowType::Float32
        | ArrowType::Int64
        | ArrowType::UInt32
        | ArrowType::UInt64 => {
            let widened = cast(array, &ArrowType::Float64)?;
            Vector::Double(widened.as_primitive::<Float64Type>().iter().collect())
        }
        ArrowType::Boolean => Vector::Logical(array.as_boolean().iter().collect()),
        ArrowType::Utf8 => Vector::Character(
            array
                .as_string::<i32>()
                .iter()
                .map(|v| v.map(str::to_string))
                .collect(),
        ),
        ArrowType::LargeUtf8 => Vector::Character(
            array
                .as_string::<i64>()
                .iter()
                .map(|v| v.map(str::to_string))
                .collect(),
        ),
        ArrowType::UInt8 => Vector::Raw(array.as_primitive::<UInt8Type>().iter().collect()),
        ArrowType::Dictionary(_, value_type)
            if matches!(value_type.as_ref(), ArrowType::Utf8 | ArrowType::LargeUtf8) =>
        {
            return dictionary_to_factor(array);
        }
        other => {
            return Err(ConvertError::UnsupportedArrowType {
                column: name.to_string(),
                data_type: other.to_string(),
            })
        }
    };
    Ok(Column::new(vector))
}

fn dictionary_to_factor(array: &ArrayRef) -> Result<Column> {
    let target = ArrowType::Dictionary(Box::new(ArrowType::Int32), Box::new(ArrowType::Utf8));
    let normalized = cast(array, &target)?;
    let dictionary = normalized.as_dictionary::<Int32Type>();
    let values = dictionary.values().as_string::<i32>();

    // Dictionary values may repeat or hold nulls; levels keep first occurrence order
    let levels: IndexSet<String> = values.iter().flatten().map(str::to_string).collect();

    let codes = dictionary
        .keys()
        .iter()
        .map(|key| {
            let key = usize::try_from(key?).ok()?;
            if values.is_null(key) {
                return None;
            }
            let index = levels.get_index_of(values.value(key))?;
            i32::try_from(index + 1).ok()
        })
        .collect();

    Ok(Column::factor(codes, levels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{build_frame, frame_to_table, ConvertOptions};
    use crate::model::{CellValue, Complex, DataType, Table};

    fn sample_table() -> Table {
        let mut table = Table::new(
            vec!["id".into(), "score".into(), "ok".into(), "grade".into(), "raw".into()],
            vec![
                DataType::Integer,
                DataType::Double,
                DataType::Boolean,
                DataType::String,
                DataType::Byte,
            ],
        )
        .unwrap();
        table
            .push_row(vec![1.into(), 0.5.into(), true.into(), "low".into(), CellValue::Byte(1)])
            .unwrap();
        table
            .push_row(vec![
                CellValue::Null,
                CellValue::Null,
                CellValue::Null,
                CellValue::Null,
                CellValue::Null,
            ])
            .unwrap();
        table
            .push_row(vec![3.into(), 2.0.into(), false.into(), "high".into(), CellValue::Byte(255)])
            .unwrap();
        table
    }

    #[test]
    fn test_record_batch_round_trip() {
        let table = sample_table();
        let options = ConvertOptions::new().with_factors(vec!["grade".into()]);
        let frame = build_frame(&table, &options).unwrap();

        let batch = frame_to_record_batch(&frame).unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert!(matches!(batch.column(3).data_type(), ArrowType::Dictionary(_, _)));
        assert_eq!(batch.column(0).null_count(), 1);

        let back = record_batch_to_frame(&batch).unwrap();
        assert_eq!(back, frame);
        assert_eq!(frame_to_table(&back).unwrap(), table);
    }

    #[test]
    fn test_widening_on_import() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("small", ArrowType::Int16, true),
            Field::new("big", ArrowType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(arrow::array::Int16Array::from(vec![Some(7), None])),
                Arc::new(arrow::array::Int64Array::from(vec![Some(1 << 40), Some(2)])),
            ],
        )
        .unwrap();

        let frame = record_batch_to_frame(&batch).unwrap();
        assert_eq!(frame.columns[0].vector, Vector::Integer(vec![Some(7), None]));
        assert_eq!(
            frame.columns[1].vector,
            Vector::Double(vec![Some((1u64 << 40) as f64), Some(2.0)])
        );
        assert!(frame.is_data_frame());
    }

    #[test]
    fn test_unsupported_types() {
        let frame = Frame::from_named(vec![(
            "z".into(),
            Vector::Complex(vec![Some(Complex { re: 0.0, im: 1.0 })]).into(),
        )]);
        assert!(matches!(
            frame_to_record_batch(&frame),
            Err(ConvertError::UnsupportedColumnType { .. })
        ));

        let schema = Arc::new(Schema::new(vec![Field::new("d", ArrowType::Date32, true)]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(arrow::array::Date32Array::from(vec![Some(1)]))],
        )
        .unwrap();
        assert!(matches!(
            record_batch_to_frame(&batch),
            Err(ConvertError::UnsupportedArrowType { .. })
        ));
    }

    #[test]
    fn test_corrupt_factor_rejected_on_export() {
        let frame = Frame::from_named(vec![(
            "f".into(),
            Column::factor(vec![Some(2)], ["only".to_string()].into_iter().collect()),
        )]);
        assert!(matches!(
            frame_to_record_batch(&frame),
            Err(ConvertError::CorruptCategoricalIndex { code: 2, .. })
        ));
    }

    #[test]
    fn test_attributes_written_as_schema_metadata() {
        let mut frame = Frame::from_named(vec![(
            "x".into(),
            Vector::Integer(vec![Some(1), Some(2)]).into(),
        )]);
        frame.attributes.row_names = Some(RowNames::Labels(vec!["a".into(), "b".into()]));

        let batch = frame_to_record_batch(&frame).unwrap();
        let schema = batch.schema();
        let metadata = schema.metadata();
        assert_eq!(metadata[CLASS_METADATA_KEY], r#"["data.frame"]"#);
        assert_eq!(metadata[ROW_NAMES_METADATA_KEY], r#"["a","b"]"#);
    }

    #[test]
    fn test_explicit_row_names_survive() {
        let mut frame = Frame::from_named(vec![(
            "x".into(),
            Vector::Integer(vec![Some(1), Some(2)]).into(),
        )]);
        frame.attributes.row_names = Some(RowNames::Labels(vec!["a".into(), "b".into()]));

        let back = record_batch_to_frame(&frame_to_record_batch(&frame).unwrap()).unwrap();
        assert_eq!(back.attributes.row_names, frame.attributes.row_names);
    }
}
