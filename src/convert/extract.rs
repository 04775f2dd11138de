//! Reading headers, types and rows back out of a frame

use crate::error::{ConvertError, Result};
use crate::model::{CellValue, Column, DataType, Frame, Vector};

/// Column names of a frame, in column order
pub fn extract_headers(frame: &Frame) -> Result<Vec<String>> {
    let names = frame
        .names()
        .ok_or_else(|| ConvertError::MalformedFrame("frame has no names attribute".to_string()))?;

    if names.len() != frame.column_count() {
        return Err(ConvertError::MalformedFrame(format!(
            "{} names for {} columns",
            names.len(),
            frame.column_count()
        )));
    }

    Ok(names.to_vec())
}

/// Declared type of every frame column. Factors report `String`, the
/// type of the labels they extract to.
pub fn extract_column_types(frame: &Frame) -> Result<Vec<DataType>> {
    frame
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if column.is_factor() {
                return Ok(DataType::String);
            }
            let kind = column.vector.kind();
            DataType::from_vector_kind(kind).ok_or_else(|| ConvertError::UnsupportedColumnType {
                column: column_label(frame, i),
                kind,
            })
        })
        .collect()
}

/// Row-major transpose of the frame's columns
pub fn extract_rows(frame: &Frame) -> Result<Vec<Vec<CellValue>>> {
    let Some(first) = frame.columns.first() else {
        return Ok(Vec::new());
    };
    let row_count = first.len();

    if let Some(row_names) = &frame.attributes.row_names {
        if row_names.len() != row_count {
            return Err(ConvertError::MalformedFrame(format!(
                "row.names has {} entries but columns have {} values",
                row_names.len(),
                row_count
            )));
        }
    }

    for (i, column) in frame.columns.iter().enumerate() {
        if column.len() != row_count {
            return Err(ConvertError::MalformedFrame(format!(
                "column `{}` has {} values, expected {}",
                column_label(frame, i),
                column.len(),
                row_count
            )));
        }
        if column.is_factor() && !matches!(column.vector, Vector::Integer(_)) {
            return Err(ConvertError::MalformedFrame(format!(
                "factor column `{}` is stored as {}, not integer codes",
                column_label(frame, i),
                column.vector.kind()
            )));
        }
        if DataType::from_vector_kind(column.vector.kind()).is_none() {
            return Err(ConvertError::UnsupportedColumnType {
                column: column_label(frame, i),
                kind: column.vector.kind(),
            });
        }
    }

    let mut rows = Vec::with_capacity(row_count);
    for row in 0..row_count {
        let cells = frame
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| cell_value(frame, i, column, row))
            .collect::<Result<Vec<_>>>()?;
        rows.push(cells);
    }

    Ok(rows)
}

/// Value of one cell, resolving factor codes against their levels
fn cell_value(frame: &Frame, index: usize, column: &Column, row: usize) -> Result<CellValue> {
    if let (Some(levels), Vector::Integer(codes)) = (&column.levels, &column.vector) {
        let Some(code) = codes[row] else {
            return Ok(CellValue::Null);
        };
        // Codes are 1-based
        let label = usize::try_from(code)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .and_then(|c| levels.get_index(c));
        return match label {
            Some(label) => Ok(CellValue::String(label.clone())),
            None => Err(ConvertError::CorruptCategoricalIndex {
                column: column_label(frame, index),
                row,
                code,
                levels: levels.len(),
            }),
        };
    }

    let value = match &column.vector {
        Vector::Integer(v) => v[row].into(),
        Vector::Double(v) => v[row].into(),
        Vector::Logical(v) => v[row].into(),
        Vector::Character(v) => v[row].clone().into(),
        Vector::Raw(v) => v[row].into(),
        Vector::Complex(_) | Vector::List(_) => {
            return Err(ConvertError::UnsupportedColumnType {
                column: column_label(frame, index),
                kind: column.vector.kind(),
            })
        }
    };
    Ok(value)
}

/// Column name for diagnostics, falling back to its position
fn column_label(frame: &Frame, index: usize) -> String {
    frame
        .names()
        .and_then(|names| names.get(index))
        .cloned()
        .unwrap_or_else(|| format!("#{}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Complex, FrameAttributes, RowNames};

    fn levels(labels: &[&str]) -> indexmap::IndexSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_headers_in_order() {
        let frame = Frame::from_named(vec![
            ("id".into(), Vector::Integer(vec![Some(1)]).into()),
            ("name".into(), Vector::Character(vec![Some("a".into())]).into()),
        ]);
        assert_eq!(extract_headers(&frame).unwrap(), vec!["id", "name"]);
    }

    #[test]
    fn test_headers_missing_or_mismatched() {
        let columns = vec![Column::new(Vector::Integer(vec![Some(1)]))];
        let unnamed = Frame::new(columns.clone(), FrameAttributes::default());
        assert!(matches!(extract_headers(&unnamed), Err(ConvertError::MalformedFrame(_))));

        let mismatched = Frame::new(
            columns,
            FrameAttributes {
                names: Some(vec!["a".into(), "b".into()]),
                ..Default::default()
            },
        );
        assert!(matches!(extract_headers(&mismatched), Err(ConvertError::MalformedFrame(_))));
    }

    #[test]
    fn test_column_types() {
        let frame = Frame::from_named(vec![
            ("i".into(), Vector::Integer(vec![]).into()),
            ("d".into(), Vector::Double(vec![]).into()),
            ("l".into(), Vector::Logical(vec![]).into()),
            ("s".into(), Vector::Character(vec![]).into()),
            ("r".into(), Vector::Raw(vec![]).into()),
            ("f".into(), Column::factor(vec![], levels(&["a"]))),
        ]);
        assert_eq!(
            extract_column_types(&frame).unwrap(),
            vec![
                DataType::Integer,
                DataType::Double,
                DataType::Boolean,
                DataType::String,
                DataType::Byte,
                DataType::String,
            ]
        );
    }

    #[test]
    fn test_unsupported_column_type() {
        let frame = Frame::from_named(vec![(
            "z".into(),
            Vector::Complex(vec![Some(Complex { re: 1.0, im: 2.0 })]).into(),
        )]);
        let err = extract_column_types(&frame).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedColumnType { ref column, .. } if column == "z"));
        assert!(matches!(
            extract_rows(&frame),
            Err(ConvertError::UnsupportedColumnType { .. })
        ));
    }

    #[test]
    fn test_factor_resolution() {
        let frame = Frame::from_named(vec![(
            "level".into(),
            Column::factor(vec![Some(2), None, Some(3)], levels(&["low", "medium", "high"])),
        )]);
        let rows = extract_rows(&frame).unwrap();
        assert_eq!(rows[0], vec![CellValue::from("medium")]);
        assert_eq!(rows[1], vec![CellValue::Null]);
        assert_eq!(rows[2], vec![CellValue::from("high")]);
    }

    #[test]
    fn test_corrupt_factor_code() {
        for code in [0, 4, -1] {
            let frame = Frame::from_named(vec![(
                "level".into(),
                Column::factor(vec![Some(code)], levels(&["low", "medium", "high"])),
            )]);
            let err = extract_rows(&frame).unwrap_err();
            assert!(matches!(
                err,
                ConvertError::CorruptCategoricalIndex { code: c, levels: 3, row: 0, .. } if c == code
            ));
        }
    }

    #[test]
    fn test_missing_values_become_null() {
        let frame = Frame::from_named(vec![
            ("n".into(), Vector::Double(vec![Some(1.5), None]).into()),
            ("s".into(), Vector::Character(vec![None, Some("x".into())]).into()),
        ]);
        let rows = extract_rows(&frame).unwrap();
        assert_eq!(rows, vec![
            vec![CellValue::Double(1.5), CellValue::Null],
            vec![CellValue::Null, CellValue::from("x")],
        ]);
    }

    #[test]
    fn test_ragged_columns() {
        let frame = Frame::from_named(vec![
            ("a".into(), Vector::Integer(vec![Some(1), Some(2)]).into()),
            ("b".into(), Vector::Integer(vec![Some(1)]).into()),
        ]);
        assert!(matches!(extract_rows(&frame), Err(ConvertError::MalformedFrame(_))));
    }

    #[test]
    fn test_row_names_disagree_with_columns() {
        let mut frame = Frame::from_named(vec![(
            "a".into(),
            Vector::Integer(vec![Some(1), Some(2)]).into(),
        )]);
        frame.attributes.row_names = Some(RowNames::Automatic(3));
        assert_eq!(frame.row_count(), 3);
        assert!(matches!(extract_rows(&frame), Err(ConvertError::MalformedFrame(_))));

        frame.attributes.row_names = Some(RowNames::Labels(vec!["x".into(), "y".into()]));
        assert_eq!(extract_rows(&frame).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_frame_has_no_rows() {
        let frame = Frame::from_named(vec![]);
        assert!(extract_rows(&frame).unwrap().is_empty());
        assert!(extract_headers(&frame).unwrap().is_empty());
    }
}
