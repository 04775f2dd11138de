use tableframe::model::{Column, Vector};
use tableframe::{
    build_frame, extract_headers, extract_rows, frame_to_table, CellValue, ConvertError,
    ConvertOptions, DataType, Frame, Table,
};

fn table(headers: &[&str], types: &[DataType], rows: Vec<Vec<CellValue>>) -> Table {
    let mut table = Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        types.to_vec(),
    )
    .unwrap();
    for row in rows {
        table.push_row(row).unwrap();
    }
    table
}

#[test]
fn test_rows_survive_a_round_trip() {
    let original = table(
        &["id", "ratio", "ok", "label", "byte"],
        &[
            DataType::Integer,
            DataType::Double,
            DataType::Boolean,
            DataType::String,
            DataType::Byte,
        ],
        vec![
            vec![10.into(), 0.25.into(), true.into(), "x".into(), CellValue::Byte(128)],
            vec![(-3).into(), 1e9.into(), false.into(), "".into(), CellValue::Byte(0)],
        ],
    );

    let frame = build_frame(&original, &ConvertOptions::default()).unwrap();
    assert_eq!(extract_rows(&frame).unwrap(), original.rows);
    assert_eq!(frame_to_table(&frame).unwrap(), original);
}

#[test]
fn test_factor_labels_resolve() {
    let frame = Frame::from_named(vec![(
        "level".to_string(),
        Column::factor(
            vec![Some(2)],
            ["low", "medium", "high"].into_iter().map(String::from).collect(),
        ),
    )]);
    assert_eq!(extract_rows(&frame).unwrap(), vec![vec![CellValue::from("medium")]]);
}

#[test]
fn test_missing_values_both_ways() {
    let original = table(
        &["n", "s"],
        &[DataType::Double, DataType::String],
        vec![vec![CellValue::Null, "a".into()], vec![1.5.into(), CellValue::Null]],
    );

    let frame = build_frame(&original, &ConvertOptions::default()).unwrap();
    assert_eq!(frame.columns[0].vector, Vector::Double(vec![None, Some(1.5)]));
    assert_eq!(frame.columns[1].vector, Vector::Character(vec![Some("a".into()), None]));
    assert_eq!(extract_rows(&frame).unwrap(), original.rows);
}

#[test]
fn test_text_that_is_not_a_number_fails() {
    for data_type in [DataType::Integer, DataType::Double] {
        let bad = table(&["v"], &[data_type], vec![vec!["abc".into()]]);
        let err = build_frame(&bad, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::TypeCoercion { target, .. } if target == data_type));
    }
}

#[test]
fn test_headers_keep_their_order() {
    let frame = Frame::from_named(vec![
        ("id".to_string(), Vector::Integer(vec![]).into()),
        ("name".to_string(), Vector::Character(vec![]).into()),
    ]);
    assert_eq!(extract_headers(&frame).unwrap(), vec!["id", "name"]);
}
