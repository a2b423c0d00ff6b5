use recordkeep_core::{
    read_students, read_students_from_path, write_grade_report_to_path, Grade, ImportError,
};
use std::io::Cursor;

#[test]
fn reads_well_formed_records() {
    let input = "1,Ama Owusu,84\n2, Kwame Asante ,67\n3,Efua Mensah,49\n";
    let students = read_students(Cursor::new(input)).unwrap();

    assert_eq!(students.len(), 3);
    assert_eq!(students[1].full_name, "Kwame Asante");
    assert_eq!(students[0].grade(), Grade::A);
    assert_eq!(students[1].grade(), Grade::C);
    assert_eq!(students[2].grade(), Grade::F);
}

#[test]
fn two_field_line_is_missing_field() {
    let input = "1,Ama Owusu,84\n2,Kwame Asante\n3,Efua Mensah,49\n";
    let err = read_students(Cursor::new(input)).unwrap_err();
    match err {
        ImportError::MissingField { line_number, line } => {
            assert_eq!(line_number, 2);
            assert_eq!(line, "2,Kwame Asante");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_integer_id_is_invalid_format() {
    let err = read_students(Cursor::new("abc,Name,70\n")).unwrap_err();
    assert!(matches!(
        err,
        ImportError::InvalidFormat { line_number: 1, field: "id", ref value } if value == "abc"
    ));
    assert!(err.is_data_error());
}

#[test]
fn non_integer_score_is_invalid_format() {
    let err = read_students(Cursor::new("1,Ama,eighty\n")).unwrap_err();
    assert!(matches!(
        err,
        ImportError::InvalidFormat { field: "score", .. }
    ));
}

#[test]
fn id_is_checked_before_score() {
    let err = read_students(Cursor::new("x,Ama,y\n")).unwrap_err();
    assert!(matches!(err, ImportError::InvalidFormat { field: "id", .. }));
}

#[test]
fn missing_input_file_is_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_students_from_path(dir.path().join("input.txt")).unwrap_err();
    assert!(matches!(err, ImportError::FileOpen { .. }));
    assert!(!err.is_data_error());
}

#[test]
fn file_import_feeds_grade_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&input, "10,Abena Osei,75\n11,Kojo Darko,52\n").unwrap();

    let students = read_students_from_path(&input).unwrap();
    write_grade_report_to_path(&students, &output).unwrap();

    let report = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        report,
        "Abena Osei (ID: 10): Score = 75, Grade = B\nKojo Darko (ID: 11): Score = 52, Grade = D\n"
    );
}

#[test]
fn invalid_utf8_in_name_is_replaced_not_rejected() {
    let input: &[u8] = b"1,Ab\xffna,80\r\n2,Kofi,55\n";
    let students = read_students(Cursor::new(input)).unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(students[0].full_name, "Ab\u{FFFD}na");
    assert_eq!(students[0].grade(), Grade::A);
    assert_eq!(students[1].full_name, "Kofi");
}
