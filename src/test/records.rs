use crate::error::RecordError;
use crate::net::LinkRecord;
use crate::sim::{MessageRecord, parse_link_records, parse_message_records};

#[test]
fn link_records_skip_blank_lines() {
    let src = "1 2 8\n\n2 3 3\n  4\t5  1 \n9 10 -999\n";
    let recs = parse_link_records(src).unwrap();
    assert_eq!(
        recs,
        vec![
            LinkRecord::new(1, 2, 8),
            LinkRecord::new(2, 3, 3),
            LinkRecord::new(4, 5, 1),
            LinkRecord::new(9, 10, -999),
        ]
    );
}

#[test]
fn link_record_errors_carry_line_numbers() {
    let err = parse_link_records("1 2 3\n1 2\n").unwrap_err();
    assert!(matches!(err, RecordError::Malformed { line: 2, .. }));

    let err = parse_link_records("1 2 x\n").unwrap_err();
    assert!(matches!(err, RecordError::Malformed { line: 1, .. }));

    let err = parse_link_records("\n-1 2 3\n").unwrap_err();
    assert!(matches!(err, RecordError::Malformed { line: 2, .. }));
}

#[test]
fn message_text_is_kept_verbatim() {
    let src = "2 1 How are you?\r\n1 6 hello  world \n\n3 4\n";
    let msgs = parse_message_records(src).unwrap();
    assert_eq!(
        msgs,
        vec![
            MessageRecord::new(2, 1, "How are you?"),
            MessageRecord::new(1, 6, "hello  world "),
            MessageRecord::new(3, 4, ""),
        ]
    );
}

#[test]
fn message_needs_two_ids() {
    let err = parse_message_records("7\n").unwrap_err();
    assert!(matches!(err, RecordError::Malformed { line: 1, .. }));

    let err = parse_message_records("a b text\n").unwrap_err();
    assert!(matches!(err, RecordError::Malformed { line: 1, .. }));
}

#[test]
fn message_ids_accept_any_whitespace() {
    let src = "2\t1\thi\n3  4 two  spaces\n 5 6\tx\n";
    let msgs = parse_message_records(src).unwrap();
    assert_eq!(
        msgs,
        vec![
            MessageRecord::new(2, 1, "hi"),
            MessageRecord::new(3, 4, "two  spaces"),
            MessageRecord::new(5, 6, "x"),
        ]
    );
}
