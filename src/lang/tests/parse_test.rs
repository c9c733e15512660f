use super::*;
use crate::mach::Opcode;

fn parse_str(s: &str) -> Result<Vec<Statement>, Error> {
    Line::new(1, s).ast()
}

#[test]
fn test_statements_with_columns() {
    let answer = vec![
        Statement::Label(0..6, "START".to_string()),
        Statement::Literal(7..9, -3),
        Statement::Op(10..13, Opcode::Not),
    ];
    assert_eq!(parse_str("start: -3 not").unwrap(), answer);
}

#[test]
fn test_branch_targets() {
    assert_eq!(
        parse_str("brf 12").unwrap(),
        vec![Statement::Branch(0..6, Opcode::Brf, Target::Address(12))]
    );
    assert_eq!(
        parse_str("br top").unwrap(),
        vec![Statement::Branch(0..6, Opcode::Br, Target::Label("TOP".to_string()))]
    );
}

#[test]
fn test_hex_and_plus_literals() {
    assert_eq!(
        parse_str("0x10 +7").unwrap(),
        vec![Statement::Literal(0..4, 16), Statement::Literal(5..7, 7)]
    );
}

#[test]
fn test_errors_carry_line_and_column() {
    let error = parse_str("3 push").unwrap_err();
    assert_eq!(error.code(), ErrorCode::SyntaxError);
    assert_eq!(error.to_string(), "SYNTAX ERROR IN 1 (2..6); UNKNOWN MNEMONIC");

    let error = parse_str("br").unwrap_err();
    assert_eq!(error.to_string(), "SYNTAX ERROR IN 1 (2..2); EXPECTED TARGET");

    let error = parse_str("br -2").unwrap_err();
    assert_eq!(error.to_string(), "SYNTAX ERROR IN 1 (3..5); NEGATIVE TARGET");

    let error = parse_str("12ab").unwrap_err();
    assert_eq!(error.to_string(), "SYNTAX ERROR IN 1 (0..4); BAD NUMBER");

    let error = parse_str("99999999999999999999").unwrap_err();
    assert_eq!(error.code(), ErrorCode::Overflow);
}

#[test]
fn test_label_named_like_mnemonic() {
    let error = parse_str("add: 1").unwrap_err();
    assert_eq!(error.to_string(), "SYNTAX ERROR IN 1 (0..4); RESERVED LABEL");
    assert!(parse_str("adder: 1").is_ok());
}
