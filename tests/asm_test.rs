mod common;
use common::*;
use stackvm::lang::ErrorCode;
use stackvm::mach::Opcode::*;
use stackvm::mach::{assemble, Event, Listing, Program};

#[test]
fn test_assemble_expression() {
    let program = assemble("3 4 add halt").unwrap();
    assert_eq!(program.words(), &[3, 4, op(Add), op(Halt)]);
}

#[test]
fn test_comments_blank_lines_and_case() {
    let source = "; leading comment\n\n  10 ; ten\n\t-4 Add\nHALT\n";
    let program = assemble(source).unwrap();
    assert_eq!(program.words(), &[10, lit(-4), op(Add), op(Halt)]);
}

#[test]
fn test_hex_literals() {
    let program = assemble("0x10 -0x2 halt").unwrap();
    assert_eq!(program.words(), &[16, lit(-2), op(Halt)]);
}

#[test]
fn test_labels_forward_and_back() {
    let source = "
start:
    1 brt end
    0 halt
end:
    br start
";
    let program = assemble(source).unwrap();
    assert_eq!(
        program.words(),
        &[1, br(Brt, 4), 0, op(Halt), br(Br, 0)]
    );
}

#[test]
fn test_numeric_target() {
    let program = assemble("br 2 halt 5 halt").unwrap();
    assert_eq!(program.words(), &[br(Br, 2), op(Halt), 5, op(Halt)]);
}

#[test]
fn test_assembled_program_runs() {
    let source = "
    7 5 gt
    brt yes
    0 halt
yes:
    1 halt
";
    let mut r = run_asm(source);
    assert_eq!(r.stack(), vec![1]);
    assert_eq!(exec(&mut r), Event::Halted);
}

#[test]
fn test_all_errors_are_collected() {
    let source = "bogus\n  1 br nowhere\nx:\nx:\n";
    let errors = assemble(source).unwrap_err();
    let mut found: Vec<(ErrorCode, Option<usize>)> =
        errors.iter().map(|e| (e.code(), e.line_number())).collect();
    found.sort_by_key(|(_, line)| *line);
    assert_eq!(
        found,
        vec![
            (ErrorCode::SyntaxError, Some(1)),
            (ErrorCode::UndefinedLabel, Some(2)),
            (ErrorCode::DuplicateLabel, Some(4)),
        ]
    );
}

#[test]
fn test_mnemonic_label_rejected() {
    let errors = assemble("add:\n 1 halt\n br add\n").unwrap_err();
    assert_eq!(errors[0].to_string(), "SYNTAX ERROR IN 1 (0..4); RESERVED LABEL");
}

#[test]
fn test_undefined_label_message() {
    let errors = assemble("halt\n  br nowhere").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "UNDEFINED LABEL IN 2 (2..12); NOWHERE");
}

#[test]
fn test_literal_too_large() {
    let errors = assemble("1073741823 halt\n1073741824\n-3000000000").unwrap_err();
    let codes: Vec<_> = errors.iter().map(|e| (e.code(), e.line_number())).collect();
    assert_eq!(
        codes,
        vec![(ErrorCode::Overflow, Some(2)), (ErrorCode::Overflow, Some(3))]
    );
}

#[test]
fn test_target_too_large() {
    let errors = assemble("br 4194304").unwrap_err();
    assert_eq!(errors[0].code(), ErrorCode::Overflow);
    assert!(assemble("br 4194303").is_ok());
}

#[test]
fn test_listing() {
    let program = assemble("3 -4 add\nbrt 0 ret").unwrap();
    assert_eq!(
        Listing::new(program.words()).to_string(),
        "0000  3\n0001  -4\n0002  ADD\n0003  BRT 0\n0004  RET\n"
    );
}

#[test]
fn test_listing_undefined_words() {
    let words: [u32; 1] = [0xc000_0000];
    let listing = Listing::at(&words, 100);
    assert_eq!(listing.line(100).unwrap(), "0100  ??? 0xc0000000");
    assert_eq!(listing.line(99), None);
    assert_eq!(listing.line(101), None);
}

#[test]
fn test_image_bytes() {
    let program = Program::from_words(vec![1, op(Halt)]);
    let bytes = program.to_bytes();
    assert_eq!(bytes, vec![1, 0, 0, 0, 0, 0, 0, 0x40]);
    assert_eq!(Program::from_bytes(&bytes).unwrap(), program);
}

#[test]
fn test_image_bad_length() {
    let error = Program::from_bytes(&[1, 0, 0, 0, 0]).unwrap_err();
    assert_eq!(error.code(), ErrorCode::BadFileFormat);
}

#[test]
fn test_checksum() {
    let a = assemble("3 4 add halt").unwrap();
    let b = Program::from_bytes(&a.to_bytes()).unwrap();
    assert_eq!(a.checksum(), b.checksum());
    assert_eq!(a.checksum(), Program::checksum_words(a.words()));
    let c = assemble("3 4 sub halt").unwrap();
    assert_ne!(a.checksum(), c.checksum());
    assert_eq!(Program::new().checksum(), 0);
}

#[test]
fn test_program_clear() {
    let mut program = assemble("3 4 add halt").unwrap();
    program.clear();
    assert!(program.is_empty());
    assert_eq!(program.checksum(), Program::new().checksum());
}
