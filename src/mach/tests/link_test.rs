use super::*;
use crate::lang::ErrorCode;

#[test]
fn test_forward_reference_is_patched() {
    let mut program = Program::new();
    let mut link = Link::new();
    let addr = program.branch(Opcode::Br, 0).unwrap();
    link.link_addr_to_symbol(addr, Opcode::Br, Some(1), &(0..6), "END");
    program.op(Opcode::Add);
    link.insert("END", program.len()).unwrap();
    program.op(Opcode::Halt);
    assert!(link.link(&mut program).is_empty());
    assert_eq!(
        Instruction::decode(program.words()[0]),
        Instruction::Primitive(Opcode::Br, 2)
    );
}

#[test]
fn test_undefined_and_duplicate_labels() {
    let mut program = Program::new();
    let mut link = Link::new();
    link.insert("A", 0).unwrap();
    assert_eq!(link.insert("A", 1).unwrap_err().code(), ErrorCode::DuplicateLabel);
    let addr = program.branch(Opcode::Brt, 0).unwrap();
    link.link_addr_to_symbol(addr, Opcode::Brt, Some(4), &(2..9), "NOWHERE");
    let errors = link.link(&mut program);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "UNDEFINED LABEL IN 4 (2..9); NOWHERE");
}
