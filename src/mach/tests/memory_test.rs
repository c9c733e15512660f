use super::*;
use crate::lang::ErrorCode;

#[test]
fn test_zero_capacity_is_out_of_memory() {
    let error = Memory::new(0).unwrap_err();
    assert_eq!(error.code(), ErrorCode::OutOfMemory);
}

#[test]
fn test_bounds_checked_access() {
    let mut memory = Memory::new(4).unwrap();
    assert!(memory.set(3, 9).is_ok());
    assert_eq!(memory.get(3).unwrap(), 9);
    assert_eq!(memory.get(4).unwrap_err().code(), ErrorCode::AddressOutOfBounds);
    assert_eq!(memory.set(4, 1).unwrap_err().code(), ErrorCode::AddressOutOfBounds);
}

#[test]
fn test_load_zero_fills_and_rejects_oversize() {
    let mut memory = Memory::new(4).unwrap();
    memory.load(&[1, 2, 3, 4]).unwrap();
    memory.load(&[7]).unwrap();
    assert_eq!(memory.as_slice(), &[7, 0, 0, 0]);
    let error = memory.load(&[1, 2, 3, 4, 5]).unwrap_err();
    assert_eq!(error.code(), ErrorCode::ProgramTooLarge);
    assert_eq!(memory.as_slice(), &[7, 0, 0, 0]);
}
