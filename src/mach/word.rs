//! ## Instruction word codec
//!
//! ```text
//!  31 30 29                    8 7          0
//! +-----+-----------------------------------+
//! |kind |             payload               |
//! +-----+-----------------------------------+
//! | 01  |   operand (22 bits)   |  opcode   |   primitive
//! | 00  |          magnitude                |   positive literal
//! | 10  |          magnitude                |   negative literal
//! | 11  |          (undefined)              |
//! +-----+-----------------------------------+
//! ```

use super::{Address, Opcode, Word, MAX_ADDRESS};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub const KIND_SHIFT: u32 = 30;
pub const PAYLOAD_MASK: Word = 0x3fff_ffff;
pub const PRIMITIVE_TAG: Word = 0x4000_0000;
pub const NEGATIVE_TAG: Word = 0x8000_0000;
pub const OPCODE_MASK: u32 = 0xff;
pub const OPERAND_SHIFT: u32 = 8;

/// Largest literal magnitude that fits in a payload.
pub const MAX_MAGNITUDE: u32 = PAYLOAD_MASK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    PositiveInteger = 0b00,
    Primitive = 0b01,
    NegativeInteger = 0b10,
    Undefined = 0b11,
}

pub fn classify(word: Word) -> Kind {
    match word >> KIND_SHIFT {
        0b00 => Kind::PositiveInteger,
        0b01 => Kind::Primitive,
        0b10 => Kind::NegativeInteger,
        _ => Kind::Undefined,
    }
}

pub fn payload(word: Word) -> u32 {
    word & PAYLOAD_MASK
}

/// Forces the kind bits to primitive. Never fails; whether the payload
/// names a known opcode is decided when the word is decoded.
pub fn primitive(payload: u32) -> Word {
    (payload & PAYLOAD_MASK) | PRIMITIVE_TAG
}

pub fn encode_primitive(opcode: Opcode) -> Word {
    primitive(opcode as u32)
}

pub fn encode_branch(opcode: Opcode, target: Address) -> Result<Word> {
    debug_assert!(opcode.takes_target());
    if target > MAX_ADDRESS {
        return Err(error!(Overflow; "BRANCH TARGET TOO LARGE"));
    }
    Ok(primitive(((target as u32) << OPERAND_SHIFT) | opcode as u32))
}

pub fn encode_integer(value: i32) -> Result<Word> {
    let magnitude = value.unsigned_abs();
    if magnitude > MAX_MAGNITUDE {
        return Err(error!(Overflow; "LITERAL TOO LARGE"));
    }
    if value < 0 {
        Ok(NEGATIVE_TAG | magnitude)
    } else {
        Ok(magnitude)
    }
}

/// Signed value of a literal payload.
pub fn literal(kind: Kind, payload: u32) -> i32 {
    let magnitude = (payload & PAYLOAD_MASK) as i32;
    match kind {
        Kind::NegativeInteger => -magnitude,
        _ => magnitude,
    }
}

/// Splits a primitive payload into its opcode and operand fields.
/// Non-branch instructions must have an empty operand field.
pub fn decode_primitive(payload: u32) -> Option<(Opcode, Address)> {
    let opcode = Opcode::from_u32(payload & OPCODE_MASK)?;
    let operand = ((payload & PAYLOAD_MASK) >> OPERAND_SHIFT) as Address;
    if operand != 0 && !opcode.takes_target() {
        return None;
    }
    Some((opcode, operand))
}

/// ## A fully decoded instruction word

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Literal(i32),
    Primitive(Opcode, Address),
    Undefined(Word),
}

impl Instruction {
    pub fn decode(word: Word) -> Instruction {
        let kind = classify(word);
        match kind {
            Kind::PositiveInteger | Kind::NegativeInteger => {
                Instruction::Literal(literal(kind, payload(word)))
            }
            Kind::Primitive => match decode_primitive(payload(word)) {
                Some((opcode, operand)) => Instruction::Primitive(opcode, operand),
                None => Instruction::Undefined(word),
            },
            Kind::Undefined => Instruction::Undefined(word),
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Instruction::Literal(v) => write!(f, "{}", v),
            Instruction::Primitive(op, target) if op.takes_target() => {
                write!(f, "{} {}", op, target)
            }
            Instruction::Primitive(op, _) => write!(f, "{}", op),
            Instruction::Undefined(w) => write!(f, "??? {:#010x}", w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(3), Kind::PositiveInteger);
        assert_eq!(classify(0x4000_0001), Kind::Primitive);
        assert_eq!(classify(0x8000_0005), Kind::NegativeInteger);
        assert_eq!(classify(0xffff_ffff), Kind::Undefined);
        assert_eq!(payload(0xffff_ffff), PAYLOAD_MASK);
    }

    #[test]
    fn test_encode_primitive_forces_kind_bits() {
        assert_eq!(encode_primitive(Opcode::Add), 0x4000_0001);
        assert_eq!(encode_primitive(Opcode::Halt), 0x4000_0000);
        assert_eq!(primitive(0xc000_0004), 0x4000_0004);
    }

    #[test]
    fn test_encode_integer() {
        assert_eq!(encode_integer(7), Ok(7));
        assert_eq!(encode_integer(-7), Ok(0x8000_0007));
        assert_eq!(literal(Kind::NegativeInteger, 7), -7);
        assert!(encode_integer(1 << 30).is_err());
        assert!(encode_integer(i32::MIN).is_err());
        assert_eq!(
            Instruction::decode(encode_integer(-(MAX_MAGNITUDE as i32)).unwrap()),
            Instruction::Literal(-(MAX_MAGNITUDE as i32))
        );
    }

    #[test]
    fn test_branch_operand() {
        let word = encode_branch(Opcode::Brf, 300).unwrap();
        assert_eq!(classify(word), Kind::Primitive);
        assert_eq!(decode_primitive(payload(word)), Some((Opcode::Brf, 300)));
        assert!(encode_branch(Opcode::Br, MAX_ADDRESS + 1).is_err());
        assert_eq!(Instruction::decode(word).to_string(), "BRF 300");
    }

    #[test]
    fn test_operand_on_plain_opcode_is_undefined() {
        let word = primitive((1 << OPERAND_SHIFT) | Opcode::Add as u32);
        assert_eq!(Instruction::decode(word), Instruction::Undefined(word));
        assert_eq!(decode_primitive(19), None);
    }
}
