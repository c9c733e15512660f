/// ## Virtual machine instruction set
///
/// The machine has no registers besides the program counter and the
/// stack pointer. Every operation is performed on the stack.
///
/// For example: `(3 + 4) * 2` assembles to `[3, 4, ADD, 2, MUL]`
///
/// The discriminant is the value carried in the payload of a
/// primitive instruction word.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Opcode {
    Halt = 0,

    // *** Arithmetic
    Add = 1,
    Sub = 2,
    Mul = 3,
    Div = 4,

    // *** Logic
    And = 5,
    Or = 6,
    Not = 7,
    Xor = 8,
    Lt = 9,
    Gt = 10,
    Le = 11,
    Ge = 12,
    Eq = 13,
    Ne = 14,

    // *** Branch control
    /// Unconditional branch to the operand address.
    Br = 15,
    /// Pop the stack and branch to the operand address if not zero.
    Brt = 16,
    /// Pop the stack and branch to the operand address if zero.
    Brf = 17,
    /// Pop a return address and branch to it. No-op on an empty stack.
    Ret = 18,
}

impl Opcode {
    pub const ALL: [Opcode; 19] = [
        Opcode::Halt,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::And,
        Opcode::Or,
        Opcode::Not,
        Opcode::Xor,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::Le,
        Opcode::Ge,
        Opcode::Eq,
        Opcode::Ne,
        Opcode::Br,
        Opcode::Brt,
        Opcode::Brf,
        Opcode::Ret,
    ];

    pub fn from_u32(value: u32) -> Option<Opcode> {
        Opcode::ALL.get(value as usize).copied()
    }

    /// Case-insensitive lookup of an assembler mnemonic.
    pub fn from_mnemonic(s: &str) -> Option<Opcode> {
        Opcode::ALL
            .iter()
            .find(|op| op.to_string().eq_ignore_ascii_case(s))
            .copied()
    }

    /// Number of stack cells the instruction reads.
    pub fn arity(self) -> usize {
        use Opcode::*;
        match self {
            Halt | Br | Ret => 0,
            Not | Brt | Brf => 1,
            Add | Sub | Mul | Div | And | Or | Xor | Lt | Gt | Le | Ge | Eq | Ne => 2,
        }
    }

    /// Branches carry a target address in the operand field.
    pub fn takes_target(self) -> bool {
        matches!(self, Opcode::Br | Opcode::Brt | Opcode::Brf)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Halt => write!(f, "HALT"),
            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Mul => write!(f, "MUL"),
            Div => write!(f, "DIV"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
            Not => write!(f, "NOT"),
            Xor => write!(f, "XOR"),
            Lt => write!(f, "LT"),
            Gt => write!(f, "GT"),
            Le => write!(f, "LE"),
            Ge => write!(f, "GE"),
            Eq => write!(f, "EQ"),
            Ne => write!(f, "NE"),
            Br => write!(f, "BR"),
            Brt => write!(f, "BRT"),
            Brf => write!(f, "BRF"),
            Ret => write!(f, "RET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_match_table() {
        for (index, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(*op as usize, index);
            assert_eq!(Opcode::from_u32(index as u32), Some(*op));
        }
        assert_eq!(Opcode::from_u32(19), None);
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(Opcode::from_mnemonic("brt"), Some(Opcode::Brt));
        assert_eq!(Opcode::from_mnemonic("Halt"), Some(Opcode::Halt));
        assert_eq!(Opcode::from_mnemonic("push"), None);
    }
}
