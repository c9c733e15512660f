use super::Column;
use crate::mach::{Address, Opcode};

/// ## Abstract syntax of one assembly line
///
/// Every statement carries the column range of its source text
/// so errors found later, during linking, can point back at it.

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    /// `name:` binds the name to the address of the next word.
    Label(Column, String),
    /// Signed literal, range checked when encoded.
    Literal(Column, i64),
    Op(Column, Opcode),
    /// `BR`, `BRT` or `BRF` with its target.
    Branch(Column, Opcode, Target),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Target {
    Address(Address),
    Label(String),
}

impl Statement {
    pub fn column(&self) -> &Column {
        use Statement::*;
        match self {
            Label(col, _) | Literal(col, _) | Op(col, _) | Branch(col, _, _) => col,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Target::Address(a) => write!(f, "{}", a),
            Target::Label(s) => write!(f, "{}", s),
        }
    }
}
