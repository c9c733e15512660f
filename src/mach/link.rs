use super::{Address, Opcode, Program};
use crate::error;
use crate::lang::{Column, Error, LineNumber};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Label resolution
///
/// Labels may be used before they are defined. Branches to a label are
/// emitted with a zero target and patched once every line is known.

#[derive(Debug, Default)]
pub struct Link {
    symbols: HashMap<String, Address>,
    unlinked: Vec<(Address, Opcode, LineNumber, Column, String)>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn insert(&mut self, sym: &str, addr: Address) -> Result<()> {
        if self.symbols.contains_key(sym) {
            return Err(error!(DuplicateLabel; sym));
        }
        self.symbols.insert(sym.to_string(), addr);
        Ok(())
    }

    pub fn link_addr_to_symbol(
        &mut self,
        addr: Address,
        op: Opcode,
        line_number: LineNumber,
        col: &Column,
        sym: &str,
    ) {
        self.unlinked
            .push((addr, op, line_number, col.clone(), sym.to_string()));
    }

    pub fn link(&mut self, program: &mut Program) -> Vec<Error> {
        let mut errors: Vec<Error> = vec![];
        for (addr, op, line_number, col, sym) in std::mem::take(&mut self.unlinked) {
            let result = match self.symbols.get(&sym) {
                None => Err(error!(UndefinedLabel; sym.as_str())),
                Some(dest) => program.patch_target(addr, op, *dest),
            };
            if let Err(error) = result {
                errors.push(error.in_line_number(line_number).in_column(&col));
            }
        }
        errors
    }
}
