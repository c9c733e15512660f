use super::{Address, Word};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Fixed capacity cell memory
///
/// The buffer is reserved once and never grows. Reads and writes
/// outside it are address faults instead of silent corruption.

pub struct Memory {
    cells: Vec<Word>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory {{ capacity: {} }}", self.cells.len())
    }
}

impl Memory {
    pub fn new(capacity: usize) -> Result<Memory> {
        if capacity == 0 {
            return Err(error!(OutOfMemory; "ZERO CAPACITY"));
        }
        let mut cells: Vec<Word> = Vec::new();
        if cells.try_reserve_exact(capacity).is_err() {
            return Err(error!(OutOfMemory));
        }
        cells.resize(capacity, 0);
        Ok(Memory { cells })
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, addr: Address) -> Result<Word> {
        match self.cells.get(addr) {
            Some(word) => Ok(*word),
            None => Err(error!(AddressOutOfBounds)),
        }
    }

    pub fn set(&mut self, addr: Address, word: Word) -> Result<()> {
        match self.cells.get_mut(addr) {
            Some(cell) => {
                *cell = word;
                Ok(())
            }
            None => Err(error!(AddressOutOfBounds)),
        }
    }

    /// Copies a program to address 0 and zeroes everything after it.
    /// Nothing is written when the program does not fit.
    pub fn load(&mut self, words: &[Word]) -> Result<()> {
        if words.len() > self.cells.len() {
            return Err(error!(ProgramTooLarge; format!(
                "{} WORDS IN {} CELLS",
                words.len(),
                self.cells.len()
            )));
        }
        let (code, rest) = self.cells.split_at_mut(words.len());
        code.copy_from_slice(words);
        rest.iter_mut().for_each(|cell| *cell = 0);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = 0);
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.cells
    }
}
