use super::{Address, Instruction, Word};

/// ## Disassembly of instruction words
///
/// ```text
/// 0000  3
/// 0001  4
/// 0002  ADD
/// 0003  BR 0
/// ```

#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    words: &'a [Word],
    origin: Address,
}

impl<'a> Listing<'a> {
    pub fn new(words: &'a [Word]) -> Listing<'a> {
        Listing { words, origin: 0 }
    }

    /// Lists `words` as if they were loaded at `origin`.
    pub fn at(words: &'a [Word], origin: Address) -> Listing<'a> {
        Listing { words, origin }
    }

    pub fn line(&self, addr: Address) -> Option<String> {
        let index = addr.checked_sub(self.origin)?;
        let word = self.words.get(index)?;
        Some(format!("{:04}  {}", addr, Instruction::decode(*word)))
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + 'a {
        let origin = self.origin;
        self.words
            .iter()
            .enumerate()
            .map(move |(index, word)| format!("{:04}  {}", origin + index, Instruction::decode(*word)))
    }
}

impl<'a> std::fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
