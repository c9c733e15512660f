use super::word::{encode_branch, encode_integer, encode_primitive};
use super::{Address, Opcode, Word};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Program image
///
/// A sequence of instruction words ready to load at address 0.
/// On disk an image is the words in little-endian byte order.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    words: Vec<Word>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }
    pub fn from_words(words: Vec<Word>) -> Program {
        Program { words }
    }
    pub fn words(&self) -> &[Word] {
        &self.words
    }
    pub fn len(&self) -> usize {
        self.words.len()
    }
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
    pub fn clear(&mut self) {
        self.words.clear()
    }
    /// Appends a raw word and returns its address.
    pub fn push(&mut self, word: Word) -> Address {
        self.words.push(word);
        self.words.len() - 1
    }
    pub fn literal(&mut self, val: i32) -> Result<Address> {
        Ok(self.push(encode_integer(val)?))
    }
    pub fn op(&mut self, op: Opcode) -> Address {
        self.push(encode_primitive(op))
    }
    pub fn branch(&mut self, op: Opcode, target: Address) -> Result<Address> {
        Ok(self.push(encode_branch(op, target)?))
    }
    /// Rewrites the target of the branch at `addr`.
    pub fn patch_target(&mut self, addr: Address, op: Opcode, target: Address) -> Result<()> {
        let word = encode_branch(op, target)?;
        match self.words.get_mut(addr) {
            Some(w) => {
                *w = word;
                Ok(())
            }
            None => Err(error!(InternalError; "PATCH OUTSIDE PROGRAM")),
        }
    }

    pub fn checksum(&self) -> u32 {
        Program::checksum_words(&self.words)
    }
    /// CRC-32 (IEEE) of the little-endian image.
    pub fn checksum_words(words: &[Word]) -> u32 {
        crc::crc32::checksum_ieee(&Program::bytes_of(words))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        Program::bytes_of(&self.words)
    }
    fn bytes_of(words: &[Word]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes().to_vec()).collect()
    }
    pub fn from_bytes(bytes: &[u8]) -> Result<Program> {
        if bytes.len() % 4 != 0 {
            return Err(error!(BadFileFormat; "IMAGE LENGTH NOT A MULTIPLE OF 4"));
        }
        let words = bytes
            .chunks_exact(4)
            .map(|c| Word::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Program { words })
    }
}
