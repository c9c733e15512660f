use super::{Address, Memory};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced cursor over shared memory
///
/// The stack lives in the cells from `base` to the end of memory.
/// An empty stack has no top address at all, so it can never alias
/// a real cell. Values are signed; cells hold their bit pattern.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stack {
    base: Address,
    sp: Option<Address>,
}

impl Stack {
    pub fn new(base: Address) -> Stack {
        Stack { base, sp: None }
    }
    fn underflow_error(&self) -> Error {
        error!(StackUnderflow)
    }
    fn need(&self, len: usize) -> Result<()> {
        if self.len() < len {
            Err(self.underflow_error())
        } else {
            Ok(())
        }
    }
    /// Address of the top of stack.
    pub fn sp(&self) -> Option<Address> {
        self.sp
    }
    pub fn len(&self) -> usize {
        match self.sp {
            Some(sp) => sp - self.base + 1,
            None => 0,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.sp.is_none()
    }
    pub fn push(&mut self, memory: &mut Memory, val: i32) -> Result<()> {
        let next = match self.sp {
            Some(sp) => sp + 1,
            None => self.base,
        };
        if next >= memory.capacity() {
            return Err(error!(StackOverflow));
        }
        memory.set(next, val as u32)?;
        self.sp = Some(next);
        Ok(())
    }
    pub fn pop(&mut self, memory: &Memory) -> Result<i32> {
        let val = self.last(memory)?;
        self.sp = match self.sp {
            Some(sp) if sp > self.base => Some(sp - 1),
            _ => None,
        };
        Ok(val)
    }
    pub fn last(&self, memory: &Memory) -> Result<i32> {
        match self.sp {
            Some(sp) => Ok(memory.get(sp)? as i32),
            None => Err(self.underflow_error()),
        }
    }
    /// Replaces the top of stack in place.
    pub fn set_last(&mut self, memory: &mut Memory, val: i32) -> Result<()> {
        match self.sp {
            Some(sp) => memory.set(sp, val as u32),
            None => Err(self.underflow_error()),
        }
    }
    /// Reads `(sp - 1, sp)` without popping. The deeper cell is first.
    pub fn peek_2(&self, memory: &Memory) -> Result<(i32, i32)> {
        self.need(2)?;
        match self.sp {
            Some(sp) => Ok((memory.get(sp - 1)? as i32, memory.get(sp)? as i32)),
            None => Err(self.underflow_error()),
        }
    }
    /// Pops one cell and overwrites the new top with `val`.
    pub fn collapse(&mut self, memory: &mut Memory, val: i32) -> Result<()> {
        self.need(2)?;
        self.pop(memory)?;
        self.set_last(memory, val)
    }
    /// Bottom to top.
    pub fn values(&self, memory: &Memory) -> Vec<i32> {
        match self.sp {
            Some(sp) => memory.as_slice()[self.base..=sp]
                .iter()
                .map(|cell| *cell as i32)
                .collect(),
            None => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut memory = Memory::new(8).unwrap();
        let mut stack = Stack::new(2);
        stack.push(&mut memory, 3).unwrap();
        stack.push(&mut memory, -4).unwrap();
        assert_eq!(stack.sp(), Some(3));
        assert_eq!(memory.get(3).unwrap(), -4i32 as u32);
        assert_eq!(stack.peek_2(&memory).unwrap(), (3, -4));
        assert_eq!(stack.values(&memory), vec![3, -4]);
        assert_eq!(stack.pop(&memory).unwrap(), -4);
        assert_eq!(stack.pop(&memory).unwrap(), 3);
        assert!(stack.is_empty());
        assert_eq!(stack.pop(&memory).unwrap_err().code(), crate::lang::ErrorCode::StackUnderflow);
    }

    #[test]
    fn test_overflow_at_capacity() {
        let mut memory = Memory::new(4).unwrap();
        let mut stack = Stack::new(2);
        stack.push(&mut memory, 1).unwrap();
        stack.push(&mut memory, 2).unwrap();
        let error = stack.push(&mut memory, 3).unwrap_err();
        assert_eq!(error.code(), crate::lang::ErrorCode::StackOverflow);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_collapse_needs_two() {
        let mut memory = Memory::new(4).unwrap();
        let mut stack = Stack::new(0);
        stack.push(&mut memory, 9).unwrap();
        assert!(stack.collapse(&mut memory, 1).is_err());
        assert_eq!(stack.values(&memory), vec![9]);
        stack.push(&mut memory, 5).unwrap();
        stack.collapse(&mut memory, 14).unwrap();
        assert_eq!(stack.values(&memory), vec![14]);
    }
}
