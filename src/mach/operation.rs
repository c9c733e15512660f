use super::Opcode;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub type Binary = fn(i32, i32) -> Result<i32>;

/// ## Arithmetic and logic on stack cells
///
/// Every binary operation takes the deeper cell as `lhs`.
/// Arithmetic wraps at 32 bits. Comparisons are signed and yield 1 or 0.

pub struct Operation {}

impl Operation {
    /// Semantics table for the two-operand opcodes.
    pub fn binary(op: Opcode) -> Option<Binary> {
        use Opcode::*;
        let f: Binary = match op {
            Add => Operation::sum,
            Sub => Operation::subtract,
            Mul => Operation::multiply,
            Div => Operation::divide,
            And => Operation::and,
            Or => Operation::or,
            Xor => Operation::xor,
            Lt => Operation::less,
            Gt => Operation::greater,
            Le => Operation::less_equal,
            Ge => Operation::greater_equal,
            Eq => Operation::equal,
            Ne => Operation::not_equal,
            Halt | Not | Br | Brt | Brf | Ret => return None,
        };
        Some(f)
    }

    pub fn sum(lhs: i32, rhs: i32) -> Result<i32> {
        Ok(lhs.wrapping_add(rhs))
    }

    pub fn subtract(lhs: i32, rhs: i32) -> Result<i32> {
        Ok(lhs.wrapping_sub(rhs))
    }

    pub fn multiply(lhs: i32, rhs: i32) -> Result<i32> {
        Ok(lhs.wrapping_mul(rhs))
    }

    pub fn divide(lhs: i32, rhs: i32) -> Result<i32> {
        if rhs == 0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(lhs.wrapping_div(rhs))
        }
    }

    pub fn and(lhs: i32, rhs: i32) -> Result<i32> {
        Ok(lhs & rhs)
    }

    pub fn or(lhs: i32, rhs: i32) -> Result<i32> {
        Ok(lhs | rhs)
    }

    pub fn xor(lhs: i32, rhs: i32) -> Result<i32> {
        Ok(lhs ^ rhs)
    }

    pub fn not(val: i32) -> i32 {
        !val
    }

    pub fn equal(lhs: i32, rhs: i32) -> Result<i32> {
        Ok((lhs == rhs) as i32)
    }

    pub fn not_equal(lhs: i32, rhs: i32) -> Result<i32> {
        Ok((lhs != rhs) as i32)
    }

    pub fn less(lhs: i32, rhs: i32) -> Result<i32> {
        Ok((lhs < rhs) as i32)
    }

    pub fn less_equal(lhs: i32, rhs: i32) -> Result<i32> {
        Ok((lhs <= rhs) as i32)
    }

    pub fn greater(lhs: i32, rhs: i32) -> Result<i32> {
        Operation::less(rhs, lhs)
    }

    pub fn greater_equal(lhs: i32, rhs: i32) -> Result<i32> {
        Operation::less_equal(rhs, lhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_order() {
        assert_eq!(Operation::subtract(10, 3).unwrap(), 7);
        assert_eq!(Operation::divide(12, 4).unwrap(), 3);
        assert_eq!(Operation::less(1, 2).unwrap(), 1);
        assert_eq!(Operation::greater(1, 2).unwrap(), 0);
    }

    #[test]
    fn test_wrapping() {
        assert_eq!(Operation::sum(i32::MAX, 1).unwrap(), i32::MIN);
        assert_eq!(Operation::multiply(i32::MIN, -1).unwrap(), i32::MIN);
        assert_eq!(Operation::divide(i32::MIN, -1).unwrap(), i32::MIN);
    }

    #[test]
    fn test_division_by_zero() {
        let error = Operation::divide(5, 0).unwrap_err();
        assert_eq!(error.code(), crate::lang::ErrorCode::DivisionByZero);
    }

    #[test]
    fn test_table_covers_binary_opcodes() {
        for op in Opcode::ALL.iter() {
            assert_eq!(Operation::binary(*op).is_some(), op.arity() == 2, "{}", op);
        }
    }
}
