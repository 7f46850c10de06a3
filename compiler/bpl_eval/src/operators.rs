//! Binary operator implementations for the evaluator.
//!
//! The value set is closed, so operators dispatch by matching on the
//! operand pair. `এবং`/`বা` are short-circuited by the interpreter before
//! reaching this module; here they only see already-evaluated operands.

use std::cmp::Ordering;

use bpl_ir::BinaryOp;

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, modulo_by_zero, EvalResult,
};
use crate::value::int_to_float;
use crate::Value;

/// Checked integer arithmetic with overflow reporting.
#[inline]
fn checked_arith(result: Option<i64>, operation: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(operation))
}

/// Map an ordering onto a relational operator. `None` (NaN) compares false.
fn compare(ordering: Option<Ordering>, op: BinaryOp) -> bool {
    match op {
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        _ => false,
    }
}

#[inline]
fn is_relational(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq
    )
}

/// Evaluate a binary operation on two values.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
        BinaryOp::And => return Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => return Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        _ => {}
    }
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(int_to_float(*a), *b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, int_to_float(*b), op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op)
            .ok_or_else(|| binary_type_mismatch(op, left.type_name(), right.type_name())),
        _ => Err(binary_type_mismatch(
            op,
            left.type_name(),
            right.type_name(),
        )),
    }
}

/// Binary operations on integers.
///
/// `/` is true division and yields a float; `%` is floor modulo, so the
/// result takes the sign of the divisor.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Ok(Value::Float(int_to_float(a) / int_to_float(b)))
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(modulo_by_zero());
            }
            let rem = a.checked_rem(b).ok_or_else(|| integer_overflow("modulo"))?;
            if rem != 0 && (rem < 0) != (b < 0) {
                checked_arith(rem.checked_add(b), "modulo")
            } else {
                Ok(Value::Int(rem))
            }
        }
        _ if is_relational(op) => Ok(Value::Bool(compare(Some(a.cmp(&b)), op))),
        _ => Err(binary_type_mismatch(op, "ইন্ট", "ইন্ট")),
    }
}

/// Binary operations on floats (and promoted integers).
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Value::Float(a / b))
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(modulo_by_zero());
            }
            let rem = a % b;
            if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
                Ok(Value::Float(rem + b))
            } else {
                Ok(Value::Float(rem))
            }
        }
        _ if is_relational(op) => Ok(Value::Bool(compare(a.partial_cmp(&b), op))),
        _ => Err(binary_type_mismatch(op, "ফ্লোট", "ফ্লোট")),
    }
}

/// Binary operations on strings: concatenation and lexicographic order.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Option<Value> {
    match op {
        BinaryOp::Add => Some(Value::string(format!("{a}{b}"))),
        _ if is_relational(op) => Some(Value::Bool(compare(Some(a.cmp(b)), op))),
        _ => None,
    }
}
