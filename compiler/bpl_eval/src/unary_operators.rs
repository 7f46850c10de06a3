//! Unary operator implementations for the evaluator.

use bpl_ir::UnaryOp;

use crate::errors::{integer_overflow, invalid_unary_operand, EvalResult};
use crate::Value;

/// Evaluate a unary operation.
///
/// `না` accepts any value and negates its truthiness; `-` accepts numbers.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Neg, value) => Err(invalid_unary_operand(op, value.type_name())),
    }
}
