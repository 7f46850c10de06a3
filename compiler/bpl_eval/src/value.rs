//! Runtime values.

use std::fmt;
use std::rc::Rc;

use bpl_ir::FunctionDef;

use crate::builtins::Builtin;
use crate::environment::{LocalScope, Scope};

/// A runtime value.
///
/// Values are immutable; operators produce new values. Cloning is cheap:
/// strings and functions are reference-counted.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    /// User-defined function closing over its defining scope.
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// The language-level type name, as returned by `প্রকার`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "নিল",
            Value::Bool(_) => "বুলীয়ান",
            Value::Int(_) => "ইন্ট",
            Value::Float(_) => "ফ্লোট",
            Value::Str(_) => "স্ট্রিং",
            Value::Function(_) | Value::Builtin(_) => "ফাংশন",
        }
    }

    /// Only `নিল` and `মিথ্যা` are falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }
}

/// Promote an integer operand in mixed arithmetic.
#[expect(
    clippy::cast_precision_loss,
    reason = "Int promotes to Float in mixed arithmetic; precision loss above 2^53 is accepted"
)]
#[inline]
pub(crate) fn int_to_float(n: i64) -> f64 {
    n as f64
}

impl PartialEq for Value {
    /// Numbers compare numerically across `Int` and `Float`; functions
    /// compare by identity; values of unrelated types are never equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                int_to_float(*a) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "নিল"),
            Value::Bool(true) => write!(f, "সত্য"),
            Value::Bool(false) => write!(f, "মিথ্যা"),
            Value::Int(n) => write!(f, "{n}"),
            // Debug formatting keeps the fractional part: `2.0`, not `2`.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Function(func) => write!(f, "<ফাংশন {}>", func.name),
            Value::Builtin(builtin) => write!(f, "<বিল্টইন {}>", builtin.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Function(func) => write!(f, "Function({})", func.name),
            Value::Builtin(builtin) => write!(f, "Builtin({})", builtin.name()),
        }
    }
}

/// A user-defined function together with the scope it was defined in.
pub struct FunctionValue {
    name: &'static str,
    decl: Rc<FunctionDef>,
    env: LocalScope<Scope>,
}

impl FunctionValue {
    pub fn new(name: &'static str, decl: Rc<FunctionDef>, env: LocalScope<Scope>) -> Self {
        FunctionValue { name, decl, env }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn decl(&self) -> &FunctionDef {
        &self.decl
    }

    pub fn arity(&self) -> usize {
        self.decl.params.len()
    }

    /// The captured defining scope; parent of every call scope.
    pub fn env(&self) -> &LocalScope<Scope> {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_forms() {
        assert_eq!(Value::Nil.to_string(), "নিল");
        assert_eq!(Value::Bool(true).to_string(), "সত্য");
        assert_eq!(Value::Bool(false).to_string(), "মিথ্যা");
        assert_eq!(Value::Int(-5).to_string(), "-5");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::string("হ্যালো").to_string(), "হ্যালো");
        assert_eq!(Value::Builtin(Builtin::Print).to_string(), "<বিল্টইন দেখাও>");
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Int(0).is_truthy());
        assert!(Value::Float(0.0).is_truthy());
        assert!(Value::string("").is_truthy());
    }

    #[test]
    fn equality() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_eq!(Value::Float(2.0), Value::Int(2));
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_ne!(Value::string("1"), Value::Int(1));
        assert_eq!(Value::string("ক"), Value::string("ক"));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Nil.type_name(), "নিল");
        assert_eq!(Value::Int(1).type_name(), "ইন্ট");
        assert_eq!(Value::Float(1.0).type_name(), "ফ্লোট");
        assert_eq!(Value::Builtin(Builtin::TypeOf).type_name(), "ফাংশন");
    }
}
