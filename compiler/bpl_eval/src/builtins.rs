//! Runtime builtins.
//!
//! The registry is fixed. Builtins are resolved by name only after the
//! scope chain misses, so user bindings may shadow them.

use bpl_ir::{Name, StringInterner};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::errors::{wrong_arg_count, EvalResult};
use crate::print_handler::PrintHandler;
use crate::Value;

/// A host-provided function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `দেখাও(...)`: print the arguments separated by spaces.
    Print,
    /// `প্রকার(x)`: the type name of `x`.
    TypeOf,
}

impl Builtin {
    pub const ALL: [Builtin; 2] = [Builtin::Print, Builtin::TypeOf];

    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Print => "দেখাও",
            Builtin::TypeOf => "প্রকার",
        }
    }

    /// Invoke the builtin with already-evaluated arguments.
    pub fn call(self, args: &[Value], print: &PrintHandler) -> EvalResult {
        trace!(builtin = self.name(), args = args.len(), "builtin call");
        match self {
            Builtin::Print => {
                let line = args
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                print.println(&line);
                Ok(Value::Nil)
            }
            Builtin::TypeOf => match args {
                [value] => Ok(Value::string(value.type_name())),
                _ => Err(wrong_arg_count(self.name(), 1, args.len())),
            },
        }
    }
}

/// Name-indexed builtin lookup.
pub struct BuiltinRegistry {
    by_name: FxHashMap<Name, Builtin>,
}

impl BuiltinRegistry {
    pub fn new(interner: &StringInterner) -> Self {
        let by_name = Builtin::ALL
            .iter()
            .map(|&builtin| (interner.intern(builtin.name()), builtin))
            .collect();
        BuiltinRegistry { by_name }
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<Builtin> {
        self.by_name.get(&name).copied()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use crate::print_handler::buffer_handler;
    use pretty_assertions::assert_eq;

    #[test]
    fn print_joins_with_spaces() {
        let handler = buffer_handler();
        let result = Builtin::Print
            .call(
                &[Value::Int(1), Value::string("দুই"), Value::Bool(true)],
                &handler,
            )
            .unwrap();
        assert_eq!(result, Value::Nil);
        assert_eq!(handler.output(), "1 দুই সত্য\n");
    }

    #[test]
    fn print_without_arguments_prints_empty_line() {
        let handler = buffer_handler();
        Builtin::Print.call(&[], &handler).unwrap();
        assert_eq!(handler.output(), "\n");
    }

    #[test]
    fn type_of_names_each_tag() {
        let handler = buffer_handler();
        let name_of = |v: Value| Builtin::TypeOf.call(&[v], &handler).unwrap().to_string();
        assert_eq!(name_of(Value::Nil), "নিল");
        assert_eq!(name_of(Value::Bool(false)), "বুলীয়ান");
        assert_eq!(name_of(Value::Int(3)), "ইন্ট");
        assert_eq!(name_of(Value::Float(3.5)), "ফ্লোট");
        assert_eq!(name_of(Value::string("x")), "স্ট্রিং");
        assert_eq!(name_of(Value::Builtin(Builtin::Print)), "ফাংশন");
    }

    #[test]
    fn type_of_requires_one_argument() {
        let handler = buffer_handler();
        let err = Builtin::TypeOf.call(&[], &handler).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::ArityMismatch {
                name: "প্রকার".to_owned(),
                expected: 1,
                got: 0,
            }
        );
    }

    #[test]
    fn registry_resolves_by_interned_name() {
        let interner = StringInterner::new();
        let registry = BuiltinRegistry::new(&interner);
        assert_eq!(registry.get(interner.intern("দেখাও")), Some(Builtin::Print));
        assert_eq!(registry.get(interner.intern("প্রকার")), Some(Builtin::TypeOf));
        assert_eq!(registry.get(interner.intern("অজানা")), None);
    }
}
