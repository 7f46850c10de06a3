#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use bpl_ir::{Position, StringInterner};
use bpl_lexer::KeywordTable;
use pretty_assertions::assert_eq;

use crate::errors::{EvalError, EvalErrorKind};
use crate::{buffer_handler, Interpreter, Value};

fn eval_in(interpreter: &mut Interpreter<'_>, interner: &StringInterner, source: &str) -> Result<Value, EvalError> {
    let tokens = bpl_lexer::lex(source, KeywordTable::builtin().unwrap(), interner).unwrap();
    let program = bpl_parse::parse(&tokens, interner).unwrap();
    interpreter.eval_program(&program)
}

/// Run a program with captured output and the given call depth limit.
fn run_with_depth(source: &str, depth: usize) -> (Result<Value, EvalError>, String) {
    let interner = StringInterner::new();
    let mut interpreter = Interpreter::builder(&interner)
        .print_handler(buffer_handler())
        .max_call_depth(depth)
        .build();
    let result = eval_in(&mut interpreter, &interner, source);
    let output = interpreter.print_handler().output();
    (result, output)
}

fn run(source: &str) -> (Result<Value, EvalError>, String) {
    run_with_depth(source, crate::DEFAULT_MAX_CALL_DEPTH)
}

fn output_of(source: &str) -> String {
    let (result, output) = run(source);
    result.unwrap();
    output
}

fn error_of(source: &str) -> (EvalError, String) {
    let (result, output) = run(source);
    (result.unwrap_err(), output)
}

// === Basic programs ===

#[test]
fn add_function_prints_once() {
    let source = "ফাংশন add(a, b):\n  ফলাফল a + b\n\nদেখাও(add(2, 3))";
    let (result, output) = run(source);
    assert_eq!(result.unwrap(), Value::Nil);
    assert_eq!(output, "5\n");
}

#[test]
fn program_result_is_last_expression_statement() {
    let (result, _) = run("১ + ২\nক = ৫\n");
    assert_eq!(result.unwrap(), Value::Int(3));
    let (result, _) = run("ক = ৫\n");
    assert_eq!(result.unwrap(), Value::Nil);
}

#[test]
fn while_loop_counts() {
    let source = "ক = ০\nযখন ক < ৩:\n    দেখাও(ক)\n    ক = ক + ১\n";
    assert_eq!(output_of(source), "0\n1\n2\n");
}

#[test]
fn else_if_chain_picks_one_branch() {
    let source = "\
ফাংশন শ্রেণী(ন):
    যদি ন < ০:
        ফলাফল \"ঋণাত্মক\"
    নইলে যদি ন == ০:
        ফলাফল \"শূন্য\"
    নইলে:
        ফলাফল \"ধনাত্মক\"
দেখাও(শ্রেণী(-৩), শ্রেণী(০), শ্রেণী(৭))
";
    assert_eq!(output_of(source), "ঋণাত্মক শূন্য ধনাত্মক\n");
}

#[test]
fn recursion() {
    let source = "\
ফাংশন ফিব(ন):
    যদি ন < ২:
        ফলাফল ন
    ফলাফল ফিব(ন - ১) + ফিব(ন - ২)
দেখাও(ফিব(১৫))
";
    assert_eq!(output_of(source), "610\n");
}

#[test]
fn deep_recursion_within_limit() {
    let source = "\
ফাংশন গভীর(ন):
    যদি ন == ০:
        ফলাফল ০
    ফলাফল ১ + গভীর(ন - ১)
দেখাও(গভীর(৫০০০))
";
    assert_eq!(output_of(source), "5000\n");
}

#[test]
fn return_unwinds_out_of_loop() {
    let source = "\
ফাংশন প্রথম_বড়(সীমা):
    ন = ০
    যখন সত্য:
        যদি ন * ন > সীমা:
            ফলাফল ন
        ন = ন + ১
দেখাও(প্রথম_বড়(৫০))
";
    assert_eq!(output_of(source), "8\n");
}

#[test]
fn missing_return_value_is_nil() {
    let source = "ফাংশন চ():\n    ফলাফল\nফাংশন ছ():\n    ক = ১\nদেখাও(চ(), ছ())\n";
    assert_eq!(output_of(source), "নিল নিল\n");
}

#[test]
fn short_circuit_skips_right_operand() {
    let (result, _) = run("মিথ্যা এবং অজানা()\n");
    assert_eq!(result.unwrap(), Value::Bool(false));
    let (result, _) = run("সত্য বা অজানা()\n");
    assert_eq!(result.unwrap(), Value::Bool(true));
    let (result, _) = run("১ এবং \"ক\"\n");
    assert_eq!(result.unwrap(), Value::Bool(true));
}

#[test]
fn display_forms_through_print() {
    let source = "ফাংশন চ():\n    ফলাফল ১\nদেখাও(চ, দেখাও, ৭ / ২, ৪ / ২, সত্য, নিল, \"লেখা\")\n";
    assert_eq!(
        output_of(source),
        "<ফাংশন চ> <বিল্টইন দেখাও> 3.5 2.0 সত্য নিল লেখা\n"
    );
}

#[test]
fn type_of_builtin() {
    let source = "দেখাও(প্রকার(১), প্রকার(১.৫), প্রকার(\"ক\"), প্রকার(নিল), প্রকার(সত্য), প্রকার(দেখাও))\n";
    assert_eq!(output_of(source), "ইন্ট ফ্লোট স্ট্রিং নিল বুলীয়ান ফাংশন\n");
}

#[test]
fn user_bindings_shadow_builtins() {
    let source = "ফাংশন প্রকার(x):\n    ফলাফল \"নিজস্ব\"\nদেখাও(প্রকার(১))\n";
    assert_eq!(output_of(source), "নিজস্ব\n");
}

#[test]
fn keyword_variants_run_like_canonical_forms() {
    let source = "\
ফংশন যোগফল(ক, খ):
    রিটার্ন ক + খ
ন = ০
যতক্ষণ ন < ২:
    ন = ন + ১
যদি ন == ২ ও ঠিক:
    প্রিন্ট(যোগফল(ন, ১))
অন্যথায়:
    ছাপো(ভুল)
";
    assert_eq!(output_of(source), "3\n");
}

#[test]
fn globals_persist_across_programs() {
    let interner = StringInterner::new();
    let mut interpreter = Interpreter::builder(&interner)
        .print_handler(buffer_handler())
        .build();
    eval_in(&mut interpreter, &interner, "মোট = ১০\n").unwrap();
    eval_in(&mut interpreter, &interner, "মোট = মোট + ৫\n").unwrap();
    assert_eq!(interpreter.global("মোট"), Some(Value::Int(15)));
}

// === Scoping and closures ===

#[test]
fn counter_closure_keeps_state() {
    let source = "\
ফাংশন গণক():
    গণনা = ০
    ফাংশন বাড়াও():
        গণনা = গণনা + ১
        ফলাফল গণনা
    ফলাফল বাড়াও
চ = গণক()
দেখাও(চ())
দেখাও(চ())
ছ = গণক()
দেখাও(ছ(), চ())
";
    assert_eq!(output_of(source), "1\n2\n1 3\n");
}

#[test]
fn closures_see_later_changes_to_captured_scope() {
    let source = "ক = ১\nফাংশন পড়ো():\n    ফলাফল ক\nক = ২\nদেখাও(পড়ো())\n";
    assert_eq!(output_of(source), "2\n");
}

#[test]
fn scoping_is_lexical_not_dynamic() {
    let source = "\
ক = \"বাইরের\"
ফাংশন পড়ো():
    ফলাফল ক
ফাংশন ডাকো():
    ক = \"ভিতরের\"
    ফলাফল পড়ো()
দেখাও(ডাকো())
";
    // `ডাকো` rebinds the global `ক`, which `পড়ো` then reads.
    assert_eq!(output_of(source), "ভিতরের\n");
    let source = "\
ফাংশন পড়ো():
    ফলাফল স্থানীয়
ফাংশন ডাকো():
    স্থানীয় = ১
    ফলাফল পড়ো()
দেখাও(ডাকো())
";
    let (err, _) = error_of(source);
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "স্থানীয়".to_owned()
        }
    );
}

#[test]
fn assignment_rebinds_enclosing_binding() {
    let source = "ক = ১\nফাংশন বদলাও():\n    ক = ২\nবদলাও()\nদেখাও(ক)\n";
    assert_eq!(output_of(source), "2\n");
}

#[test]
fn parameters_shadow_outer_bindings() {
    let source = "ক = ১\nফাংশন চ(ক):\n    ক = ক + ১০\n    ফলাফল ক\nদেখাও(চ(৫), ক)\n";
    assert_eq!(output_of(source), "15 1\n");
}

#[test]
fn block_locals_do_not_leak() {
    let (err, output) = error_of("যদি সত্য:\n    নতুন = ১\nদেখাও(নতুন)\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "নতুন".to_owned()
        }
    );
    assert_eq!(output, "");
}

#[test]
fn loop_body_updates_outer_variable() {
    let source = "মোট = ০\nন = ১\nযখন ন <= ৪:\n    মোট = মোট + ন\n    ন = ন + ১\nদেখাও(মোট)\n";
    assert_eq!(output_of(source), "10\n");
}

#[test]
fn dropping_interpreter_releases_closure_cycles() {
    let interner = StringInterner::new();
    let mut interpreter = Interpreter::builder(&interner)
        .print_handler(buffer_handler())
        .build();
    let source = "\
ফাংশন গণক():
    গণনা = ০
    ফাংশন বাড়াও():
        গণনা = গণনা + ১
        ফলাফল গণনা
    ফলাফল বাড়াও
গণক()
";
    let Value::Function(func) = eval_in(&mut interpreter, &interner, source).unwrap() else {
        panic!("expected a function value");
    };
    let captured = func.env().clone();
    let inner = interner.intern("বাড়াও");
    assert!(captured.borrow().contains(inner));

    drop(interpreter);
    assert!(!captured.borrow().contains(inner));
}

// === Runtime errors ===

#[test]
fn undefined_variable_prints_nothing() {
    let (err, output) = error_of("দেখাও(xyz)");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "xyz".to_owned()
        }
    );
    assert_eq!(err.pos, Some(Position::new(1, 7)));
    assert_eq!(output, "");
}

#[test]
fn output_before_error_is_kept() {
    let (err, output) = error_of("দেখাও(১)\nদেখাও(১ / ০)\n");
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.pos, Some(Position::new(2, 7)));
    assert_eq!(output, "1\n");
}

#[test]
fn return_outside_function() {
    let (err, _) = error_of("ফলাফল ১\n");
    assert_eq!(err.kind, EvalErrorKind::ReturnOutsideFunction);
    assert_eq!(err.pos, Some(Position::new(1, 1)));

    let (err, _) = error_of("যদি সত্য:\n    ফলাফল\n");
    assert_eq!(err.kind, EvalErrorKind::ReturnOutsideFunction);
    assert_eq!(err.pos, Some(Position::new(2, 5)));
}

#[test]
fn arity_mismatch() {
    let (err, _) = error_of("ফাংশন চ(ক):\n    ফলাফল ক\nচ(১, ২)\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "চ".to_owned(),
            expected: 1,
            got: 2,
        }
    );
    assert_eq!(err.pos, Some(Position::new(3, 1)));
}

#[test]
fn calling_a_non_function() {
    let (err, _) = error_of("ক = ৫\nক()\n");
    assert_eq!(err.kind, EvalErrorKind::NotCallable { type_name: "ইন্ট" });
}

#[test]
fn type_mismatch() {
    let (err, _) = error_of("দেখাও(১ + \"ক\")\n");
    assert!(matches!(err.kind, EvalErrorKind::BinaryTypeMismatch { .. }));
    assert_eq!(
        err.kind.to_string(),
        "operator `+` cannot be applied to ইন্ট and স্ট্রিং"
    );
}

#[test]
fn runaway_recursion_is_a_stack_overflow() {
    let source = "ফাংশন চ(ন):\n    ফলাফল চ(ন + ১)\nচ(০)\n";
    let (result, _) = run_with_depth(source, 50);
    let err = result.unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 50 });
    assert_eq!(err.pos, Some(Position::new(2, 11)));
    assert_eq!(err.backtrace.map(|trace| trace.len()), Some(50));
}

#[test]
fn errors_inside_calls_carry_backtrace() {
    let source = "\
ফাংশন ভিতরে():
    ফলাফল ১ / ০
ফাংশন বাইরে():
    ফলাফল ভিতরে()
বাইরে()
";
    let (err, _) = error_of(source);
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.pos, Some(Position::new(2, 11)));
    let backtrace = err.backtrace.unwrap();
    let frames: Vec<_> = backtrace
        .frames()
        .iter()
        .map(|frame| (frame.name.as_str(), frame.call_pos))
        .collect();
    assert_eq!(
        frames,
        vec![
            ("ভিতরে", Some(Position::new(4, 11))),
            ("বাইরে", Some(Position::new(5, 1))),
        ]
    );
}

#[test]
fn interpreter_is_reusable_after_error() {
    let interner = StringInterner::new();
    let mut interpreter = Interpreter::builder(&interner)
        .print_handler(buffer_handler())
        .build();
    let failing = "ফাংশন চ():\n    যদি সত্য:\n        ফলাফল ১ / ০\nচ()\n";
    assert!(eval_in(&mut interpreter, &interner, failing).is_err());
    assert_eq!(
        eval_in(&mut interpreter, &interner, "ক = ৩\nক\n").unwrap(),
        Value::Int(3)
    );
    assert_eq!(interpreter.global("ক"), Some(Value::Int(3)));
}
