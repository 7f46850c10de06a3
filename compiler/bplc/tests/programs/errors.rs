use bpl_diagnostic::ErrorCode;
use bpl_eval::{EvalError, EvalErrorKind};
use bpl_ir::Position;
use bpl_lexer::{Keyword, KeywordTable, LexErrorKind};
use bplc::Error;
use pretty_assertions::assert_eq;

use crate::common::{run, run_in, session};

fn runtime_error(result: Result<bpl_eval::Value, Error>) -> EvalError {
    match result {
        Err(Error::Runtime(err)) => err,
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

// === Lex errors ===

#[test]
fn bad_indentation_fails_before_any_output() {
    let source = "দেখাও(\"আগে\")\nফাংশন f():\n  দেখাও(1)\n   দেখাও(2)\nf()\n";
    let (result, output) = run(source);
    let Err(Error::Lex(err)) = result else {
        panic!("expected a lex error");
    };
    assert_eq!(err.kind, LexErrorKind::UnexpectedIndent);
    assert_eq!(err.pos, Position::new(4, 4));
    assert_eq!(output, "");
}

#[test]
fn dedent_to_unknown_width() {
    let (result, output) = run("যদি সত্য:\n    দেখাও(1)\n  দেখাও(2)\n");
    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E0004);
    assert_eq!(err.position(), Some(Position::new(3, 3)));
    assert_eq!(output, "");
}

// === Syntax errors ===

#[test]
fn duplicate_parameter_fails_before_any_output() {
    let (result, output) = run("দেখাও(1)\nফাংশন f(x, y, x):\n    ফলাফল x\n");
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
    assert_eq!(err.code(), ErrorCode::E1006);
    assert_eq!(err.position(), Some(Position::new(2, 15)));
    assert_eq!(output, "");
}

#[test]
fn syntax_error_prevents_evaluation() {
    let (result, output) = run("দেখাও(1)\nযদি ক\n    দেখাও(2)\n");
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Syntax(_) | Error::Lex(_)));
    assert_eq!(output, "");

    let (result, output) = run("দেখাও(1)\nযদি ক\n");
    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
    assert_eq!(err.position(), Some(Position::new(2, 6)));
    assert_eq!(err.to_string(), "syntax error: expected `:`, found newline");
    assert_eq!(output, "");
}

// === Runtime errors ===

#[test]
fn undefined_name_prints_nothing() {
    let (result, output) = run("দেখাও(xyz)");
    let err = runtime_error(result);
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "xyz".to_string()
        }
    );
    assert_eq!(err.pos, Some(Position::new(1, 7)));
    assert_eq!(output, "");
}

#[test]
fn output_before_runtime_error_is_kept() {
    let (result, output) = run("দেখাও(1)\nদেখাও(1 / 0)\nদেখাও(2)\n");
    let err = runtime_error(result);
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.pos, Some(Position::new(2, 7)));
    assert_eq!(output, "1\n");
}

#[test]
fn arity_mismatch_names_the_function() {
    let (result, _) = run("ফাংশন f(a):\n    ফলাফল a\nf(1, 2)\n");
    let err = runtime_error(result);
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "f".to_string(),
            expected: 1,
            got: 2
        }
    );
    assert_eq!(err.code(), ErrorCode::E6004);
    assert_eq!(err.pos, Some(Position::new(3, 1)));
}

#[test]
fn integer_overflow_is_a_runtime_error() {
    let source = "\
ফাংশন fact(n):
    যদি n <= 1:
        ফলাফল 1
    ফলাফল n * fact(n - 1)
fact(21)
";
    let err = runtime_error(run(source).0);
    assert!(matches!(err.kind, EvalErrorKind::IntegerOverflow { .. }));
    assert_eq!(err.pos, Some(Position::new(4, 11)));
    // Only the outermost multiplication overflows.
    let trace = err.backtrace.unwrap();
    assert_eq!(trace.len(), 1);
    assert_eq!(trace.frames()[0].to_string(), "in fact called at 5:1");
}

#[test]
fn runaway_recursion_reports_stack_overflow() {
    let session = session().with_max_call_depth(100);
    let source = "ফাংশন loop(n):\n    ফলাফল loop(n + 1)\nloop(0)\n";
    let (result, output) = run_in(&session, source);
    let err = runtime_error(result);

    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 100 });
    assert_eq!(err.pos, Some(Position::new(2, 11)));
    assert_eq!(output, "");

    let trace = err.backtrace.as_ref().unwrap();
    assert_eq!(trace.len(), 100);
    assert_eq!(trace.frames()[0].to_string(), "in loop called at 2:11");
    assert_eq!(trace.frames()[99].to_string(), "in loop called at 3:1");

    let rendered = Error::Runtime(err).to_diagnostic().render(source, "loop.bpl");
    assert!(rendered.starts_with(
        "error[E6007]: maximum recursion depth exceeded (limit: 100)\n --> loop.bpl:2:11\n"
    ));
    assert!(rendered.contains("  = note: in loop called at 2:11\n"));
    assert!(rendered.contains("  = note: ... 92 more calls\n"));
    assert!(rendered.ends_with("  = help: check that the recursion has a reachable base case\n"));
}

#[test]
fn deep_recursion_within_the_limit_succeeds() {
    let source = "\
ফাংশন depth(n):
    যদি n == 0:
        ফলাফল 0
    ফলাফল 1 + depth(n - 1)
দেখাও(depth(3000))
";
    let (result, output) = run(source);
    result.unwrap();
    assert_eq!(output, "3000\n");
}

// === Diagnostics ===

#[test]
fn undefined_name_diagnostic_points_at_the_name() {
    let source = "দেখাও(xyz)\n";
    let err = run(source).0.unwrap_err();
    assert_eq!(
        err.to_diagnostic().render(source, "main.bpl"),
        "error[E6001]: undefined variable: xyz\n \
         --> main.bpl:1:7\n  \
         |\n\
         1 | দেখাও(xyz)\n  \
         |       ^\n  \
         = help: assign the variable with `=` before using it\n"
    );
}

#[test]
fn configuration_error_has_no_position() {
    let err: Error = KeywordTable::from_entries([("যদি", Keyword::While)])
        .unwrap_err()
        .into();
    assert_eq!(err.code(), ErrorCode::E9001);
    assert_eq!(err.position(), None);
    assert!(err
        .to_diagnostic()
        .render("", "<keywords>")
        .starts_with("error[E9001]: keyword variant `যদি`"));
}
