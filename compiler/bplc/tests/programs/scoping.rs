use bpl_eval::EvalErrorKind;
use bplc::Error;
use pretty_assertions::assert_eq;

use crate::common::{output_of, run};

#[test]
fn counter_closure_observes_its_own_updates() {
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
";
    assert_eq!(output_of(source), "1\n2\n");
}

#[test]
fn separate_closures_have_separate_state() {
    let source = "\
ফাংশন make(start):
    ফাংশন next():
        start = start + 1
        ফলাফল start
    ফলাফল next
a = make(10)
b = make(100)
a()
দেখাও(a(), b(), a())
";
    assert_eq!(output_of(source), "12 101 13\n");
}

#[test]
fn closure_sees_later_assignment_in_defining_scope() {
    let source = "\
ফাংশন outer():
    ফাংশন read():
        ফলাফল value
    value = \"পরে\"
    ফলাফল read
দেখাও(outer()())
";
    assert_eq!(output_of(source), "পরে\n");
}

#[test]
fn free_names_resolve_where_the_function_was_defined() {
    let source = "\
x = \"global\"
ফাংশন show():
    ফলাফল x
ফাংশন caller():
    x = \"local\"
    ফলাফল show()
দেখাও(caller())
";
    // `caller` assigns the existing global, so `show` sees the update.
    assert_eq!(output_of(source), "local\n");

    let source = "\
ফাংশন show():
    ফলাফল y
ফাংশন caller():
    y = \"caller's\"
    ফলাফল show()
caller()
";
    let (result, _) = run(source);
    let Err(Error::Runtime(err)) = result else {
        panic!("expected a runtime error");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "y".to_string()
        }
    );
}

#[test]
fn assignment_rebinds_enclosing_binding() {
    let source = "\
total = 1
ফাংশন bump():
    total = total + 1
bump()
bump()
দেখাও(total)
";
    assert_eq!(output_of(source), "3\n");
}

#[test]
fn parameters_shadow_outer_names() {
    let source = "\
n = 1
ফাংশন f(n):
    n = n + 10
    ফলাফল n
দেখাও(f(5), n)
";
    assert_eq!(output_of(source), "15 1\n");
}

#[test]
fn names_first_assigned_in_a_block_stay_local() {
    let source = "\
যদি সত্য:
    fresh = 5
দেখাও(fresh)
";
    let (result, output) = run(source);
    let Err(Error::Runtime(err)) = result else {
        panic!("expected a runtime error");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "fresh".to_string()
        }
    );
    assert_eq!(err.pos, Some(bpl_ir::Position::new(3, 7)));
    assert_eq!(output, "");
}

#[test]
fn loop_body_updates_outer_variable() {
    let source = "\
sum = 0
i = 1
যখন i <= 10:
    sum = sum + i
    i = i + 1
দেখাও(sum)
";
    assert_eq!(output_of(source), "55\n");
}

#[test]
fn user_binding_shadows_builtin() {
    let source = "\
ফাংশন প্রকার(x):
    ফলাফল \"নিজস্ব\"
দেখাও(প্রকার(1))
";
    assert_eq!(output_of(source), "নিজস্ব\n");
}
