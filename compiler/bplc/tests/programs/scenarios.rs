use bpl_eval::{silent_handler, Value};
use bplc::Session;
use pretty_assertions::assert_eq;

use crate::common::{output_of, run, run_in};

#[test]
fn add_prints_five_once() {
    let source = "ফাংশন add(a, b):\n  ফলাফল a + b\n\nদেখাও(add(2, 3))";
    let (result, output) = run(source);
    assert_eq!(result.unwrap(), Value::Nil);
    assert_eq!(output, "5\n");
}

#[test]
fn program_value_is_last_expression() {
    let (result, output) = run("ক = ৪\nক * ১০\n");
    assert_eq!(result.unwrap(), Value::Int(40));
    assert_eq!(output, "");
}

#[test]
fn keyword_variants_behave_like_canonical_spelling() {
    let canonical = "\
ফাংশন f(x):
    যদি x > ১০:
        ফলাফল সত্য
    নইলে:
        ফলাফল মিথ্যা
দেখাও(f(৫), f(২০), নিল)
";
    let variant = "\
ফংশন f(x):
    যদি x > ১০:
        ফেরত ঠিক
    অন্যথায়:
        রিটার্ন ভুল
প্রিন্ট(f(৫), f(২০), শূন্য)
";
    assert_eq!(output_of(canonical), "মিথ্যা সত্য নিল\n");
    assert_eq!(output_of(variant), output_of(canonical));
}

#[test]
fn words_resembling_keywords_are_plain_variables() {
    let source = "ভালো = 5\nকোন = 1\nকেন = 2\nনীল = 3\nদেখাও(ভালো, কোন + কেন + নীল)\n";
    assert_eq!(output_of(source), "5 6\n");
}

#[test]
fn silent_session_still_evaluates() {
    let session = Session::new()
        .unwrap()
        .with_print_handler(silent_handler());
    let (result, output) = run_in(&session, "দেখাও(\"হ্যালো\")\n২ + ৩\n");
    assert_eq!(result.unwrap(), Value::Int(5));
    assert_eq!(output, "");
}

#[test]
fn logical_operator_variants() {
    assert_eq!(
        output_of("দেখাও(সত্য এবাং মিথ্যা, সত্য অথবা মিথ্যা, নয় মিথ্যা)\n"),
        "মিথ্যা সত্য সত্য\n"
    );
}

#[test]
fn bengali_and_ascii_digits_mix() {
    assert_eq!(output_of("দেখাও(১২ + 30, ৭ / ২, ৭ % -২)\n"), "42 3.5 -1\n");
}

#[test]
fn factorial_by_recursion() {
    let source = "\
ফাংশন fact(n):
    যদি n <= 1:
        ফলাফল 1
    ফলাফল n * fact(n - 1)
দেখাও(fact(20))
";
    assert_eq!(output_of(source), "2432902008176640000\n");
}

#[test]
fn while_loop_with_early_return() {
    let source = "\
ফাংশন first_over(limit):
    i = 0
    যখন সত্য:
        যদি i * i > limit:
            ফলাফল i
        i = i + 1
দেখাও(first_over(50))
";
    assert_eq!(output_of(source), "8\n");
}

#[test]
fn type_of_names_every_tag() {
    let source = "\
ফাংশন f():
    ফলাফল
দেখাও(প্রকার(1), প্রকার(1.5), প্রকার(\"ক\"), প্রকার(সত্য), প্রকার(নিল), প্রকার(f), প্রকার(দেখাও))
";
    assert_eq!(
        output_of(source),
        "ইন্ট ফ্লোট স্ট্রিং বুলীয়ান নিল ফাংশন ফাংশন\n"
    );
}

#[test]
fn call_arguments_may_span_lines() {
    let source = "দেখাও(\n    1,\n    2\n)\n";
    assert_eq!(output_of(source), "1 2\n");
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let source = "# শুরু\n\nক = 1  # এক\n\n    # ইনডেন্ট করা মন্তব্য\nদেখাও(ক)\n";
    assert_eq!(output_of(source), "1\n");
}

#[test]
fn each_run_starts_with_fresh_globals() {
    let session = crate::common::session();
    let (first, _) = crate::common::run_in(&session, "ক = 1\n");
    first.unwrap();
    let (second, output) = crate::common::run_in(&session, "দেখাও(ক)\n");
    assert!(matches!(second, Err(bplc::Error::Runtime(_))));
    assert_eq!(output, "");
}
