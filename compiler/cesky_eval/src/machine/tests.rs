use super::*;
use crate::print_handler::silent_handler;
use cesky_reader::read_one;
use cesky_value::printer::write_string;
use cesky_value::EvalErrorKind;
use pretty_assertions::assert_eq;

fn machine() -> Machine {
    Machine::builder().print_handler(silent_handler()).build()
}

fn eval_in(machine: &mut Machine, src: &str) -> String {
    match machine.eval_str(src) {
        Ok(value) => write_string(&value),
        Err(err) => panic!("evaluation of {src:?} failed: {err}"),
    }
}

fn eval(src: &str) -> String {
    eval_in(&mut machine(), src)
}

fn eval_err(src: &str) -> EvalError {
    match machine().eval_str(src) {
        Ok(value) => panic!("expected an error from {src:?}, got {value:?}"),
        Err(err) => err,
    }
}

fn parse(src: &str) -> Value {
    match read_one(src) {
        Ok(value) => value,
        Err(err) => panic!("read failed: {err}"),
    }
}

// Core forms

#[test]
fn self_evaluating_values() {
    assert_eq!(eval("42"), "42");
    assert_eq!(eval("\"str\""), "\"str\"");
    assert_eq!(eval("#f"), "#f");
    assert_eq!(eval(""), "#<void>");
    assert_eq!(eval("()"), "()");
    assert_eq!(eval("(null? ())"), "#t");
}

#[test]
fn quote_returns_datum_unevaluated() {
    assert_eq!(eval("'(a (b) . c)"), "(a (b) . c)");
    assert_eq!(eval("(quote x)"), "x");
}

#[test]
fn only_false_is_false() {
    assert_eq!(eval("(if #f 1 2)"), "2");
    assert_eq!(eval("(if '() 1 2)"), "1");
    assert_eq!(eval("(if 0 1 2)"), "1");
}

#[test]
fn closures_capture_lexical_scope() {
    assert_eq!(
        eval("(let ([x 1]) (let ([f (lambda () x)]) (let ([x 2]) (f))))"),
        "1"
    );
}

#[test]
fn begin_evaluates_in_order() {
    assert_eq!(
        eval("(let ([c (cons 0 '())]) (begin (set-car! c 1) (set-car! c (+ (car c) 10)) (car c)))"),
        "11"
    );
}

#[test]
fn multi_form_lambda_body() {
    assert_eq!(
        eval("(let ([c (cons 0 '())]) ((lambda () (set-car! c 5) (car c))))"),
        "5"
    );
}

#[test]
fn define_binds_at_top_level() {
    let mut m = machine();
    assert_eq!(eval_in(&mut m, "(define x 10)"), "#<void>");
    assert_eq!(eval_in(&mut m, "(+ x 1)"), "11");
    assert_eq!(eval_in(&mut m, "(define (add a b) (+ a b)) (add x 5)"), "15");
    assert_eq!(eval_in(&mut m, "add"), "#<procedure:add>");
}

#[test]
fn rest_formals() {
    assert_eq!(eval("((lambda (a . rest) rest) 1 2 3)"), "(2 3)");
    assert_eq!(eval("((lambda args args) 1 2)"), "(1 2)");
    assert_eq!(eval("((lambda args args))"), "()");
}

#[test]
fn lambda_name_string() {
    assert_eq!(eval("(lambda (x) \"square\" (* x x))"), "#<procedure:square>");
    assert_eq!(eval("((lambda (x) \"square\" (* x x)) 7)"), "49");
    // A lone string is the body, not a name.
    assert_eq!(eval("((lambda () \"hello\"))"), "\"hello\"");
}

#[test]
fn keywords_cannot_be_shadowed() {
    assert_eq!(eval("(let ([if 5]) (if #t 1 2))"), "1");
}

// Errors

#[test]
fn malformed_special_forms() {
    for src in [
        "(if 1 2)",
        "(quote)",
        "(lambda (x x) x)",
        "(lambda (1) 1)",
        "(lambda (x))",
        "(let ([x 1] [y 2]) x)",
        "(let ([x 1]))",
        "(begin)",
        "(define)",
        "(+ 1 . 2)",
    ] {
        assert_eq!(
            eval_err(src).kind,
            EvalErrorKind::MalformedSpecialForm,
            "{src}"
        );
    }
}

#[test]
fn unbound_variable() {
    let err = eval_err("nope");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnboundVariable {
            name: "nope".to_string()
        }
    );
}

#[test]
fn quasiquote_is_not_special() {
    let err = eval_err("`(a ,b)");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnboundVariable {
            name: "quasiquote".to_string()
        }
    );
}

#[test]
fn applying_a_non_procedure() {
    assert_eq!(eval_err("(1 2)").kind, EvalErrorKind::NotAProcedure);
    assert_eq!(eval_err("(\"f\")").kind, EvalErrorKind::NotAProcedure);
}

#[test]
fn closure_arity_errors() {
    assert_eq!(
        eval_err("((lambda (x y) x) 1)").kind,
        EvalErrorKind::ArityMismatch {
            expected: "2".to_string(),
            got: 1
        }
    );
    assert_eq!(
        eval_err("((lambda (x) x) 1 2)").kind,
        EvalErrorKind::ArityMismatch {
            expected: "1".to_string(),
            got: 2
        }
    );
    assert_eq!(
        eval_err("((lambda (x . r) x))").kind,
        EvalErrorKind::ArityMismatch {
            expected: "at least 1".to_string(),
            got: 0
        }
    );
}

#[test]
fn primitive_arity_errors() {
    assert_eq!(
        eval_err("(car)").kind,
        EvalErrorKind::ArityMismatch {
            expected: "1".to_string(),
            got: 0
        }
    );
    assert_eq!(
        eval_err("(substring \"abc\")").kind,
        EvalErrorKind::ArityMismatch {
            expected: "2 to 3".to_string(),
            got: 1
        }
    );
}

#[test]
fn error_discards_machine_state() {
    let mut m = machine();
    assert!(m
        .eval_str("(call/prompt (lambda () (car 1)) 'p)")
        .is_err());
    assert_eq!(m.meta_depth(), 0);
    assert_eq!(m.kont_depth(), 0);
    assert_eq!(eval_in(&mut m, "(+ 1 2)"), "3");
}

#[test]
fn definitions_before_an_error_persist() {
    let mut m = machine();
    assert!(m.eval_str("(define a 1) (car a)").is_err());
    assert_eq!(eval_in(&mut m, "a"), "1");
}

// Control operators

#[test]
fn apply_spreads_list() {
    assert_eq!(eval("(apply + '(1 2 3))"), "6");
    assert_eq!(eval("(apply apply (list + '(1 2)))"), "3");
    assert_eq!(eval("(apply (lambda args args) '())"), "()");
    assert!(matches!(
        eval_err("(apply + 5)").kind,
        EvalErrorKind::TypeError { .. }
    ));
}

#[test]
fn call_cc_escape() {
    assert_eq!(eval("(call/cc (lambda (k) (+ 1 (k 42))))"), "42");
    assert_eq!(eval("(+ 1 (call/cc (lambda (k) 10)))"), "11");
}

#[test]
fn call_cc_reentry() {
    let src = "(let ([cell (cons 0 '())])
                 (let ([v (call/cc (lambda (k) (begin (set-cdr! cell k) 1)))])
                   (begin
                     (set-car! cell (+ (car cell) v))
                     (if (< (car cell) 10)
                         ((cdr cell) (car cell))
                         (car cell)))))";
    assert_eq!(eval(src), "16");
}

#[test]
fn top_level_continuation_reentered_from_later_forms() {
    let mut m = machine();
    eval_in(&mut m, "(define cell (cons #f '()))");
    assert_eq!(
        eval_in(
            &mut m,
            "(+ 100 (call/cc (lambda (k) (begin (set-car! cell k) 1))))"
        ),
        "101"
    );
    // The captured continuation ends at its own top-level form, so the
    // surrounding context of the invoking form is discarded.
    assert_eq!(eval_in(&mut m, "((car cell) 5)"), "105");
    assert_eq!(eval_in(&mut m, "(list 'ignored ((car cell) 7))"), "107");
    assert_eq!(m.meta_depth(), 0);
}

#[test]
fn continuation_takes_one_argument() {
    assert_eq!(
        eval_err("(call/cc (lambda (k) (k 1 2)))").kind,
        EvalErrorKind::ArityMismatch {
            expected: "1".to_string(),
            got: 2
        }
    );
}

#[test]
fn call_prompt_returns_thunk_value() {
    assert_eq!(eval("(call/prompt (lambda () 10) 'tag)"), "10");
    assert_eq!(eval("(+ 1 (call/prompt (lambda () (+ 2 3)) 'tag))"), "6");
}

#[test]
fn continuation_captured_in_prompt_resumes_in_new_prompt() {
    let mut m = machine();
    eval_in(&mut m, "(define box (cons #f '()))");
    assert_eq!(
        eval_in(
            &mut m,
            "(+ 100 (call/prompt (lambda () (+ 1 (call/cc (lambda (k) (begin (set-car! box k) 1))))) 'p))"
        ),
        "102"
    );
    assert_eq!(
        eval_in(&mut m, "(+ 1000 (call/prompt (lambda () ((car box) 10)) 'p))"),
        "1011"
    );
    assert_eq!(m.meta_depth(), 0);
}

#[test]
fn prompt_availability() {
    assert_eq!(eval("(continuation-prompt-available? 'p)"), "#f");
    assert_eq!(
        eval("(call/prompt (lambda () (continuation-prompt-available? 'p)) 'p)"),
        "#t"
    );
    assert_eq!(
        eval("(call/prompt (lambda () (continuation-prompt-available? 'q)) 'p)"),
        "#f"
    );
    let nested = |query: &str| {
        eval(&format!(
            "(call/prompt (lambda () (call/prompt (lambda () (continuation-prompt-available? '{query})) 'inner)) 'outer)"
        ))
    };
    assert_eq!(nested("inner"), "#t");
    assert_eq!(nested("outer"), "#f");
}

#[test]
fn prompt_query_leaves_meta_stack_alone() {
    let mut m = machine();
    m.inject(parse(
        "(call/prompt (lambda () (begin (continuation-prompt-available? 'p) (continuation-prompt-available? 'p))) 'p)",
    ));
    let mut depths = Vec::new();
    loop {
        match m.advance() {
            Ok(Status::Running) => depths.push(m.meta_depth()),
            Ok(Status::Halted(value)) => {
                assert_eq!(write_string(&value), "#t");
                break;
            }
            Err(err) => panic!("{err}"),
        }
    }
    assert_eq!(depths.iter().max(), Some(&1));
    assert_eq!(m.meta_depth(), 0);
}

#[test]
fn prompt_tag_must_be_symbol() {
    assert_eq!(
        eval_err("(call/prompt (lambda () 1) \"tag\")").kind,
        EvalErrorKind::CycleOrProtocolError
    );
    assert_eq!(
        eval_err("(continuation-prompt-available? 5)").kind,
        EvalErrorKind::CycleOrProtocolError
    );
}

#[test]
fn kernel_eval_uses_fresh_environment() {
    assert_eq!(eval("(kernel-eval '(+ 1 2))"), "3");
    assert_eq!(
        eval_err("(let ([local 5]) (kernel-eval 'local))").kind,
        EvalErrorKind::UnboundVariable {
            name: "local".to_string()
        }
    );
    assert_eq!(
        eval("(+ 1 (kernel-eval '(call/cc (lambda (k) (k 41)))))"),
        "42"
    );
}

// Machine API

#[test]
fn single_stepping_reaches_halt() {
    let mut m = machine();
    m.inject(parse("(+ 1 2)"));
    assert!(matches!(m.control(), Control::Eval(_)));
    let mut steps = 0;
    let value = loop {
        steps += 1;
        match m.advance() {
            Ok(Status::Running) => {}
            Ok(Status::Halted(value)) => break value,
            Err(err) => panic!("{err}"),
        }
    };
    assert_eq!(write_string(&value), "3");
    assert!(steps > 4);
}

#[test]
fn fuel_limits_steps() {
    let mut m = Machine::builder()
        .print_handler(silent_handler())
        .fuel(10_000)
        .build();
    let err = match m.eval_str("(define (spin) (spin)) (spin)") {
        Ok(value) => panic!("expected the step limit, got {value:?}"),
        Err(err) => err,
    };
    assert_eq!(err.kind, EvalErrorKind::StepLimitExceeded { limit: 10_000 });
    assert_eq!(eval_in(&mut m, "(+ 2 2)"), "4");
}

#[test]
fn reset_top_level_forgets_definitions() {
    let mut m = machine();
    eval_in(&mut m, "(define x 1) (define car 5)");
    m.reset_top_level();
    assert!(m.top_level_get(Symbol::intern("x")).is_none());
    assert_eq!(eval_in(&mut m, "(car '(9))"), "9");
}

#[test]
fn define_from_host() {
    let mut m = machine();
    m.define(Symbol::intern("answer"), Value::Number(42.0));
    assert_eq!(eval_in(&mut m, "answer"), "42");
}
