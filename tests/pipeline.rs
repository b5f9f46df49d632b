//! End-to-end checks of the compiler pipeline through `gatec::compile`.

use gatec::{
    CompileFailure, CompileResult, Compilation, Stage, compile,
    frontend::ast::Category,
    middle::{optimization::optimize, quad::QuadOperator},
};
use indoc::indoc;

fn success(source: &str) -> Compilation {
    match compile(source) {
        CompileResult::Success(compilation) => *compilation,
        CompileResult::Failure(failure) => panic!("expected success, got {failure:?}"),
    }
}

fn failure(source: &str) -> CompileFailure {
    match compile(source) {
        CompileResult::Success(_) => panic!("expected failure"),
        CompileResult::Failure(failure) => failure,
    }
}

#[test]
fn half_adder_on_one_line() {
    let compilation = success(
        "CIRCUIT HalfAdder { INPUT A,B; OUTPUT Sum,Carry; Sum=XOR(A,B); Carry=AND(A,B); }",
    );

    let table = compilation.truth_table();

    assert_eq!(table.inputs, ["A", "B"]);
    assert_eq!(table.outputs, ["Sum", "Carry"]);

    let rows = table
        .rows
        .iter()
        .map(|row| (row.inputs.clone(), row.outputs.clone()))
        .collect::<Vec<_>>();

    assert_eq!(
        rows,
        vec![
            (vec![false, false], vec![false, false]),
            (vec![false, true], vec![true, false]),
            (vec![true, false], vec![true, false]),
            (vec![true, true], vec![false, true]),
        ]
    );

    let code = &compilation.generated_code;
    assert!(code.contains("# Circuit: HalfAdder"));
    assert!(code.contains("def simulate(s_A, s_B):"));
    assert!(code.contains("return (s_Sum, s_Carry)"));
    assert!(code.contains("for vector in range(2 ** INPUT_COUNT):"));
}

#[test]
fn self_loop_is_a_semantic_error() {
    let failure = failure("CIRCUIT C { WIRE A; A = NOT(A); }");

    assert_eq!(failure.stage, Stage::Semantic);
    assert!(failure.diagnostics.iter().any(|d| d.contains("'A'")));
}

#[test]
fn longer_cycle_names_the_back_edge() {
    let failure = failure(indoc! {"
        CIRCUIT Loop {
            INPUT X;
            OUTPUT Y;
            WIRE P, Q;
            P = AND(X, Q);
            Q = OR(P, X);
            Y = NOT(Q);
        }
    "});

    assert_eq!(failure.stage, Stage::Semantic);
    assert_eq!(failure.diagnostics.len(), 1);
    assert!(failure.diagnostics[0].contains("cycle"));
}

#[test]
fn unused_wire_is_eliminated() {
    let compilation = success(indoc! {"
        CIRCUIT Dead {
            INPUT A, B;
            OUTPUT Z;
            WIRE Unused;
            Unused = NAND(A, B);
            Z = AND(A, B);
        }
    "});

    assert!(compilation.quads.iter().any(|q| q.result == "Unused"));
    assert!(!compilation.optimized_quads.iter().any(|q| q.result == "Unused"));
    assert!(!compilation.generated_code.contains("(NAND, A, B, Unused)"));
}

#[test]
fn optimizer_is_idempotent_on_its_output() {
    let compilation = success(indoc! {"
        CIRCUIT Mixed {
            INPUT A, B;
            OUTPUT Z, Y, X;
            WIRE T, Dead;
            T = OR(A, 0);
            Dead = XOR(A, B);
            Z = AND(0, T);
            Y = OR(1, B);
            X = AND(T, B);
        }
    "});

    let once = &compilation.optimized_quads;
    let twice = optimize(once, &compilation.symbol_table);

    assert_eq!(&twice, once);
}

#[test]
fn constant_rules_rewrite_to_assign() {
    let compilation = success(indoc! {"
        CIRCUIT Consts {
            INPUT A;
            OUTPUT Zero, One, Same;
            Zero = AND(0, A);
            One = OR(1, A);
            Same = OR(A, 0);
        }
    "});

    assert!(
        compilation
            .optimized_quads
            .iter()
            .all(|quad| quad.operator == QuadOperator::Assign)
    );

    let table = compilation.truth_table();
    for row in &table.rows {
        assert_eq!(row.outputs, [false, true, row.inputs[0]]);
    }
}

#[test]
fn arity_errors_name_the_expected_count() {
    let failure = failure(indoc! {"
        CIRCUIT Bad {
            INPUT A, B;
            OUTPUT Z, Y;
            Z = NOT(A, B);
            Y = AND(A);
        }
    "});

    assert_eq!(failure.stage, Stage::Semantic);
    assert_eq!(failure.diagnostics.len(), 2);
    assert!(failure.diagnostics[0].contains("requires 1 input"));
    assert!(failure.diagnostics[1].contains("requires 2 input"));
}

#[test]
fn implicit_wire_is_registered() {
    let compilation = success(indoc! {"
        CIRCUIT Implicit {
            INPUT A;
            OUTPUT Z;
            T = NOT(A);
            Z = NOT(T);
        }
    "});

    let info = compilation.symbol_table.get("T").unwrap();
    assert_eq!(info.category, Category::Wire);
    assert!(info.defined);
}

#[test]
fn no_inputs_runs_once() {
    let compilation = success(indoc! {"
        CIRCUIT Const {
            OUTPUT One;
            One = OR(1, 1);
        }
    "});

    let table = compilation.truth_table();

    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].outputs, [true]);
    assert!(compilation.generated_code.contains("INPUT_COUNT = 0"));
}

#[test]
fn declaration_after_gate_is_a_syntax_error() {
    let failure = failure(indoc! {"
        CIRCUIT Late {
            INPUT A;
            OUTPUT Z;
            Z = NOT(A);
            WIRE W;
        }
    "});

    assert_eq!(failure.stage, Stage::Syntax);
    assert_eq!(failure.location, Some((5, 5)));
}

#[test]
fn nested_gate_suggests_a_wire() {
    let failure = failure("CIRCUIT N { INPUT A, B; OUTPUT Z; Z = NOT(AND(A, B)); }");

    assert_eq!(failure.stage, Stage::Syntax);
    assert!(failure.diagnostics[0].contains("WIRE"));
}

#[test]
fn unknown_character_is_lexical() {
    let failure = failure("CIRCUIT C {\n    INPUT A;\n    OUTPUT Z;\n    Z = A + A;\n}");

    assert_eq!(failure.stage, Stage::Lexical);
    assert_eq!(failure.location, Some((4, 11)));
}

#[test]
fn comments_are_ignored() {
    let compilation = success(indoc! {"
        // a buffer
        CIRCUIT Buffer {
            INPUT A; // the only input
            OUTPUT Z;
            Z = OR(A, 0);
        }
    "});

    assert_eq!(compilation.tokens.first().unwrap().text, "CIRCUIT");
    assert_eq!(compilation.tokens.first().unwrap().line, 2);
}

#[test]
fn multi_digit_literal_is_lexical() {
    let failure = failure("CIRCUIT C {\n    INPUT A;\n    OUTPUT Z;\n    Z = AND(10, A);\n}");

    assert_eq!(failure.stage, Stage::Lexical);
    assert_eq!(failure.location, Some((4, 13)));
    assert!(failure.diagnostics[0].contains("`10`"));
}
