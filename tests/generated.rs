//! Runs the emitted Python and C programs and compares their output with the
//! reference truth table. Each check is skipped when its toolchain is missing.

use std::fs;
use std::path::Path;
use std::process::Command;

use gatec::{CompileOptions, CompileResult, Compilation, backend::Target, compile_with};
use indoc::indoc;
use proptest::prelude::*;
use tempfile::TempDir;

mod common;

use common::circuit;

const HALF_ADDER: &str = indoc! {"
    CIRCUIT HalfAdder {
        INPUT A, B;
        OUTPUT Sum, Carry;
        Sum = XOR(A, B);
        Carry = AND(A, B);
    }
"};

fn tool_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

fn compile_for(source: &str, target: Target) -> Compilation {
    let options = CompileOptions {
        target,
        ..CompileOptions::default()
    };

    match compile_with(source, &options) {
        CompileResult::Success(compilation) => *compilation,
        CompileResult::Failure(failure) => panic!("expected success, got {failure:?}"),
    }
}

fn stdout_of(command: &mut Command, code: &str) -> String {
    let output = command.output().expect("Failed to start process");

    assert!(
        output.status.success(),
        "stderr: {}\n{code}",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("Output should be UTF-8")
}

// Helper function to write generated code into a fresh temporary directory
fn create_program_file(file_name: &str, code: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join(file_name);
    fs::write(&file_path, code).expect("Failed to write program");
    (temp_dir, file_path)
}

fn run_python(code: &str) -> String {
    let (_temp_dir, script) = create_program_file("simulation.py", code);

    stdout_of(Command::new("python3").arg(&script), code)
}

fn run_c(code: &str) -> String {
    let (temp_dir, source) = create_program_file("simulation.c", code);
    let executable = temp_dir.path().join("simulation");

    compile_c(&source, &executable, code);

    stdout_of(&mut Command::new(&executable), code)
}

fn compile_c(source: &Path, executable: &Path, code: &str) {
    let output = Command::new("cc")
        .arg("-o")
        .arg(executable)
        .arg(source)
        .output()
        .expect("Failed to start cc");

    assert!(
        output.status.success(),
        "cc failed: {}\n{code}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Checks every available target against the reference table
fn assert_targets_agree(source: &str) {
    if tool_available("python3") {
        let compilation = compile_for(source, Target::Python);
        let expected = compilation.truth_table().to_string();

        assert_eq!(run_python(&compilation.generated_code), expected);
    }

    if tool_available("cc") {
        let compilation = compile_for(source, Target::C);
        let expected = compilation.truth_table().to_string();

        assert_eq!(run_c(&compilation.generated_code), expected);
    }
}

#[test]
fn half_adder() {
    assert_targets_agree(HALF_ADDER);
}

#[test]
fn no_inputs_prints_one_row() {
    assert_targets_agree(indoc! {"
        CIRCUIT Const {
            OUTPUT One;
            One = OR(1, 1);
        }
    "});
}

#[test]
fn undriven_wire_reads_zero() {
    assert_targets_agree(indoc! {"
        CIRCUIT Undriven {
            INPUT A;
            OUTPUT Z;
            WIRE w;
            Z = AND(A, w);
        }
    "});
}

#[test]
fn wire_read_before_it_is_driven() {
    assert_targets_agree(indoc! {"
        CIRCUIT Late {
            INPUT A;
            OUTPUT Z;
            WIRE t;
            Z = NOT(t);
            t = NOT(A);
        }
    "});
}

#[test]
fn output_read_before_it_is_driven() {
    assert_targets_agree(indoc! {"
        CIRCUIT Feedforward {
            INPUT A;
            OUTPUT Y, Z;
            Z = OR(Y, A);
            Y = NOT(A);
        }
    "});
}

#[test]
fn signals_named_like_keywords_and_driver_variables() {
    assert_targets_agree(indoc! {"
        CIRCUIT Names {
            INPUT pass, vector, int;
            OUTPUT bits, result, main;
            WIRE simulate, INPUT_COUNT, printf;
            simulate = AND(pass, vector);
            INPUT_COUNT = OR(simulate, int);
            printf = NOT(INPUT_COUNT);
            bits = XOR(printf, vector);
            result = NAND(pass, int);
            main = NOR(bits, result);
        }
    "});
}

#[test]
fn unoptimized_output_matches_too() {
    let options = CompileOptions {
        target: Target::Python,
        optimize: false,
    };

    let CompileResult::Success(compilation) = compile_with(HALF_ADDER, &options) else {
        panic!("expected success");
    };

    if tool_available("python3") {
        assert_eq!(
            run_python(&compilation.generated_code),
            compilation.truth_table().to_string()
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn generated_circuits_run_like_the_reference((_, source) in circuit()) {
        assert_targets_agree(&source);
    }
}
