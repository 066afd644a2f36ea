use std::collections::VecDeque;

use brainstep::{Interpreter, InterpreterError};
use proptest::prelude::*;

type TestInterpreter = Interpreter<VecDeque<char>, String>;

fn interpreter(size: usize) -> TestInterpreter {
    Interpreter::new(size, VecDeque::new(), String::new()).unwrap()
}

#[test]
fn prints_hi() {
    let mut interp = interpreter(5);
    interp.run("++++[>+++++<-]>[<+++++>-]<++++.+.").unwrap();
    assert_eq!(interp.output(), "hi");
    assert_eq!(interp.tape(), &[105, 0, 0, 0, 0]);
}

#[test]
fn nested_loops_multiply() {
    // 3 * (2 * 4) into cell 2
    let mut interp = interpreter(3);
    interp.run("+++[>++[>++++<-]<-]").unwrap();
    assert_eq!(interp.tape(), &[0, 0, 24]);
    assert_eq!(interp.instruction_pointer(), interp.code().len());
}

#[test]
fn nested_loop_skipped_entirely_when_zero() {
    let mut interp = interpreter(2);
    interp.run("[>+[>+<-]<]+").unwrap();
    assert_eq!(interp.tape(), &[1, 0]);
}

#[test]
fn hello_world() {
    let source = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    let mut interp = interpreter(10);
    interp.run(source).unwrap();
    assert_eq!(interp.output(), "Hello World!\n");
}

#[test]
fn echoes_input_until_exhausted() {
    let mut interp: TestInterpreter =
        Interpreter::new(1, "cat".chars().collect(), String::new()).unwrap();
    interp.run(",[.,]").unwrap();
    assert_eq!(interp.output(), "cat");
    assert_eq!(interp.tape(), &[0]);
}

#[test]
fn demo_prints_ascii_range() {
    let mut interp = interpreter(4);
    interp.run(include_str!("../demos/print_ascii.bf")).unwrap();
    let expected: String = (48u8..128).map(char::from).collect();
    assert_eq!(interp.output(), &expected);
    assert_eq!(interp.tape(), &[0, 128, 0, 80]);
}

#[test]
fn same_instance_runs_independent_programs() {
    let mut interp = interpreter(2);
    interp.run("+++>+").unwrap();
    interp.reset(3).unwrap();
    interp.run("++").unwrap();
    assert_eq!(interp.tape(), &[2, 0, 0]);
}

#[test]
fn unmatched_bracket_only_fails_when_jumped_to() {
    // the cell is non-zero so the body is entered and the run simply ends,
    // the missing `]` is never looked for
    let mut interp = interpreter(2);
    interp.run("+.[").unwrap();

    let mut interp = interpreter(2);
    assert!(matches!(
        interp.run(">[+"),
        Err(InterpreterError::UnmatchedBracket { symbol: '[', position: 1, .. })
    ));
}

proptest! {
    #[test]
    fn clear_loop_runs_once_per_unit(v in 0u8..=255) {
        let mut interp = interpreter(1);
        interp.run(&"+".repeat(v as usize)).unwrap();
        interp.run("[-]").unwrap();
        prop_assert_eq!(interp.tape(), &[0]);
        prop_assert_eq!(interp.instruction_pointer(), 3);
        // `[ - ]` once per pass, a zero cell only visits the brackets
        let expected = if v == 0 { 2 } else { 3 * v as u64 };
        prop_assert_eq!(interp.steps(), expected);
    }

    #[test]
    fn increments_then_decrements_round_trip(start in 0u8..=255, n in 0usize..600) {
        let mut interp = interpreter(1);
        interp.run(&"+".repeat(start as usize)).unwrap();
        interp.run(&"+".repeat(n)).unwrap();
        interp.run(&"-".repeat(n)).unwrap();
        prop_assert_eq!(interp.tape(), &[start]);
    }
}
