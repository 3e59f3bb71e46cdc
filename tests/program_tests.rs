mod common;

use beatnik::lang::tokenizing::tokenize_from_source;
use beatnik::runtime::built_ins::terminal_words::ReaderInput;
use beatnik::runtime::data_structures::score_tables::CharacterScores;
use beatnik::runtime::error::ErrorKind;
use beatnik::runtime::interpreter::beatnik_interpreter::BeatnikInterpreter;
use beatnik::runtime::interpreter::{
    Interpreter, InterpreterOptions, InterpreterStack, ProgramCounter,
};
use common::{run_program, test_interpreter, xs, SharedOutput};
use test_case::test_case;

#[test_case("", &[]; "empty program")]
#[test_case("!!! ???", &[]; "no words at all")]
#[test_case("p x", &[1]; "push one")]
#[test_case("p xxx p xx s", &[1]; "three minus two")]
#[test_case("p xx p xxx a", &[5]; "two plus three")]
#[test_case("p x p xx w", &[2, 1]; "swap")]
#[test_case("p x q p x", &[1]; "quit stops the program")]
#[test_case("p _ p x", &[0, 1]; "zero scoring operand")]
#[test_case("xxxx p x xxxx", &[1]; "inert words are skipped")]
#[test_case("P, X!", &[1]; "case and punctuation are ignored")]
#[test_case("p _ f xx p xxx p xxxx q", &[4]; "forward branch skips words")]
#[test_case("p x f xx p xxx p xxxx q", &[3, 4]; "forward branch not taken")]
#[test_case("p x g x p xxx p xxxx", &[4]; "forward if non zero")]
fn final_stack(source: &str, expected: &[i64]) {
    let (stack, _) = run_program(source, "").unwrap();

    assert_eq!(stack, expected);
}

#[test_case("f", ErrorKind::ProgramCounterOutOfBounds; "branch without an operand")]
#[test_case("p x f", ErrorKind::ProgramCounterOutOfBounds; "operand fetched before the condition")]
#[test_case("f x", ErrorKind::StackUnderflow; "branch without a condition")]
#[test_case("p", ErrorKind::ProgramCounterOutOfBounds; "push without an operand")]
#[test_case("p _ f xxxxx q", ErrorKind::ProgramCounterOutOfBounds; "forward past the end")]
#[test_case("p x c xxxxx", ErrorKind::ProgramCounterOutOfBounds; "backward before the start")]
#[test_case("p x p xx s u", ErrorKind::InvalidCharacter; "negative output")]
#[test_case("o", ErrorKind::StackUnderflow; "pop an empty stack")]
#[test_case("i", ErrorKind::EndOfInput; "input with nothing to read")]
fn failing_programs(source: &str, kind: ErrorKind) {
    let error = run_program(source, "").unwrap_err();

    assert_eq!(error.kind(), kind);
}

#[test]
fn the_quit_example() {
    // Scores: p 5, x 2, q 17.  Push 2 then quit, the trailing words never run.
    let scores: CharacterScores = [('p', 5), ('x', 2), ('q', 17)].into_iter().collect();
    let mut interpreter = BeatnikInterpreter::with_io(
        InterpreterOptions::new().with_character_scores(scores),
        Box::new(ReaderInput::new(std::io::empty())),
        Box::new(std::io::sink()),
    );

    interpreter.run("p x q p x").unwrap();

    assert_eq!(interpreter.stack().elements(), &[2]);
    assert!(interpreter.is_halted());
}

#[test]
fn countdown_loop_prints_three_times() {
    let source = format!("p xxx p {} u p x s d c {} q", xs(65), xs(8));
    let (stack, output) = run_program(&source, "").unwrap();

    assert_eq!(output, "AAA");
    assert_eq!(stack, &[0]);
}

#[test]
fn backward_branch_restarts_at_the_sentinel() {
    // Echo input until a NUL, jumping back before the first word each time round.  The branch
    // pops the last copy of the NUL, so nothing is left behind.
    let (stack, output) = run_program("i d u c xxxx q", "hi\0").unwrap();

    assert_eq!(output, "hi\0");
    assert_eq!(stack, &[] as &[i64]);
}

#[test]
fn echo_unicode() {
    let (_, output) = run_program("i u i u", "é😀").unwrap();

    assert_eq!(output, "é😀");
}

#[test]
fn error_is_located_at_the_failing_word() {
    let error = run_program("p x\no o", "").unwrap_err();
    let location = error.location().clone().unwrap();

    assert_eq!(error.kind(), ErrorKind::StackUnderflow);
    assert_eq!(location.line(), 2);
    assert_eq!(location.column(), 3);
    assert!(error.to_string().starts_with("<program> (2, 3): "));
}

#[test]
fn arithmetic_overflow_fails_the_program() {
    let (mut interpreter, _) = test_interpreter(InterpreterOptions::new(), "");

    interpreter.load(tokenize_from_source("<test>", "a"));
    interpreter.push(i64::MAX).unwrap();
    interpreter.push(1).unwrap();

    let error = interpreter.dispatch().unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ArithmeticOverflow);
    assert_eq!(interpreter.stack().elements(), &[] as &[i64]);
}

#[test]
fn stack_depth_limit() {
    let options = InterpreterOptions::new().with_max_stack_depth(2);
    let (mut interpreter, _) = test_interpreter(options, "");

    let error = interpreter.run("p x p x p x").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::StackOverflow);
    assert_eq!(interpreter.stack().elements(), &[1, 1]);
    assert_eq!(interpreter.stack_max_depth(), 2);
}

#[test]
fn each_run_starts_fresh() {
    let (mut interpreter, _) = test_interpreter(InterpreterOptions::new(), "");

    interpreter.run("p xx q").unwrap();
    assert!(interpreter.is_halted());

    interpreter.run("p xxx").unwrap();

    assert_eq!(interpreter.stack().elements(), &[3]);
    assert!(!interpreter.is_halted());
}

#[test]
fn run_file_reads_the_script() {
    let path = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("program_tests_push.beatnik");

    std::fs::write(&path, "p\nxxxx\n").unwrap();

    let (mut interpreter, _) = test_interpreter(InterpreterOptions::new(), "");

    interpreter.run_file(&path.to_string_lossy()).unwrap();

    assert_eq!(interpreter.stack().elements(), &[4]);
}

#[test]
fn default_tables_print_hi() {
    // Scrabble scores: dog 5 push, zzzzzzzd 72, ahem 9 output, zzzzzzzzzzk 105.
    let output = SharedOutput::default();
    let mut interpreter = BeatnikInterpreter::with_io(
        InterpreterOptions::new(),
        Box::new(ReaderInput::new(std::io::empty())),
        Box::new(output.clone()),
    );

    interpreter
        .run("Dog zzzzzzzd, ahem.  Dog zzzzzzzzzzk, ahem!")
        .unwrap();

    assert_eq!(output.text(), "Hi");
    assert!(interpreter.stack().is_empty());
}
