// Shared helpers for the integration tests.  Each test file pulls in only what it needs.
#![allow(dead_code)]

use beatnik::runtime::built_ins::terminal_words::ReaderInput;
use beatnik::runtime::data_structures::score_tables::CharacterScores;
use beatnik::runtime::error::Result;
use beatnik::runtime::interpreter::beatnik_interpreter::BeatnikInterpreter;
use beatnik::runtime::interpreter::{Interpreter, InterpreterOptions, InterpreterStack};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// An output sink the test keeps a handle to after giving the interpreter its copy.
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).to_string()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One letter per action so programs read as instruction listings, plus `x` worth 1 for operands.
///
/// p push, o pop, a add, i input, u output, s subtract, w swap, d dup, f fz, g fnz, b bz, c bnz,
/// q quit.
pub fn test_scores() -> CharacterScores {
    [
        ('p', 5),
        ('o', 6),
        ('a', 7),
        ('i', 8),
        ('u', 9),
        ('s', 10),
        ('w', 11),
        ('d', 12),
        ('f', 13),
        ('g', 14),
        ('b', 15),
        ('c', 16),
        ('q', 17),
        ('x', 1),
    ]
    .into_iter()
    .collect()
}

/// An operand word of `n` x's, scoring `n`.
pub fn xs(n: usize) -> String {
    "x".repeat(n)
}

/// An interpreter on the test table with canned input and captured output.
pub fn test_interpreter(options: InterpreterOptions, input: &str) -> (BeatnikInterpreter, SharedOutput) {
    let output = SharedOutput::default();
    let interpreter = BeatnikInterpreter::with_io(
        options.with_character_scores(test_scores()),
        Box::new(ReaderInput::new(io::Cursor::new(input.as_bytes().to_vec()))),
        Box::new(output.clone()),
    );

    (interpreter, output)
}

/// Run a program on the test table and hand back the final stack and everything it wrote.
pub fn run_program(source: &str, input: &str) -> Result<(Vec<i64>, String)> {
    let (mut interpreter, output) = test_interpreter(InterpreterOptions::new(), input);

    interpreter.run(source)?;

    Ok((interpreter.stack().elements().to_vec(), output.text()))
}
