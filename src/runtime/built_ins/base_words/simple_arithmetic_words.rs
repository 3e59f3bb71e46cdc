use crate::add_native_word;
use crate::runtime::data_structures::score_tables::Action;
use crate::runtime::error::{self, script_error, ErrorKind};
use crate::runtime::interpreter::Interpreter;

/// Push the result of a checked operation, or raise an overflow naming the operands.
fn push_checked(
    interpreter: &mut dyn Interpreter,
    result: Option<i64>,
    operation: &str,
    a: i64,
    b: i64,
) -> error::Result<()> {
    match result {
        Some(value) => interpreter.push(value),
        None => script_error(
            interpreter,
            ErrorKind::ArithmeticOverflow,
            format!("{} {} {} overflows a 64 bit integer.", a, operation, b),
        ),
    }
}

pub fn register_simple_arithmetic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        Action::Add,
        |interp: &mut dyn Interpreter| {
            let b = interp.pop()?;
            let a = interp.pop()?;
            push_checked(interp, a.checked_add(b), "+", a, b)
        },
        "Replace the top two values with their sum.",
        "n1 n2 -- n"
    );

    // The top of the stack is subtracted from the value beneath it.
    add_native_word!(
        interpreter,
        Action::Subtract,
        |interp: &mut dyn Interpreter| {
            let x = interp.pop()?;
            let y = interp.pop()?;
            push_checked(interp, y.checked_sub(x), "-", y, x)
        },
        "Replace the top two values with y - x.",
        "y x -- n"
    );
}
