use crate::{
    add_native_word,
    runtime::{
        data_structures::score_tables::Action,
        error::{self, script_error, ErrorKind},
        interpreter::Interpreter,
    },
};

/// Which way a taken branch moves the program counter.
#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// The shared protocol of the four branch words.  The next word is always consumed as the
/// distance, then the condition is popped.  A taken forward branch skips `distance` more words.  A
/// taken backward branch retreats `distance + 1` words, so that the dispatch loop's own fetch
/// lands `distance` words before the operand.
fn branch(
    interpreter: &mut dyn Interpreter,
    direction: Direction,
    taken: fn(i64) -> bool,
) -> error::Result<()> {
    let distance = interpreter.next_score()?;
    let condition = interpreter.pop()?;

    if !taken(condition) {
        return Ok(());
    }

    let offset = match direction {
        Direction::Forward => Some(distance),
        Direction::Backward => distance.checked_neg().and_then(|n| n.checked_sub(1)),
    };

    match offset {
        Some(offset) => {
            let _ = interpreter.advance(offset)?;
            Ok(())
        }
        None => script_error(
            interpreter,
            ErrorKind::ArithmeticOverflow,
            format!("Branch distance {} overflows a 64 bit integer.", distance),
        ),
    }
}

/// Signature: `condition -- `
fn word_forward_if_zero(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    branch(interpreter, Direction::Forward, |condition| condition == 0)
}

/// Signature: `condition -- `
fn word_forward_if_non_zero(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    branch(interpreter, Direction::Forward, |condition| condition != 0)
}

/// Signature: `condition -- `
fn word_backward_if_zero(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    branch(interpreter, Direction::Backward, |condition| condition == 0)
}

/// Signature: `condition -- `
fn word_backward_if_non_zero(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    branch(interpreter, Direction::Backward, |condition| condition != 0)
}

/// Stop the program.  Nothing after this word is executed.
///
/// Signature: ` -- `
fn word_quit(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.halt();
    Ok(())
}

/// Register the words that move the program counter or stop the program.
pub fn register_branch_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        Action::ForwardIfZero,
        word_forward_if_zero,
        "Skip ahead by the next word's score if the top value is zero.",
        "condition -- "
    );

    add_native_word!(
        interpreter,
        Action::ForwardIfNonZero,
        word_forward_if_non_zero,
        "Skip ahead by the next word's score if the top value is not zero.",
        "condition -- "
    );

    add_native_word!(
        interpreter,
        Action::BackwardIfZero,
        word_backward_if_zero,
        "Go back by the next word's score if the top value is zero.",
        "condition -- "
    );

    add_native_word!(
        interpreter,
        Action::BackwardIfNonZero,
        word_backward_if_non_zero,
        "Go back by the next word's score if the top value is not zero.",
        "condition -- "
    );

    add_native_word!(
        interpreter,
        Action::Quit,
        word_quit,
        "Stop the program.",
        " -- "
    );
}
