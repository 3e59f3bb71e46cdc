use crate::{
    add_native_word,
    runtime::{data_structures::score_tables::Action, error, interpreter::Interpreter},
};

/// Consume the next word and push its score.
///
/// Signature: ` -- score`
fn word_push(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let score = interpreter.next_score()?;

    interpreter.push(score)
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_pop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop()?;
    let b = interpreter.pop()?;

    interpreter.push(a)?;
    interpreter.push(b)
}

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.peek()?;

    interpreter.push(value)
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        Action::Push,
        word_push,
        "Push the score of the next word, which is consumed.",
        " -- score"
    );

    add_native_word!(
        interpreter,
        Action::Pop,
        word_pop,
        "Discard the top value on the data stack.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        Action::Swap,
        word_swap,
        "Swap the top 2 values on the data stack.",
        "a b -- b a"
    );

    add_native_word!(
        interpreter,
        Action::Dup,
        word_dup,
        "Duplicate the top value on the data stack.",
        "value -- value value"
    );
}
