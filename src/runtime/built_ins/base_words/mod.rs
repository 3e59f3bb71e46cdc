/// Words that do arithmetic on the data stack.
mod simple_arithmetic_words;

/// Words that manipulate the data stack.
mod stack_words;

/// Words that move the program counter, or stop the program.
mod branch_words;

use crate::runtime::{
    built_ins::base_words::{
        branch_words::register_branch_words,
        simple_arithmetic_words::register_simple_arithmetic_words,
        stack_words::register_stack_words,
    },
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language.  The character input and output
/// words live with the terminal words.
pub fn register_base_words(interpreter: &mut dyn Interpreter) {
    register_stack_words(interpreter);
    register_simple_arithmetic_words(interpreter);
    register_branch_words(interpreter);
}
