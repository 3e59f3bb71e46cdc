use crate::{
    lang::{
        source_buffer::SourceLocation,
        tokenizing::{Word, WordList},
    },
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            score_tables::{
                Action, ActionScores, CharacterScores, DEFAULT_ACTION_SCORES,
                DEFAULT_CHARACTER_SCORES,
            },
            value_stack::ValueStack,
        },
        error,
    },
};
use std::{rc::Rc, sync::Arc};

pub mod beatnik_interpreter;

/// What the dispatch loop should do after a single step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dispatch {
    /// Fetch and execute the next word.
    Continue,

    /// The program quit or ran out of words.
    Stop,
}

/// Construction options for an interpreter.  Anything left as `None` falls back to the built in
/// default.
#[derive(Clone, Default, Debug)]
pub struct InterpreterOptions {
    /// Points per letter, the Scrabble distribution by default.
    pub character_scores: Option<Arc<CharacterScores>>,

    /// Score to action bindings, 5 through 17 by default.
    pub action_scores: Option<Arc<ActionScores>>,

    /// Maximum depth of the data stack, unlimited by default.
    pub max_stack_depth: Option<usize>,
}

impl InterpreterOptions {
    pub fn new() -> InterpreterOptions {
        InterpreterOptions::default()
    }

    pub fn with_character_scores(mut self, scores: CharacterScores) -> InterpreterOptions {
        self.character_scores = Some(Arc::new(scores));
        self
    }

    pub fn with_action_scores(mut self, scores: ActionScores) -> InterpreterOptions {
        self.action_scores = Some(Arc::new(scores));
        self
    }

    pub fn with_max_stack_depth(mut self, depth: usize) -> InterpreterOptions {
        self.max_stack_depth = Some(depth);
        self
    }

    /// The character table to use, shared with every other interpreter using the same table.
    pub fn resolved_character_scores(&self) -> Arc<CharacterScores> {
        self.character_scores
            .clone()
            .unwrap_or_else(|| DEFAULT_CHARACTER_SCORES.clone())
    }

    /// The action table to use, shared with every other interpreter using the same table.
    pub fn resolved_action_scores(&self) -> Arc<ActionScores> {
        self.action_scores
            .clone()
            .unwrap_or_else(|| DEFAULT_ACTION_SCORES.clone())
    }
}

/// Trait for managing the interpreter's data stack.  Intended to be called by the native words.
///
/// Errors coming out of these methods are located at the word being executed.
pub trait InterpreterStack {
    /// What has the maximum depth the stack as reached so far in this run?
    fn stack_max_depth(&self) -> usize;

    /// Use to examine the full data stack.
    fn stack(&self) -> &ValueStack;

    /// Push a value onto the stack.  Only fails if a depth limit was configured and reached.
    fn push(&mut self, value: i64) -> error::Result<()>;

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<i64>;

    /// Read the top value without removing it.  If the stack is empty a stack underflow error is
    /// returned.
    fn peek(&self) -> error::Result<i64>;
}

/// Trait for managing the position of execution within the loaded program.
pub trait ProgramCounter {
    /// The words of the loaded program.
    fn words(&self) -> &WordList;

    /// Index of the word last fetched.  -1 means execution is before the first word.
    fn index(&self) -> i64;

    /// The word the program counter is on, if it is on one.
    fn current_word(&self) -> Option<&Word>;

    /// Replace the loaded program and move the program counter before its first word.  The stack
    /// is left alone.
    fn load(&mut self, words: WordList);

    /// Move the program counter by `offset` words and return the score of the word it lands on.
    ///
    /// Landing past the last word, or before the start position of -1, is a
    /// ProgramCounterOutOfBounds error.  Landing on -1 itself scores 0.
    fn advance(&mut self, offset: i64) -> error::Result<i64>;

    /// Fetch the next word's score.  This is how operations consume operand words.
    fn next_score(&mut self) -> error::Result<i64> {
        self.advance(1)
    }

    /// Ask the dispatch loop to stop after the current word.
    fn halt(&mut self);

    /// Has the current program been asked to stop?
    fn is_halted(&self) -> bool;
}

/// Trait for the single character input and output of the language.
pub trait CharacterIo {
    /// Block until one character is available.  `None` means the input is exhausted.
    fn read_char(&mut self) -> error::Result<Option<char>>;

    /// Write one character to the output and flush it.
    fn write_char(&mut self, character: char) -> error::Result<()>;
}

/// Trait for managing the native words of the interpreter.
pub trait WordManagement {
    /// Register a native word as the implementation of an action.
    fn add_word(
        &mut self,
        action: Action,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    );

    /// Find the word implementing an action.
    fn find_word(&self, action: Action) -> Option<&WordInfo>;

    /// Access the full dictionary.
    fn dictionary(&self) -> &Dictionary;
}

/// The full interpreter interface, as seen by the native words and by the program builder.
pub trait Interpreter: InterpreterStack + ProgramCounter + CharacterIo + WordManagement {
    /// The location of the word currently being executed, if any.
    fn current_location(&self) -> Option<SourceLocation>;

    /// Score a word under this interpreter's character table.
    fn score(&self, word: &str) -> i64;

    fn character_scores(&self) -> &CharacterScores;

    fn action_scores(&self) -> &ActionScores;

    /// Fetch the next word and execute it.  Returns Stop at the end of the program or after a
    /// quit.
    fn dispatch(&mut self) -> error::Result<Dispatch>;

    /// Tokenize and run a program to completion.  The stack is cleared first.
    fn run(&mut self, source: &str) -> error::Result<()>;

    /// Tokenize and run a script file to completion.  The stack is cleared first.
    fn run_file(&mut self, path: &str) -> error::Result<()>;
}

/// The signature of the native functions that implement the actions.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The action the word
/// implements.  The word function handler to execute for the word.  A simple description of the
/// word.  As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $action:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        $interpreter.add_word(
            $action,
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}
