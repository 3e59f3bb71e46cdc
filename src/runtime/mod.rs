/// All of the core data structures used by the Beatnik interpreter.
pub mod data_structures;

/// Module for defining the primitive operations of the language as native words.
pub mod built_ins;

/// Module for defining the error reporting of the Beatnik interpreter.
pub mod error;

/// Module for defining the core functionality of the Beatnik interpreter.  This includes the
/// program counter, the dispatch loop and tools for examining the interpreter's state.
#[macro_use]
pub mod interpreter;
