/// Module for managing the program text: locating it, splitting it into words and building new
/// programs from instructions.
#[macro_use]
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;
