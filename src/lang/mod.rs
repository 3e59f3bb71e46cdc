/// Module for managing the original source text.
pub mod source_buffer;

/// Module for turning the source text into the list of words the interpreter walks over.
pub mod tokenizing;

/// Module for assembling program text from bare words or typed instructions.
pub mod builder;
