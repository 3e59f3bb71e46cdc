/// The core words of the language: stack, arithmetic and control.
pub mod base_words;

/// Words that read and write single characters.
pub mod terminal_words;
