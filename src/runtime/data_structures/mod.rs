/// The bounds checked stack of integers the operations work on.
pub mod value_stack;

/// The character and action score tables, their defaults and their file format.
pub mod score_tables;

/// The dictionary of native words, keyed by the action they perform.
pub mod dictionary;
