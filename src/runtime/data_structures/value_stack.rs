use crate::runtime::error::{self, ErrorKind, ScriptError};
use std::fmt::{self, Display, Formatter};

/// The data stack of the interpreter.  A LIFO of signed integers, top is the most recently pushed
/// value.
///
/// Errors raised here carry no location, the interpreter fills that in with the word that was
/// executing.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct ValueStack {
    items: Vec<i64>,

    /// The deepest the stack has been since it was created or last cleared.
    max_depth: usize,

    /// Optional limit on the depth, pushes beyond it are a stack overflow.
    limit: Option<usize>,
}

/// Show the stack bottom to top, the same order `elements` returns.
impl Display for ValueStack {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[")?;

        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{}", item)?;
        }

        write!(f, "]")
    }
}

impl ValueStack {
    /// Create an empty stack without a depth limit.
    pub fn new() -> ValueStack {
        ValueStack::default()
    }

    /// Create an empty stack that refuses to grow past the given depth.
    pub fn with_limit(limit: Option<usize>) -> ValueStack {
        ValueStack {
            limit,
            ..ValueStack::default()
        }
    }

    /// Push a value onto the top of the stack.
    pub fn push(&mut self, value: i64) -> error::Result<()> {
        if let Some(limit) = self.limit {
            if self.items.len() >= limit {
                return ScriptError::new_as_result(
                    None,
                    ErrorKind::StackOverflow,
                    format!("Stack overflow, the depth limit is {}.", limit),
                );
            }
        }

        self.items.push(value);

        if self.items.len() > self.max_depth {
            self.max_depth = self.items.len();
        }

        Ok(())
    }

    /// Remove and return the top value.
    pub fn pop(&mut self) -> error::Result<i64> {
        match self.items.pop() {
            Some(value) => Ok(value),
            None => Self::underflow(),
        }
    }

    /// Return the top value without removing it.
    pub fn peek(&self) -> error::Result<i64> {
        match self.items.last() {
            Some(value) => Ok(*value),
            None => Self::underflow(),
        }
    }

    /// The values on the stack, bottom first.
    pub fn elements(&self) -> &[i64] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// What is the maximum depth the stack has reached so far?
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The configured depth limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drop every value and forget the recorded maximum depth.
    pub fn clear(&mut self) {
        self.items.clear();
        self.max_depth = 0;
    }

    fn underflow<T>() -> error::Result<T> {
        ScriptError::new_as_result(None, ErrorKind::StackUnderflow, "Stack underflow.".to_string())
    }
}
