use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };
use crate::lang::source_buffer::SourceLocation;

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The category of a ScriptError.  Callers match on this rather than on the message text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind
{
    /// A value was popped or peeked from an empty stack.
    StackUnderflow,

    /// A value was pushed onto a stack that had reached its configured depth limit.
    StackOverflow,

    /// The program counter was moved past the last word or before the start of the program.
    ProgramCounterOutOfBounds,

    /// Integer arithmetic overflowed.
    ArithmeticOverflow,

    /// A value could not be written out as a character.
    InvalidCharacter,

    /// The input source ran dry while the program wanted another character.
    EndOfInput,

    /// Reading or writing failed at the operating system level.
    Io,

    /// A score table or command line option was malformed.
    Config,

    /// The program builder could not find a word with the requested score.
    Unspellable
}


impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let name = match self
            {
                ErrorKind::StackUnderflow => "stack underflow",
                ErrorKind::StackOverflow => "stack overflow",
                ErrorKind::ProgramCounterOutOfBounds => "program counter out of bounds",
                ErrorKind::ArithmeticOverflow => "arithmetic overflow",
                ErrorKind::InvalidCharacter => "invalid character",
                ErrorKind::EndOfInput => "end of input",
                ErrorKind::Io => "i/o error",
                ErrorKind::Config => "configuration error",
                ErrorKind::Unspellable => "unspellable score"
            };

        write!(f, "{}", name)
    }
}



/// Any error that occurs while loading or running a Beatnik program.
#[derive(Clone)]
pub struct ScriptError
{
    /// The location in the program the error occurred, if available.
    location: Option<SourceLocation>,

    /// What went wrong.
    kind: ErrorKind,

    /// The description of the error.
    error: String
}


impl Error for ScriptError
{
}


/// Pretty print the ScriptError, leading with the word that raised it when it is known.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.error),
            None => write!(f, "{}", self.error)
        }
    }
}


/// Returning a Result from main prints the Debug form, so keep it the same as Display.
impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(location: Option<SourceLocation>, kind: ErrorKind, error: String) -> ScriptError
    {
        ScriptError
            {
                location,
                kind,
                error
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>,
                            kind: ErrorKind,
                            error: String) -> Result<T>
    {
        Err(ScriptError::new(location, kind, error))
    }

    /// Fill in the location if the error was raised somewhere that didn't know it.  A location
    /// that is already present is kept.
    pub fn with_location(mut self, location: Option<SourceLocation>) -> ScriptError
    {
        if self.location.is_none()
        {
            self.location = location;
        }

        self
    }

    /// If available, the location in the program the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The category of the error.
    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(None, ErrorKind::Io, format!("I/O error: {}", error))
    }
}



/// Create a ScriptError wrapped in a Result::Err, located at the word the interpreter is
/// currently executing.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    ScriptError::new_as_result(interpreter.current_location(), kind, message)
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
