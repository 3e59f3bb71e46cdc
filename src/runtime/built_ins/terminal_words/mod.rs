use std::io::{ stdin, ErrorKind::Interrupted, Read };
use crate::{ add_native_word,
             runtime::{ data_structures::score_tables::Action,
                        error::{ self, script_error, script_error_str, ErrorKind, ScriptError },
                        interpreter::Interpreter } };



#[cfg(windows)]
/// Windows specific version of raw console input.
mod windows;

#[cfg(windows)]
use windows::RawMode;



#[cfg(unix)]
/// Unix specific version of raw terminal input.
mod unix;

#[cfg(unix)]
use unix::RawMode;



#[cfg(not(any(unix, windows)))]
/// Platforms without a raw mode read stdin as is.
struct RawMode;

#[cfg(not(any(unix, windows)))]
impl RawMode
{
    fn enter() -> error::Result<Option<RawMode>>
    {
        Ok(None)
    }
}



/// A source of single characters for the input action.
pub trait CharacterSource
{
    /// Block until one character is available.  `None` means the source is exhausted.
    fn read_char(&mut self) -> error::Result<Option<char>>;
}



/// Read one byte, retrying reads interrupted by signals.
fn read_byte(reader: &mut dyn Read) -> error::Result<Option<u8>>
{
    let mut buffer = [0; 1];

    loop
    {
        match reader.read(&mut buffer)
        {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buffer[0])),
            Err(ref e) if e.kind() == Interrupted => continue,
            Err(e) => return ScriptError::new_as_result(None,
                                                        ErrorKind::Io,
                                                        format!("Failed to read input: {}", e))
        }
    }
}


/// Read one UTF-8 encoded character a byte at a time, so nothing past the character is consumed.
pub fn read_utf8_char(reader: &mut dyn Read) -> error::Result<Option<char>>
{
    let first = match read_byte(reader)?
        {
            Some(first) => first,
            None => return Ok(None)
        };

    let length = match first.leading_ones()
        {
            0 => 1,
            2 => 2,
            3 => 3,
            4 => 4,
            _ => return invalid_input(&[ first ])
        };

    let mut bytes = vec![ first ];

    while bytes.len() < length
    {
        match read_byte(reader)?
        {
            Some(next) => bytes.push(next),
            None => return invalid_input(&bytes)
        }
    }

    match std::str::from_utf8(&bytes).ok().and_then(|text| text.chars().next())
    {
        Some(character) => Ok(Some(character)),
        None => invalid_input(&bytes)
    }
}


fn invalid_input<T>(bytes: &[u8]) -> error::Result<T>
{
    ScriptError::new_as_result(None,
                               ErrorKind::Io,
                               format!("Input bytes {:02x?} are not valid UTF-8.", bytes))
}



/// Reads characters from any byte reader.  Useful for feeding programs canned input.
pub struct ReaderInput<R: Read>
{
    reader: R
}


impl<R: Read> ReaderInput<R>
{
    pub fn new(reader: R) -> ReaderInput<R>
    {
        ReaderInput { reader }
    }
}


impl<R: Read> CharacterSource for ReaderInput<R>
{
    fn read_char(&mut self) -> error::Result<Option<char>>
    {
        read_utf8_char(&mut self.reader)
    }
}



/// Reads characters from the process's stdin.  When stdin is a terminal it is switched into raw
/// mode for the duration of each read, so a single key press is delivered without waiting for
/// enter and without being echoed.
#[derive(Default)]
pub struct TerminalInput;


impl TerminalInput
{
    pub fn new() -> TerminalInput
    {
        TerminalInput
    }
}


impl CharacterSource for TerminalInput
{
    fn read_char(&mut self) -> error::Result<Option<char>>
    {
        // Restored when the guard drops, even if the read fails.
        let _raw_mode = RawMode::enter()?;

        let stdin = stdin();
        let mut handle = stdin.lock();

        read_utf8_char(&mut handle)
    }
}



/// Read one character and push its code point.
///
/// Signature: ` -- character`
fn word_input(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    match interpreter.read_char()?
    {
        Some(character) => interpreter.push(character as i64),
        None => script_error_str(interpreter, ErrorKind::EndOfInput, "No more input to read.")
    }
}

/// Pop a code point and write it out as a character, then flush.
///
/// Signature: `character -- `
fn word_output(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    let value = interpreter.pop()?;

    match u32::try_from(value).ok().and_then(char::from_u32)
    {
        Some(character) => interpreter.write_char(character),
        None => script_error(interpreter,
                             ErrorKind::InvalidCharacter,
                             format!("{} is not a valid character code.", value))
    }
}



/// Register the character input and output words with the interpreter.
pub fn register_terminal_words(interpreter: &mut dyn Interpreter)
{
    add_native_word!(interpreter, Action::Input, word_input,
        "Read one character and push its code.",
        " -- character");

    add_native_word!(interpreter, Action::Output, word_output,
        "Write the top value as a character.",
        "character -- ");
}
