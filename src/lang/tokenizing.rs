use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, ErrorKind, ScriptError},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::read_to_string,
};

/// A word is the only kind of token in the language.  It is a maximal run of word characters and
/// it carries the location in the original text where it started.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Word {
    location: SourceLocation,
    text: String,
}

/// The ordered words of a program.
pub type WordList = Vec<Word>;

/// Print the word's text.
impl Display for Word {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Include the word's location when debugging.
impl Debug for Word {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

impl Word {
    pub fn new(location: SourceLocation, text: String) -> Word {
        Word { location, text }
    }

    /// Where the word starts in the original text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The raw text of the word, case preserved.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Word characters are ASCII letters, digits and the underscore.  Everything else separates
/// words and is discarded.
pub fn is_word_character(next: &char) -> bool {
    next.is_ascii_alphanumeric() || *next == '_'
}

/// Skip over separators.  Stopping only at either the end of the buffer or the next word
/// character.
fn skip_separators(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if is_word_character(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Gather word characters until a separator or the end of the buffer.
fn process_word(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next() {
        if !is_word_character(&next) {
            break;
        }

        text.push(next);
        let _ = buffer.next_char();
    }

    (location, text)
}

/// Split program text into its words.  The path is used to tag the word locations, it is never
/// read from.  Empty or all separator text yields an empty list.
pub fn tokenize_from_source(path: &str, source: &str) -> WordList {
    let mut buffer = SourceBuffer::new(path, source);
    let mut word_list = WordList::new();

    loop {
        skip_separators(&mut buffer);

        if buffer.peek_next().is_none() {
            break;
        }

        let (location, text) = process_word(&mut buffer);
        word_list.push(Word::new(location, text));
    }

    word_list
}

/// Read a script file and split it into words.
pub fn tokenize_from_file(path: &str) -> error::Result<WordList> {
    match read_to_string(path) {
        Ok(source) => Ok(tokenize_from_source(path, &source)),
        Err(error) => ScriptError::new_as_result(
            None,
            ErrorKind::Io,
            format!("Could not read file {}: {}", path, error),
        ),
    }
}
