use core::str::Chars;
use std::fmt::{ self,
                Display,
                Formatter };



/// The location in the program text where a word was found.  Every word carries one so that
/// runtime errors can point back at the instruction that raised them.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, PartialOrd, Eq, Hash, Debug)]
pub struct SourceLocation
{
    /// Either the path to the script file or a tag describing where the text came from.  Programs
    /// handed straight to `run` are tagged "\<program\>".
    path: String,

    /// The 1 based line number of the word.
    line: usize,

    /// The 1 based column number of the word.
    column: usize
}


/// Used for error reporting to show where in the program an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl SourceLocation
{
    /// Create a location pointing at the start of the given path.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the script or a meaningful description of the program's origin.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// A forward only cursor over program text.  As characters are consumed the location of the
/// cursor is maintained so the tokenizer can stamp each word with where it started.
///
/// The buffer only borrows the text, which must outlive it.
pub struct SourceBuffer<'a>
{
    /// An iterator over the text being processed.
    chars: Chars<'a>,

    /// The logical location of the cursor.
    location: SourceLocation,

    /// A character that has been peeked at but not yet consumed.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    /// Create a new SourceBuffer from a path or tag and the text itself.
    pub fn new(path: &str, source: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars(),
                location: SourceLocation::new_from_path(path),
                current: None
            }
    }

    /// The location the cursor is at.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        if self.current.is_none()
        {
            self.current = self.chars.next();
        }

        self.current
    }

    /// Get and consume the next character.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(peeked) => Some(peeked),
                None => self.chars.next()
            };

        if let Some(next_char) = next
        {
            self.increment_location(next_char);
        }

        next
    }

    /// Advance one column for regular characters.  Reset the column to 1 and increment the line
    /// for new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}
