use std::{ io::{ stdout, Write },
           rc::Rc,
           sync::Arc };
use tracing::{ debug, trace };
use crate::{ lang::{ source_buffer::SourceLocation,
                     tokenizing::{ tokenize_from_file,
                                   tokenize_from_source,
                                   Word,
                                   WordList } },
             runtime::{ built_ins::{ base_words::register_base_words,
                                     terminal_words::{ register_terminal_words,
                                                       CharacterSource,
                                                       TerminalInput } },
                        data_structures::{ dictionary::{ Dictionary,
                                                         WordInfo },
                                           score_tables::{ Action,
                                                           ActionScores,
                                                           CharacterScores },
                                           value_stack::ValueStack },
                        error::{ self,
                                 script_error,
                                 ErrorKind,
                                 ScriptError },
                        interpreter::{ CharacterIo,
                                       Dispatch,
                                       Interpreter,
                                       InterpreterOptions,
                                       InterpreterStack,
                                       ProgramCounter,
                                       WordHandler,
                                       WordManagement } } };



/// The tag used for the locations of programs handed to `run` as text.
pub const PROGRAM_TAG: &str = "<program>";



/// The core interpreter implementation for the Beatnik language.
pub struct BeatnikInterpreter
{
    /// The data stack used by the interpreter.
    stack: ValueStack,

    /// The words of the program being run.
    words: WordList,

    /// The program counter.  Starts at -1, before the first word.
    index: i64,

    /// Set by quit to stop the dispatch loop.
    halted: bool,


    /// Points per letter, shared read-only with any other interpreter using the same table.
    character_scores: Arc<CharacterScores>,

    /// Score to action bindings, shared the same way.
    action_scores: Arc<ActionScores>,

    /// The native words implementing the actions.
    dictionary: Dictionary,


    /// Where the input action reads characters from.
    input: Box<dyn CharacterSource>,

    /// Where the output action writes characters to.
    output: Box<dyn Write>
}


impl Default for BeatnikInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl InterpreterStack for BeatnikInterpreter
{
    fn stack_max_depth(&self) -> usize
    {
        self.stack.max_depth()
    }

    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn push(&mut self, value: i64) -> error::Result<()>
    {
        let location = self.current_location();
        self.stack.push(value).map_err(|error| error.with_location(location))
    }

    fn pop(&mut self) -> error::Result<i64>
    {
        let location = self.current_location();
        self.stack.pop().map_err(|error| error.with_location(location))
    }

    fn peek(&self) -> error::Result<i64>
    {
        self.stack.peek().map_err(|error| error.with_location(self.current_location()))
    }
}


impl ProgramCounter for BeatnikInterpreter
{
    fn words(&self) -> &WordList
    {
        &self.words
    }

    fn index(&self) -> i64
    {
        self.index
    }

    fn current_word(&self) -> Option<&Word>
    {
        usize::try_from(self.index).ok().and_then(|index| self.words.get(index))
    }

    fn load(&mut self, words: WordList)
    {
        self.words = words;
        self.index = -1;
        self.halted = false;
    }

    fn advance(&mut self, offset: i64) -> error::Result<i64>
    {
        let count = self.words.len() as i64;

        match self.index.checked_add(offset)
        {
            Some(target) if (-1..count).contains(&target) =>
                {
                    self.index = target;

                    Ok(self.current_word()
                           .map(|word| self.character_scores.score(word.text()))
                           .unwrap_or(0))
                },

            target =>
                {
                    let target = match target
                        {
                            Some(target) => target.to_string(),
                            None => "an overflowing position".to_string()
                        };

                    script_error(self,
                                 ErrorKind::ProgramCounterOutOfBounds,
                                 format!("Moving the program counter by {} from word {} lands \
                                          on {}, outside of the {} word program.",
                                         offset,
                                         self.index,
                                         target,
                                         count))
                }
        }
    }

    fn halt(&mut self)
    {
        self.halted = true;
    }

    fn is_halted(&self) -> bool
    {
        self.halted
    }
}


impl CharacterIo for BeatnikInterpreter
{
    fn read_char(&mut self) -> error::Result<Option<char>>
    {
        let location = self.current_location();
        self.input.read_char().map_err(|error| error.with_location(location))
    }

    fn write_char(&mut self, character: char) -> error::Result<()>
    {
        let location = self.current_location();
        let mut buffer = [0; 4];

        self.output.write_all(character.encode_utf8(&mut buffer).as_bytes())
                   .and_then(|_| self.output.flush())
                   .map_err(|io_error| ScriptError::from(io_error).with_location(location))
    }
}


impl WordManagement for BeatnikInterpreter
{
    fn add_word(&mut self,
                action: Action,
                handler: Rc<WordHandler>,
                description: String,
                signature: String)
    {
        self.dictionary.insert(WordInfo
            {
                action,
                description,
                signature,
                handler
            });
    }

    fn find_word(&self, action: Action) -> Option<&WordInfo>
    {
        self.dictionary.find(action)
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }
}


impl Interpreter for BeatnikInterpreter
{
    fn current_location(&self) -> Option<SourceLocation>
    {
        self.current_word().map(|word| word.location().clone())
    }

    fn score(&self, word: &str) -> i64
    {
        self.character_scores.score(word)
    }

    fn character_scores(&self) -> &CharacterScores
    {
        &self.character_scores
    }

    fn action_scores(&self) -> &ActionScores
    {
        &self.action_scores
    }

    fn dispatch(&mut self) -> error::Result<Dispatch>
    {
        // Nothing left to fetch, the program ran off its end.
        if self.index == self.words.len() as i64 - 1
        {
            return Ok(Dispatch::Stop);
        }

        let score = self.advance(1)?;

        let action = match self.action_scores.action_for(score)
            {
                Some(action) => action,
                None =>
                    {
                        trace!(index = self.index, score, "inert word");
                        return Ok(Dispatch::Continue);
                    }
            };

        trace!(index = self.index, score, %action, "dispatch");
        self.execute_action(action)
    }

    fn run(&mut self, source: &str) -> error::Result<()>
    {
        self.run_words(tokenize_from_source(PROGRAM_TAG, source))
    }

    fn run_file(&mut self, path: &str) -> error::Result<()>
    {
        let words = tokenize_from_file(path)?;
        self.run_words(words)
    }
}


impl BeatnikInterpreter
{
    /// An interpreter with the default tables, reading from and writing to the terminal.
    pub fn new() -> BeatnikInterpreter
    {
        BeatnikInterpreter::with_options(InterpreterOptions::default())
    }

    /// An interpreter with the given tables, reading from and writing to the terminal.
    pub fn with_options(options: InterpreterOptions) -> BeatnikInterpreter
    {
        BeatnikInterpreter::with_io(options, Box::new(TerminalInput::new()), Box::new(stdout()))
    }

    /// An interpreter with the given tables and character source and sink.
    pub fn with_io(options: InterpreterOptions,
                   input: Box<dyn CharacterSource>,
                   output: Box<dyn Write>) -> BeatnikInterpreter
    {
        let mut interpreter = BeatnikInterpreter
            {
                stack: ValueStack::with_limit(options.max_stack_depth),
                words: WordList::new(),
                index: -1,
                halted: false,

                character_scores: options.resolved_character_scores(),
                action_scores: options.resolved_action_scores(),
                dictionary: Dictionary::new(),

                input,
                output
            };

        register_base_words(&mut interpreter);
        register_terminal_words(&mut interpreter);

        interpreter
    }

    /// The shared character table, for handing to other interpreters or a program builder.
    pub fn shared_character_scores(&self) -> Arc<CharacterScores>
    {
        self.character_scores.clone()
    }

    /// The shared action table, for handing to other interpreters or a program builder.
    pub fn shared_action_scores(&self) -> Arc<ActionScores>
    {
        self.action_scores.clone()
    }

    /// Execute the word registered for an action at the current program position, as if a word
    /// with that action's score had just been fetched.
    pub fn execute_action(&mut self, action: Action) -> error::Result<Dispatch>
    {
        let handler = match self.find_word(action)
            {
                Some(info) => info.handler(),
                None =>
                    {
                        debug!(%action, "no word registered for action");
                        return Ok(Dispatch::Continue);
                    }
            };

        let interpreter: &mut dyn Interpreter = self;
        handler(interpreter)?;

        if self.halted
        {
            Ok(Dispatch::Stop)
        }
        else
        {
            Ok(Dispatch::Continue)
        }
    }

    /// Clear the stack, load the words and dispatch until the program stops.
    fn run_words(&mut self, words: WordList) -> error::Result<()>
    {
        self.stack.clear();
        self.load(words);

        debug!(words = self.words.len(), "program start");

        while self.dispatch()? == Dispatch::Continue
        {
        }

        debug!(depth = self.stack.len(),
               max_depth = self.stack.max_depth(),
               quit = self.halted,
               "program finished");

        Ok(())
    }
}
