use crate::{
    lang::source_buffer::SourceLocation,
    runtime::error::{self, ErrorKind, ScriptError},
};
use lazy_static::lazy_static;
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    fs::read_to_string,
    str::FromStr,
    sync::Arc,
};

/// The primitive operations a word can select through its score.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Action {
    /// Push the score of the next word.
    Push,

    /// Discard the top value.
    Pop,

    /// Replace the top two values with their sum.
    Add,

    /// Read one character and push its code.
    Input,

    /// Pop a value and write it as a character.
    Output,

    /// Pop `x` then `y` and push `y - x`.
    Subtract,

    /// Exchange the top two values.
    Swap,

    /// Push a copy of the top value.
    Dup,

    /// Skip forward by the next word's score if the popped value is zero.
    ForwardIfZero,

    /// Skip forward by the next word's score if the popped value is not zero.
    ForwardIfNonZero,

    /// Skip backward by the next word's score if the popped value is zero.
    BackwardIfZero,

    /// Skip backward by the next word's score if the popped value is not zero.
    BackwardIfNonZero,

    /// Stop the program.
    Quit,
}

impl Action {
    /// Every action, in the order of the default score table.
    pub const ALL: [Action; 13] = [
        Action::Push,
        Action::Pop,
        Action::Add,
        Action::Input,
        Action::Output,
        Action::Subtract,
        Action::Swap,
        Action::Dup,
        Action::ForwardIfZero,
        Action::ForwardIfNonZero,
        Action::BackwardIfZero,
        Action::BackwardIfNonZero,
        Action::Quit,
    ];

    /// The short name used in action table files.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Push => "push",
            Action::Pop => "pop",
            Action::Add => "add",
            Action::Input => "input",
            Action::Output => "output",
            Action::Subtract => "subtract",
            Action::Swap => "swap",
            Action::Dup => "dup",
            Action::ForwardIfZero => "fz",
            Action::ForwardIfNonZero => "fnz",
            Action::BackwardIfZero => "bz",
            Action::BackwardIfNonZero => "bnz",
            Action::Quit => "quit",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Action {
    type Err = ScriptError;

    fn from_str(name: &str) -> error::Result<Action> {
        let lowered = name.trim().to_lowercase();

        match Action::ALL.iter().find(|action| action.name() == lowered) {
            Some(action) => Ok(*action),
            None => ScriptError::new_as_result(
                None,
                ErrorKind::Config,
                format!("Unknown action {}.", name.trim()),
            ),
        }
    }
}

/// Points awarded to each letter.  Keys are stored lower case, letters missing from the table are
/// worth nothing.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct CharacterScores {
    points: HashMap<char, u32>,
}

impl FromIterator<(char, u32)> for CharacterScores {
    fn from_iter<I: IntoIterator<Item = (char, u32)>>(iter: I) -> Self {
        let mut scores = CharacterScores::new();

        for (character, points) in iter {
            scores.insert(character, points);
        }

        scores
    }
}

impl CharacterScores {
    pub fn new() -> CharacterScores {
        CharacterScores::default()
    }

    /// Set the points for a character, replacing any previous value.
    pub fn insert(&mut self, character: char, points: u32) {
        for lowered in character.to_lowercase() {
            self.points.insert(lowered, points);
        }
    }

    /// The points of a single character, 0 when it isn't in the table.
    pub fn points(&self, character: char) -> u32 {
        self.points.get(&character).copied().unwrap_or(0)
    }

    /// Score a word: the sum of the points of its lower cased characters.
    pub fn score(&self, word: &str) -> i64 {
        word.chars()
            .flat_map(char::to_lowercase)
            .map(|character| self.points(character) as i64)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.points.iter().map(|(character, points)| (*character, *points))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Maps word scores to the action they select.  Scores without an entry are inert.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct ActionScores {
    actions: HashMap<i64, Action>,
}

impl FromIterator<(i64, Action)> for ActionScores {
    fn from_iter<I: IntoIterator<Item = (i64, Action)>>(iter: I) -> Self {
        ActionScores {
            actions: iter.into_iter().collect(),
        }
    }
}

impl ActionScores {
    pub fn new() -> ActionScores {
        ActionScores::default()
    }

    /// Bind a score to an action, replacing any previous binding for that score.
    pub fn insert(&mut self, score: i64, action: Action) {
        self.actions.insert(score, action);
    }

    /// The action selected by a score, if any.
    pub fn action_for(&self, score: i64) -> Option<Action> {
        self.actions.get(&score).copied()
    }

    /// The lowest score that selects the given action.
    pub fn score_for(&self, action: Action) -> Option<i64> {
        self.actions
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(score, _)| *score)
            .min()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, Action)> + '_ {
        self.actions.iter().map(|(score, action)| (*score, *action))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

lazy_static! {
    /// The Scrabble letter distribution.
    pub static ref DEFAULT_CHARACTER_SCORES: Arc<CharacterScores> = Arc::new(
        [
            ('a', 1), ('b', 3), ('c', 3), ('d', 2), ('e', 1), ('f', 4), ('g', 2),
            ('h', 4), ('i', 1), ('j', 8), ('k', 5), ('l', 1), ('m', 3), ('n', 1),
            ('o', 1), ('p', 3), ('q', 10), ('r', 1), ('s', 1), ('t', 1), ('u', 1),
            ('v', 4), ('w', 4), ('x', 8), ('y', 4), ('z', 10),
        ]
        .into_iter()
        .collect()
    );

    /// Scores 5 through 17 select the actions in declaration order.
    pub static ref DEFAULT_ACTION_SCORES: Arc<ActionScores> = Arc::new(
        Action::ALL
            .iter()
            .zip(5..)
            .map(|(action, score)| (score, *action))
            .collect()
    );
}

/// Split a table file into `key = value` entries.  Blank lines are skipped and `#` starts a
/// comment that runs to the end of the line.
fn parse_entries(path: &str, source: &str) -> error::Result<Vec<(SourceLocation, String, String)>> {
    let mut entries = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let content = match line.find('#') {
            Some(start) => &line[..start],
            None => line,
        };

        if content.trim().is_empty() {
            continue;
        }

        let location = SourceLocation::new_from_info(path, index + 1, 1);

        match content.split_once('=') {
            Some((key, value)) => {
                entries.push((location, key.trim().to_string(), value.trim().to_string()))
            }
            None => ScriptError::new_as_result(
                Some(location),
                ErrorKind::Config,
                format!("Expected `key = value`, found {}.", content.trim()),
            )?,
        }
    }

    Ok(entries)
}

/// Parse a character score table, one `letter = points` entry per line.
pub fn parse_character_scores(path: &str, source: &str) -> error::Result<CharacterScores> {
    let mut scores = CharacterScores::new();

    for (location, key, value) in parse_entries(path, source)? {
        let mut characters = key.chars();

        let character = match (characters.next(), characters.next()) {
            (Some(character), None) if character.is_alphabetic() => character,
            _ => ScriptError::new_as_result(
                Some(location.clone()),
                ErrorKind::Config,
                format!("Expected a single letter, found {}.", key),
            )?,
        };

        let points = match value.parse::<u32>() {
            Ok(points) => points,
            Err(_) => ScriptError::new_as_result(
                Some(location),
                ErrorKind::Config,
                format!("Expected a non-negative number of points, found {}.", value),
            )?,
        };

        scores.insert(character, points);
    }

    Ok(scores)
}

/// Parse an action score table, one `score = action` entry per line.
pub fn parse_action_scores(path: &str, source: &str) -> error::Result<ActionScores> {
    let mut actions = ActionScores::new();

    for (location, key, value) in parse_entries(path, source)? {
        let score = match key.parse::<i64>() {
            Ok(score) => score,
            Err(_) => ScriptError::new_as_result(
                Some(location.clone()),
                ErrorKind::Config,
                format!("Expected an integer score, found {}.", key),
            )?,
        };

        let action = value
            .parse::<Action>()
            .map_err(|error| error.with_location(Some(location)))?;

        actions.insert(score, action);
    }

    Ok(actions)
}

fn read_table(path: &str) -> error::Result<String> {
    read_to_string(path).map_err(|error| {
        ScriptError::new(
            None,
            ErrorKind::Io,
            format!("Could not read score table {}: {}", path, error),
        )
    })
}

/// Read and parse a character score table file.
pub fn load_character_scores(path: &str) -> error::Result<CharacterScores> {
    parse_character_scores(path, &read_table(path)?)
}

/// Read and parse an action score table file.
pub fn load_action_scores(path: &str) -> error::Result<ActionScores> {
    parse_action_scores(path, &read_table(path)?)
}
