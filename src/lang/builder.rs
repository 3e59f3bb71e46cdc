use crate::runtime::{
    data_structures::score_tables::{
        Action, ActionScores, CharacterScores, DEFAULT_ACTION_SCORES, DEFAULT_CHARACTER_SCORES,
    },
    error::{self, ErrorKind, ScriptError},
    interpreter::Interpreter,
};
use std::sync::Arc;

/// The spelling used for a score of zero.  The underscore is a word character that no letter
/// table scores.
const ZERO_WORD: &str = "_";

/// Bound on the letters of one spelled word.
const MAX_WORD_LENGTH: usize = 1 << 20;

/// Bound on the table of the exact search, in steps of the letters' common divisor.
const MAX_SEARCH: usize = 1 << 20;

/// Assembles program text from bare words and typed instructions.
///
/// Words come out in the order they were added, separated by single spaces, and the result is
/// handed to an interpreter verbatim.  Instructions and numbers are spelled with letters from the
/// builder's character table, so build with the same tables the interpreter will run with.
///
/// ```
/// use beatnik::lang::builder::ProgramBuilder;
/// use beatnik::runtime::data_structures::score_tables::Action;
///
/// let mut builder = ProgramBuilder::new();
///
/// builder.instruction(Action::Push)?.number(72)?.instruction(Action::Output)?;
/// assert_eq!(builder.len(), 3);
/// # Ok::<(), beatnik::runtime::error::ScriptError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ProgramBuilder {
    character_scores: Arc<CharacterScores>,
    action_scores: Arc<ActionScores>,
    words: Vec<String>,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramBuilder {
    /// A builder spelling with the default tables.
    pub fn new() -> ProgramBuilder {
        ProgramBuilder::with_tables(
            DEFAULT_CHARACTER_SCORES.clone(),
            DEFAULT_ACTION_SCORES.clone(),
        )
    }

    pub fn with_tables(
        character_scores: Arc<CharacterScores>,
        action_scores: Arc<ActionScores>,
    ) -> ProgramBuilder {
        ProgramBuilder {
            character_scores,
            action_scores,
            words: Vec::new(),
        }
    }

    /// Append a bare word as is.
    pub fn word(&mut self, word: &str) -> &mut ProgramBuilder {
        self.words.push(word.to_string());
        self
    }

    /// Append several bare words, in order.
    pub fn words<I, S>(&mut self, words: I) -> &mut ProgramBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|word| word.as_ref().to_string()));
        self
    }

    /// Append a word that selects the given action.  The lowest score bound to the action is
    /// used.
    pub fn instruction(&mut self, action: Action) -> error::Result<&mut ProgramBuilder> {
        let score = match self.action_scores.score_for(action) {
            Some(score) => score,
            None => ScriptError::new_as_result(
                None,
                ErrorKind::Unspellable,
                format!("No score selects the {} action.", action),
            )?,
        };

        let word = self.spell(score)?;
        self.words.push(word);

        Ok(self)
    }

    /// Append a word scoring exactly `score`, for push operands and branch distances.
    pub fn number(&mut self, score: i64) -> error::Result<&mut ProgramBuilder> {
        let word = self.spell(score)?;
        self.words.push(word);

        Ok(self)
    }

    /// Find a word of as few letters as possible whose score is exactly `score`.
    ///
    /// Scores are counted in steps of the greatest common divisor of the letter values, a score
    /// that isn't a multiple of it can't be spelled.  Letters are used in bulk with the highest
    /// valued letter until the remainder is small enough for an exact search.  A fewest letter
    /// spelling has fewer than `largest` other letters, so any total at or above `largest²` uses
    /// the largest letter at least once and the bulk step never loses a solution.
    pub fn spell(&self, score: i64) -> error::Result<String> {
        if score == 0 {
            return match self.character_scores.score(ZERO_WORD) {
                0 => Ok(ZERO_WORD.to_string()),
                _ => self.unspellable(score),
            };
        }

        if score < 0 {
            return self.unspellable(score);
        }

        let mut letters: Vec<(char, i64)> = self
            .character_scores
            .iter()
            .filter(|(character, points)| character.is_ascii_alphabetic() && *points > 0)
            .map(|(character, points)| (character, points as i64))
            .collect();

        letters.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let (largest_letter, largest) = match letters.first() {
            Some(first) => *first,
            None => return self.unspellable(score),
        };

        let step = letters
            .iter()
            .fold(0, |step, (_, points)| greatest_common_divisor(step, *points));

        if score % step != 0 {
            return self.unspellable(score);
        }

        if score / largest > MAX_WORD_LENGTH as i64 {
            return ScriptError::new_as_result(
                None,
                ErrorKind::Unspellable,
                format!(
                    "A word scoring {} needs more than {} letters.",
                    score, MAX_WORD_LENGTH
                ),
            );
        }

        let target = score / step;
        let unit = largest / step;
        let window = unit.saturating_mul(unit);
        let bulk = if target > window {
            (target - window) / unit
        } else {
            0
        };

        let remainder = target - bulk * unit;

        if remainder > MAX_SEARCH as i64 {
            return ScriptError::new_as_result(
                None,
                ErrorKind::Unspellable,
                format!(
                    "Spelling {} with letters worth up to {} needs a search over {} totals, \
                     more than the {} allowed.",
                    score, largest, remainder, MAX_SEARCH
                ),
            );
        }

        let remainder = remainder as usize;
        let steps: Vec<usize> = letters
            .iter()
            .map(|(_, points)| (*points / step) as usize)
            .collect();

        // fewest[n] is the fewest letters totalling n steps, last[n] the index of the letter that
        // got there.
        let mut fewest: Vec<Option<usize>> = vec![None; remainder + 1];
        let mut last: Vec<usize> = vec![0; remainder + 1];

        fewest[0] = Some(0);

        for total in 1..=remainder {
            for (index, points) in steps.iter().enumerate() {
                if *points > total {
                    continue;
                }

                if let Some(count) = fewest[total - points] {
                    if fewest[total].is_none_or(|current| count + 1 < current) {
                        fewest[total] = Some(count + 1);
                        last[total] = index;
                    }
                }
            }
        }

        if fewest[remainder].is_none() {
            return self.unspellable(score);
        }

        let mut word: String = std::iter::repeat_n(largest_letter, bulk as usize).collect();
        let mut total = remainder;

        while total > 0 {
            let index = last[total];

            word.push(letters[index].0);
            total -= steps[index];
        }

        Ok(word)
    }

    /// The program text: every word in order, separated by single spaces.
    pub fn build(&self) -> String {
        self.words.join(" ")
    }

    /// Forward the built text to an interpreter and run it.
    pub fn run(&self, interpreter: &mut dyn Interpreter) -> error::Result<()> {
        interpreter.run(&self.build())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn unspellable<T>(&self, score: i64) -> error::Result<T> {
        ScriptError::new_as_result(
            None,
            ErrorKind::Unspellable,
            format!("No word can be spelled with a score of {}.", score),
        )
    }
}


fn greatest_common_divisor(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        greatest_common_divisor(b, a % b)
    }
}
