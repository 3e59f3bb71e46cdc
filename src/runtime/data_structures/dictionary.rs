use crate::runtime::{data_structures::score_tables::Action, interpreter::WordHandler};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// The information stored in the dictionary for each native word.
#[derive(Clone)]
pub struct WordInfo {
    /// The action this word implements.
    pub action: Action,

    /// A simple description of the word.
    pub description: String,

    /// The stack signature of the word.
    pub signature: String,

    /// The code that runs when the word executes.
    pub handler: Rc<WordHandler>,
}

impl WordInfo {
    /// A cheap copy of the handler, so it can be called while the interpreter is borrowed
    /// mutably.
    pub fn handler(&self) -> Rc<WordHandler> {
        self.handler.clone()
    }
}

/// Print the word's name, signature and description for listings.
impl Display for WordInfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{:<9} {:<18} {}",
            self.action.name(),
            format!("( {} )", self.signature.trim()),
            self.description
        )
    }
}

/// The words the interpreter knows about, one per action.
#[derive(Clone, Default)]
pub struct Dictionary {
    words: HashMap<Action, WordInfo>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary::default()
    }

    /// Register a word, replacing any earlier word for the same action.
    pub fn insert(&mut self, info: WordInfo) {
        self.words.insert(info.action, info);
    }

    pub fn find(&self, action: Action) -> Option<&WordInfo> {
        self.words.get(&action)
    }

    /// All registered words, sorted by action.
    pub fn words(&self) -> Vec<&WordInfo> {
        let mut words: Vec<&WordInfo> = self.words.values().collect();

        words.sort_by_key(|info| info.action);
        words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
