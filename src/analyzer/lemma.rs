use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use ahash::RandomState;

use crate::error::{Error, Result};

/// Reduces a word to its dictionary base form.
///
/// Implementations must be pure: the same word always yields the same lemma.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str) -> String;
}

impl<L> Lemmatizer for Arc<L>
where
    L: Lemmatizer + ?Sized,
{
    fn lemmatize(&self, word: &str) -> String {
        (**self).lemmatize(word)
    }
}

impl<L> Lemmatizer for Box<L>
where
    L: Lemmatizer + ?Sized,
{
    fn lemmatize(&self, word: &str) -> String {
        (**self).lemmatize(word)
    }
}

/// Returns every word unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        word.to_string()
    }
}

/// irregular noun plurals
const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("leaves", "leaf"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("halves", "half"),
    ("wolves", "wolf"),
    ("shelves", "shelf"),
];

/// noun detachment rules, tried in order
const NOUN_SUFFIX_RULES: &[(&str, &str)] = &[
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
    ("s", ""),
];

/// Noun lemmatizer in the style of WordNet's morphy.
///
/// With a dictionary of base forms, a detachment rule only applies when its
/// result is a known base form. Without one, a guarded subset of the rules is
/// applied directly.
#[derive(Debug, Clone)]
pub struct NounLemmatizer {
    exceptions: HashMap<Box<str>, Box<str>, RandomState>,
    lemmas: Option<HashSet<Box<str>, RandomState>>,
}

impl Default for NounLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl NounLemmatizer {
    /// Built-in rules and exceptions, no dictionary
    pub fn new() -> Self {
        let exceptions = NOUN_EXCEPTIONS
            .iter()
            .map(|(from, to)| (Box::from(*from), Box::from(*to)))
            .collect();
        Self {
            exceptions,
            lemmas: None,
        }
    }

    /// Load a dictionary.
    ///
    /// One entry per line: a single field is a known base form,
    /// two fields are an exception `inflected lemma`. `#` starts a comment.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut lemmatizer = Self::new();
        let mut lemmas: HashSet<Box<str>, RandomState> = HashSet::with_hasher(RandomState::new());
        for line in reader.lines() {
            let line = line?;
            let line = line.split('#').next().unwrap_or_default();
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(lemma), None) => {
                    lemmas.insert(lemma.to_lowercase().into_boxed_str());
                }
                (Some(inflected), Some(lemma)) => {
                    let lemma = lemma.to_lowercase().into_boxed_str();
                    lemmas.insert(lemma.clone());
                    lemmatizer
                        .exceptions
                        .insert(inflected.to_lowercase().into_boxed_str(), lemma);
                }
                _ => {}
            }
        }
        lemmatizer.lemmas = Some(lemmas);
        Ok(lemmatizer)
    }

    /// Load a dictionary file, see [`NounLemmatizer::from_reader`]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |source| Error::LemmaDictionaryUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unavailable)?;
        Self::from_reader(BufReader::new(file)).map_err(unavailable)
    }

    pub fn has_dictionary(&self) -> bool {
        self.lemmas.is_some()
    }

    fn morphy_with(&self, word: &str, lemmas: &HashSet<Box<str>, RandomState>) -> Option<String> {
        if lemmas.contains(word) {
            return Some(word.to_string());
        }
        NOUN_SUFFIX_RULES.iter().find_map(|(suffix, ending)| {
            let stem = word.strip_suffix(suffix)?;
            let candidate = format!("{stem}{ending}");
            (!candidate.is_empty() && lemmas.contains(candidate.as_str())).then_some(candidate)
        })
    }

    fn guarded_rules(word: &str) -> Option<String> {
        if word.chars().count() <= 3 || ["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
            return None;
        }
        if let Some(stem) = word.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return Some(format!("{stem}y"));
            }
        }
        for suffix in ["sses", "ches", "shes", "xes", "zes"] {
            if word.ends_with(suffix) {
                return Some(word[..word.len() - 2].to_string());
            }
        }
        word.strip_suffix('s').map(str::to_string)
    }
}

impl Lemmatizer for NounLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.to_string();
        }
        let reduced = match &self.lemmas {
            Some(lemmas) => self.morphy_with(word, lemmas),
            None => Self::guarded_rules(word),
        };
        reduced.unwrap_or_else(|| word.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules() {
        let lem = NounLemmatizer::new();
        assert_eq!(lem.lemmatize("strings"), "string");
        assert_eq!(lem.lemmatize("batteries"), "battery");
        assert_eq!(lem.lemmatize("boxes"), "box");
        assert_eq!(lem.lemmatize("churches"), "church");
        assert_eq!(lem.lemmatize("classes"), "class");
        assert_eq!(lem.lemmatize("children"), "child");
        // guarded words stay as they are
        assert_eq!(lem.lemmatize("was"), "was");
        assert_eq!(lem.lemmatize("glass"), "glass");
        assert_eq!(lem.lemmatize("bonus"), "bonus");
        assert_eq!(lem.lemmatize("analysis"), "analysis");
        assert_eq!(lem.lemmatize("guitar"), "guitar");
    }

    #[test]
    fn builtin_rules_are_idempotent_on_their_output() {
        let lem = NounLemmatizer::new();
        for word in ["strings", "batteries", "boxes", "pedals", "cables", "children"] {
            let once = lem.lemmatize(word);
            assert_eq!(lem.lemmatize(&once), once, "{word}");
        }
    }

    #[test]
    fn dictionary_restricts_rules_to_known_forms() {
        let dict = "# base forms\nhouse\nbus\ncable\ngoose\nmouse geese  # bogus on purpose\n";
        let lem = NounLemmatizer::from_reader(dict.as_bytes()).unwrap();
        assert!(lem.has_dictionary());
        assert_eq!(lem.lemmatize("houses"), "house");
        assert_eq!(lem.lemmatize("buses"), "bus");
        assert_eq!(lem.lemmatize("cables"), "cable");
        // unknown to the dictionary: unchanged
        assert_eq!(lem.lemmatize("pedals"), "pedals");
        // dictionary exceptions override built-ins
        assert_eq!(lem.lemmatize("mouse"), "geese");
    }

    #[test]
    fn missing_dictionary_is_startup_error() {
        let err = NounLemmatizer::from_path("/definitely/not/here.dict").unwrap_err();
        assert!(matches!(err, Error::LemmaDictionaryUnavailable { .. }));
        assert!(err.is_startup());
    }

    #[test]
    fn identity() {
        assert_eq!(IdentityLemmatizer.lemmatize("strings"), "strings");
    }
}
