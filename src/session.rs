use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    time::Instant,
};

use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};
use tracing::{debug, warn};

use crate::{
    config::ChatConfig,
    corpus::{Corpus, Sentence},
    error::Result,
    matcher::{best_match, Match},
    vectorizer::TFIDFVectorizer,
};

/// Picks one canned response out of several.
pub trait ResponseChooser: Send {
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str>;
}

/// Uniform choice from an OS-seeded generator
#[derive(Debug, Clone)]
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseChooser for RandomChooser {
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        options.choose(&mut self.rng).map(String::as_str)
    }
}

/// Uniform choice, reproducible from a seed
#[derive(Debug, Clone)]
pub struct SeededChooser {
    rng: StdRng,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ResponseChooser for SeededChooser {
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        options.choose(&mut self.rng).map(String::as_str)
    }
}

/// Always the first option
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl ResponseChooser for FirstChooser {
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        options.first().map(String::as_str)
    }
}

impl<C: ResponseChooser + ?Sized> ResponseChooser for Box<C> {
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        (**self).choose(options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Closed,
}

/// What the bot says for one utterance
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Farewell(String),
    Thanks(String),
    Greeting(String),
    /// best matching corpus sentence
    Answer(Sentence),
    /// fallback message
    NoMatch(String),
    /// the session already ended; nothing is said
    Closed,
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Farewell(s) | Reply::Thanks(s) | Reply::Greeting(s) | Reply::NoMatch(s) => s,
            Reply::Answer(sentence) => sentence.as_str(),
            Reply::Closed => "",
        }
    }

    /// Whether this reply ends the session
    pub fn ends_session(&self) -> bool {
        matches!(self, Reply::Farewell(_) | Reply::Thanks(_) | Reply::Closed)
    }
}

/// One conversation over an owned corpus.
///
/// Each utterance is checked in order against the farewell inputs, the thanks
/// inputs and the greeting keywords; anything else is answered with the most
/// similar corpus sentence. The corpus length is the same before and after
/// every turn.
pub struct Session<C = RandomChooser>
where
    C: ResponseChooser,
{
    corpus: Corpus,
    vectorizer: TFIDFVectorizer,
    config: ChatConfig,
    chooser: C,
    state: SessionState,
}

impl<C> Session<C>
where
    C: ResponseChooser,
{
    pub fn new(corpus: Corpus, vectorizer: TFIDFVectorizer, config: ChatConfig, chooser: C) -> Self {
        Self {
            corpus,
            vectorizer,
            config,
            chooser,
            state: SessionState::AwaitingInput,
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Answer one utterance
    pub fn respond(&mut self, utterance: &str) -> Reply {
        if self.is_closed() {
            return Reply::Closed;
        }
        let text = utterance.trim().to_lowercase();

        if matches_any(&self.config.farewell_inputs, &text) {
            self.state = SessionState::Closed;
            return Reply::Farewell(self.config.farewell_message.clone());
        }
        if matches_any(&self.config.thanks_inputs, &text) {
            self.state = SessionState::Closed;
            return Reply::Thanks(self.config.thanks_message.clone());
        }
        if contains_keyword(&self.config.greeting_inputs, &text) {
            if let Some(response) = self.chooser.choose(&self.config.greeting_responses) {
                return Reply::Greeting(response.to_string());
            }
        }

        match self.answer(&text) {
            Some(sentence) => Reply::Answer(sentence),
            None => Reply::NoMatch(self.config.fallback_message.clone()),
        }
    }

    /// Retrieval step. Failures of any kind end up as `None`.
    fn answer(&mut self, text: &str) -> Option<Sentence> {
        let start = Instant::now();
        let vectorizer = &self.vectorizer;
        let corpus = &mut self.corpus;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            corpus.with_query(Sentence::new(text), |pool| retrieve(vectorizer, pool))
        }));

        match outcome {
            Ok(Ok(Some((sentence, row, score)))) => {
                debug!(
                    row,
                    score,
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "matched"
                );
                Some(sentence)
            }
            Ok(Ok(None)) => {
                debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "no match");
                None
            }
            Ok(Err(err)) => {
                warn!(error = %err, "turn failed, answering with fallback");
                None
            }
            Err(_) => {
                warn!("turn panicked, answering with fallback");
                None
            }
        }
    }
}

/// Fit over `pool` (query last) and pick the best other sentence
fn retrieve(vectorizer: &TFIDFVectorizer, pool: &[Sentence]) -> Result<Option<(Sentence, usize, f64)>> {
    let query_row = pool.len().saturating_sub(1);
    debug!(tokens = ?vectorizer.analyzer().normalize(&pool[query_row]), "query");
    let matrix = vectorizer.fit_transform(pool);
    Ok(match best_match(&matrix, query_row)? {
        Match::Found { row, score } => Some((pool[row].clone(), row, score)),
        Match::NoMatch => None,
    })
}

fn matches_any(inputs: &[String], text: &str) -> bool {
    inputs.iter().any(|input| input.trim().to_lowercase() == text)
}

/// Whether any single word or contiguous run of words of `text` is a keyword
fn contains_keyword(keywords: &[String], text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        let phrase: Vec<&str> = keyword.split_whitespace().collect();
        !phrase.is_empty()
            && phrase.len() <= words.len()
            && words.windows(phrase.len()).any(|window| window == phrase.as_slice())
    })
}
