use std::{fs, path::Path, sync::Arc};

use serde::Deserialize;
use tracing::info;

use crate::{
    analyzer::{Analyzer, Lemmatizer, ASCII_PUNCTUATION},
    error::{Error, Result},
    vectorizer::TFIDFVectorizer,
};

/// Conversation settings.
/// Every field is optional in the TOML file; missing ones take the defaults.
///
/// ```toml
/// bot_name = "ChatterBox"
/// greeting_inputs = ["hello", "hi", "good morning"]
/// greeting_responses = ["hi", "hello"]
/// extra_stop_words = ["chatterbox"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    pub bot_name: String,
    pub intro: String,
    pub farewell_inputs: Vec<String>,
    pub farewell_message: String,
    pub thanks_inputs: Vec<String>,
    pub thanks_message: String,
    pub greeting_inputs: Vec<String>,
    pub greeting_responses: Vec<String>,
    pub fallback_message: String,
    /// characters deleted before tokenizing
    pub punctuation: String,
    /// apply the English stop word list
    pub stop_words: bool,
    pub extra_stop_words: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: "ChatterBox".to_string(),
            intro: "hey!  My name is ChatterBox. I will answer your queries about ChatterBox. \
                    If you want to exit, say bye or thanks!"
                .to_string(),
            farewell_inputs: strings(&["bye"]),
            farewell_message: "Bye! ".to_string(),
            thanks_inputs: strings(&["thanks", "thank you"]),
            thanks_message: "You are welcome".to_string(),
            greeting_inputs: strings(&[
                "hello",
                "hi",
                "greetings",
                "good morning",
                "good evening",
                "good afternoon",
            ]),
            greeting_responses: strings(&["hi", "hello"]),
            fallback_message: "I am sorry! I am not able to get you".to_string(),
            punctuation: ASCII_PUNCTUATION.to_string(),
            stop_words: true,
            extra_stop_words: Vec::new(),
        }
    }
}

impl ChatConfig {
    /// Read and validate a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| Error::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), bot = %config.bot_name, "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.greeting_inputs.is_empty() && self.greeting_responses.is_empty() {
            return Err(Error::InvalidConfigValue(
                "greeting_responses must not be empty when greeting_inputs is set",
            ));
        }
        if self.bot_name.trim().is_empty() {
            return Err(Error::InvalidConfigValue("bot_name must not be empty"));
        }
        Ok(())
    }

    /// Analyzer using this config's punctuation set
    pub fn analyzer(&self, lemmatizer: Arc<dyn Lemmatizer>) -> Analyzer {
        Analyzer::new(lemmatizer).with_punctuation(&self.punctuation)
    }

    /// Vectorizer with this config's stop word settings
    pub fn vectorizer(&self, analyzer: Analyzer) -> TFIDFVectorizer {
        let vectorizer = TFIDFVectorizer::new(analyzer);
        let vectorizer = if self.stop_words {
            vectorizer
        } else {
            vectorizer.with_stop_words(std::iter::empty::<&str>())
        };
        vectorizer.extend_stop_words(self.extra_stop_words.iter().map(|w| w.to_lowercase()))
    }
}
