//! Token → id lookup against a loaded model's vocabulary.
//!
//! A trained model accepts exactly the tokens of its training-time
//! `token_list`; the id of a token is its position in that list. Anything
//! the tokenizer can emit that the list lacks is a hard error here — the
//! mismatch means the accent string was written for a different model.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Default cap on vocabulary size, the fixed token dimension the training
/// pipeline bakes into its shape files.
pub const DEFAULT_VOCAB_SIZE: usize = 47;

/// Maps token strings to the integer ids a model was trained on.
#[derive(Debug, Clone)]
pub struct TokenIdConverter {
    ids: HashMap<String, i64>,
}

impl TokenIdConverter {
    /// Build from a token list, enforcing [`DEFAULT_VOCAB_SIZE`].
    pub fn new(token_list: &[String]) -> Result<Self> {
        Self::with_max_size(token_list, DEFAULT_VOCAB_SIZE)
    }

    /// Build from a token list with an explicit vocabulary cap.
    pub fn with_max_size(token_list: &[String], max_size: usize) -> Result<Self> {
        if token_list.len() > max_size {
            return Err(Error::Vocabulary(format!(
                "token list has {} entries, cap is {max_size}",
                token_list.len()
            )));
        }
        let mut ids = HashMap::with_capacity(token_list.len());
        for (i, token) in token_list.iter().enumerate() {
            if ids.insert(token.clone(), i as i64).is_some() {
                return Err(Error::Vocabulary(format!("duplicate token {token:?}")));
            }
        }
        Ok(Self { ids })
    }

    /// Number of known tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of one token, if the model knows it.
    pub fn token_to_id(&self, token: &str) -> Option<i64> {
        self.ids.get(token).copied()
    }

    /// Map a token sequence to ids, failing on the first token the model
    /// was not trained on.
    pub fn tokens_to_ids<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<i64>> {
        tokens
            .iter()
            .enumerate()
            .map(|(position, token)| {
                let token = token.as_ref();
                self.token_to_id(token).ok_or_else(|| Error::UnknownToken {
                    token: token.to_string(),
                    position,
                })
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
