//! Token estimation for the question length guard.

use tiktoken_rs::{CoreBPE, get_bpe_from_model, o200k_base};

/// Counts tokens with the tokenizer matching a model name.
///
/// Construction never fails: an unrecognized model name falls back to the
/// `o200k_base` encoding, and if even that cannot be built the counter
/// degrades to a characters-per-token heuristic. Callers never observe a
/// tokenizer error.
pub struct TokenCounter {
    bpe: Option<CoreBPE>,
}

impl TokenCounter {
    pub fn for_model(model: &str) -> Self {
        let bpe = get_bpe_from_model(model).or_else(|_| o200k_base()).ok();

        if bpe.is_none() {
            log::warn!("no tokenizer available for model {model}, using character heuristic");
        }

        Self { bpe }
    }

    pub fn count(&self, text: &str) -> usize {
        match &self.bpe {
            Some(bpe) => bpe.encode_ordinary(text).len(),
            // ~4 characters per token is the usual rule of thumb.
            None => text.len().div_ceil(4),
        }
    }
}
