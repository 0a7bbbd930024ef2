//! The per-request decision pipeline.
//!
//! A strict linear state machine: quota check, token-length guard,
//! classification, answer. No retries, no backtracking; each request ends in
//! exactly one terminal outcome. Policy refusals are ordinary outcomes with
//! canned reply text, deliberately kept apart from the error path so callers
//! see one uniform 200 response shape for every expected refusal.

use std::sync::Arc;

use config::Config;
use jiff::Timestamp;
use llm::{Answerer, Classifier, CompletionClient, TokenCounter, Verdict};
use rate_limit::{ClientIdentity, RateLimitManager};

const LIMITED_REPLY: &str =
    "You've reached today's question limit. Please come back tomorrow and ask me more about Alex Moreau's profile.";

const TOO_LONG_REPLY: &str =
    "That question is a bit too long for me. Please keep it to a few sentences and try again.";

const UNRELATED_REPLY: &str = "I'm sorry, I can only answer questions about Alex Moreau's profile. \
     Please ask me about their skills, certifications, projects, or experience.";

/// Terminal outcome of one admitted, well-formed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AskOutcome {
    /// Model-generated text.
    Answered(String),
    /// Daily quota exhausted; counter untouched.
    Limited,
    /// Question over the token budget; no upstream call was made.
    TooLong,
    /// Classified off-topic; the answer stage never ran.
    Unrelated,
}

impl AskOutcome {
    /// Every terminal state maps to exactly one reply payload.
    pub(crate) fn into_reply(self) -> String {
        match self {
            Self::Answered(text) => text,
            Self::Limited => LIMITED_REPLY.to_string(),
            Self::TooLong => TOO_LONG_REPLY.to_string(),
            Self::Unrelated => UNRELATED_REPLY.to_string(),
        }
    }
}

/// Owns every collaborator of the ask flow; built once at startup and shared
/// across requests. The rate limiter is the only mutable state inside.
pub(crate) struct AskPipeline {
    rate_limiter: RateLimitManager,
    token_counter: TokenCounter,
    classifier: Classifier,
    answerer: Answerer,
    max_question_tokens: usize,
}

impl AskPipeline {
    pub(crate) fn new(config: &Config) -> llm::Result<Self> {
        let client = Arc::new(CompletionClient::new(
            config.llm.base_url.clone(),
            config.llm.api_key.clone(),
        )?);

        Ok(Self {
            rate_limiter: RateLimitManager::new(config.limits.daily_limit),
            token_counter: TokenCounter::for_model(&config.llm.classifier_model),
            classifier: Classifier::new(Arc::clone(&client), config.llm.classifier_model.clone()),
            answerer: Answerer::new(client, config.llm.answer_model.clone(), config.llm.max_answer_tokens),
            max_question_tokens: config.limits.max_question_tokens,
        })
    }

    /// Run the question through the pipeline.
    ///
    /// The question is already validated as non-empty. Guard stages run
    /// before any upstream call, and classification always precedes the
    /// answer stage.
    pub(crate) async fn run(&self, question: &str, identity: &ClientIdentity) -> llm::Result<AskOutcome> {
        let decision = self.rate_limiter.check_and_increment(identity, Timestamp::now());

        if !decision.allowed {
            return Ok(AskOutcome::Limited);
        }

        let tokens = self.token_counter.count(question);

        if tokens > self.max_question_tokens {
            log::debug!("refusing question of {tokens} tokens (max {})", self.max_question_tokens);
            return Ok(AskOutcome::TooLong);
        }

        if self.classifier.classify(question).await? == Verdict::Unrelated {
            return Ok(AskOutcome::Unrelated);
        }

        let answer = self.answerer.answer(question).await?;

        Ok(AskOutcome::Answered(answer))
    }
}
