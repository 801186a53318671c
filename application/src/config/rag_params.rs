//! RAG parameters: history windows, retrieval depth and call bounds.
//!
//! [`RagParams`] groups the static parameters that control
//! [`RespondUseCase`](crate::use_cases::respond::RespondUseCase). The two
//! history windows are independent: the retrieval query and the answer
//! prompt can look back a different number of turns.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagParams {
    /// Turns of history prepended to the retrieval query.
    pub retrieval_history_turns: usize,
    /// Number of lore chunks retrieved per request.
    pub top_k: usize,
    /// Turns of history rendered into the answer prompt.
    pub prompt_history_turns: usize,
    /// Bound on each model call (classifier and answer). `None` waits forever.
    pub llm_timeout: Option<Duration>,
    /// Bound on the retrieval call.
    pub retrieval_timeout: Option<Duration>,
}

impl Default for RagParams {
    fn default() -> Self {
        Self {
            retrieval_history_turns: 4,
            top_k: 3,
            prompt_history_turns: 6,
            llm_timeout: Some(Duration::from_secs(60)),
            retrieval_timeout: Some(Duration::from_secs(15)),
        }
    }
}

impl RagParams {
    // ==================== Builder Methods ====================

    pub fn with_retrieval_history_turns(mut self, turns: usize) -> Self {
        self.retrieval_history_turns = turns;
        self
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn with_prompt_history_turns(mut self, turns: usize) -> Self {
        self.prompt_history_turns = turns;
        self
    }

    pub fn with_llm_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.llm_timeout = timeout;
        self
    }

    pub fn with_retrieval_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.retrieval_timeout = timeout;
        self
    }
}
