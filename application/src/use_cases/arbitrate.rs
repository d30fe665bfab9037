//! Arbitration phase
//!
//! The arbiter sees every answer with its agent id and the raw votes, and
//! names one agent to eliminate. Its text is turned into a decision by the
//! configured [`EliminationParser`]; if that fails (or the arbiter call
//! itself fails) the last candidate in answer order is eliminated.

use crate::config::CouncilParams;
use crate::ports::completion::CompletionService;
use crate::use_cases::shared::complete_text;
use council_domain::{
    ARBITER_CALL_FAILED, AgentId, Answer, EliminationDecision, EliminationParser, Message,
    PromptTemplate, truncate,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Turns answers and votes into exactly one [`EliminationDecision`]
pub struct ArbiterJudge<C: CompletionService + 'static> {
    service: Arc<C>,
    arbiter: AgentId,
    parser: Arc<dyn EliminationParser>,
    params: CouncilParams,
}

impl<C: CompletionService + 'static> ArbiterJudge<C> {
    pub fn new(
        service: Arc<C>,
        arbiter: AgentId,
        parser: Arc<dyn EliminationParser>,
        params: CouncilParams,
    ) -> Self {
        Self {
            service,
            arbiter,
            parser,
            params,
        }
    }

    /// Decide who leaves the council this round
    ///
    /// Always returns a decision naming one of the agents in `answers`, which
    /// must not be empty. Release builds answer an empty list without calling
    /// the arbiter, with a fallback decision naming the arbiter itself that
    /// removes nobody from the council.
    pub async fn decide(
        &self,
        question: &str,
        answers: &[Answer],
        vote_lines: &[String],
        round: u32,
    ) -> EliminationDecision {
        debug_assert!(!answers.is_empty(), "arbitration needs at least one candidate");
        let candidates: Vec<AgentId> = answers.iter().map(|a| a.agent.clone()).collect();
        let Some(fallback) = candidates.last().cloned() else {
            warn!(round, "No candidates to arbitrate");
            return EliminationDecision::fallback(round, self.arbiter.clone());
        };
        let labelled: Vec<(AgentId, String)> = answers
            .iter()
            .map(|a| (a.agent.clone(), a.text.clone()))
            .collect();
        let prompt = PromptTemplate::arbiter_prompt(question, &labelled, vote_lines);

        let decision_text = complete_text(
            self.service.as_ref(),
            &self.arbiter,
            &[Message::user(prompt)],
            self.params.arbiter_max_tokens,
            self.params.call_timeout,
        )
        .await;

        match decision_text {
            Some(text) => {
                if let Some(eliminated) = self.parser.parse_elimination(&text, &candidates) {
                    info!(
                        round,
                        parser = self.parser.name(),
                        "Arbiter eliminated {}",
                        eliminated
                    );
                    return EliminationDecision::parsed(round, eliminated, text);
                }
                warn!(
                    round,
                    parser = self.parser.name(),
                    "No candidate found in arbiter decision: {}",
                    truncate(&text, 200)
                );
            }
            None => warn!(round, arbiter = %self.arbiter, "{}", ARBITER_CALL_FAILED),
        }

        warn!(round, "Fallback elimination of last candidate {}", fallback);
        EliminationDecision::fallback(round, fallback)
    }
}
