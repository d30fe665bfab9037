//! Ensemble phase
//!
//! One agent merges the surviving answers with the perspectives of every
//! eliminated agent into the final response.

use crate::config::CouncilParams;
use crate::ports::completion::CompletionService;
use crate::use_cases::shared::complete_text;
use council_domain::{AgentId, ArchivedAnswer, FinalResult, Message, PromptTemplate};
use std::sync::Arc;
use tracing::{info, warn};

/// Produces the [`FinalResult`] of a deliberation
pub struct EnsembleSynthesizer<C: CompletionService + 'static> {
    service: Arc<C>,
    params: CouncilParams,
}

impl<C: CompletionService + 'static> EnsembleSynthesizer<C> {
    pub fn new(service: Arc<C>, params: CouncilParams) -> Self {
        Self { service, params }
    }

    /// Ask `synthesizer` for the master answer
    ///
    /// A failed call yields a failed [`FinalResult`]; no other agent is
    /// asked in its place.
    pub async fn synthesize(
        &self,
        question: &str,
        survivors: &[(AgentId, String)],
        archive: &[ArchivedAnswer],
        synthesizer: &AgentId,
    ) -> FinalResult {
        let eliminated: Vec<(AgentId, String)> = archive
            .iter()
            .map(|a| (a.agent.clone(), a.text.clone()))
            .collect();
        let synthesizer_is_survivor =
            matches!(survivors, [(only, _)] if only == synthesizer);

        info!(
            synthesizer = %synthesizer,
            "Synthesizing {} surviving and {} eliminated answers",
            survivors.len(),
            eliminated.len()
        );

        let prompt = PromptTemplate::synthesis_prompt(
            question,
            survivors,
            &eliminated,
            synthesizer_is_survivor,
        );

        match complete_text(
            self.service.as_ref(),
            synthesizer,
            &[Message::user(prompt)],
            self.params.synthesis_max_tokens,
            self.params.call_timeout,
        )
        .await
        {
            Some(text) => FinalResult::success(synthesizer.clone(), text),
            None => {
                warn!(synthesizer = %synthesizer, "Synthesis failed");
                FinalResult::failure(synthesizer.clone())
            }
        }
    }
}
