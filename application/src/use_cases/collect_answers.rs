//! Answering phase
//!
//! Every active agent answers the question. From round 2 on, each agent
//! sees only its own previous answer plus a refinement instruction.

use crate::config::CouncilParams;
use crate::ports::completion::CompletionService;
use crate::ports::event_sink::EventSink;
use crate::use_cases::shared::fan_out;
use council_domain::{AgentId, Answer, DeliberationEvent, PromptTemplate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Produces one [`Answer`] per active agent
pub struct AnswerCollector<C: CompletionService + 'static> {
    service: Arc<C>,
    params: CouncilParams,
}

impl<C: CompletionService + 'static> AnswerCollector<C> {
    pub fn new(service: Arc<C>, params: CouncilParams) -> Self {
        Self { service, params }
    }

    /// Collect this round's answers, in `active` order.
    ///
    /// `previous` maps each agent to its own latest answer and is ignored in
    /// round 1. An agent whose call fails still gets an answer slot, holding
    /// the failure sentinel. `AgentThinking` and `AgentAnswered` are emitted
    /// to `events` while the calls run.
    pub async fn collect(
        &self,
        question: &str,
        active: &[AgentId],
        round: u32,
        previous: &HashMap<AgentId, String>,
        events: &dyn EventSink,
    ) -> Vec<Answer> {
        info!(round, "Collecting answers from {} agents", active.len());

        let requests = active
            .iter()
            .map(|agent| {
                let messages = if round == 1 {
                    PromptTemplate::initial_messages(question)
                } else {
                    PromptTemplate::refinement_messages(
                        question,
                        previous.get(agent).map(String::as_str),
                    )
                };
                (agent.clone(), messages)
            })
            .collect();

        let answers: Vec<Answer> = fan_out(
            &self.service,
            requests,
            self.params.answer_max_tokens,
            &self.params,
            |agent| {
                events.emit(&DeliberationEvent::AgentThinking {
                    round,
                    agent: agent.clone(),
                })
            },
            |agent, text| {
                let answer = Answer::from_outcome(agent.clone(), round, text.map(str::to_string));
                events.emit(&DeliberationEvent::AgentAnswered {
                    round,
                    agent: answer.agent,
                    text: answer.text,
                    status: answer.status,
                })
            },
        )
        .await
        .into_iter()
        .map(|(agent, text)| Answer::from_outcome(agent, round, text))
        .collect();

        info!(
            round,
            "Answering complete: {}/{} successful",
            answers.iter().filter(|a| a.is_ok()).count(),
            answers.len()
        );
        answers
    }
}
