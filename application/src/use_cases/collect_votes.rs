//! Voting phase
//!
//! Answers are relabelled "Answer #1..N" in answer order and every active
//! agent (including the author of each answer) names the worst one. The raw
//! vote text is kept as-is; resolving ordinals is the arbiter's job.

use crate::config::CouncilParams;
use crate::ports::completion::CompletionService;
use crate::ports::event_sink::EventSink;
use crate::use_cases::shared::fan_out;
use council_domain::{Answer, Ballot, BallotEntry, DeliberationEvent, Message, PromptTemplate};
use std::sync::Arc;
use tracing::info;

/// Runs the anonymized worst-answer vote
pub struct VotingCoordinator<C: CompletionService + 'static> {
    service: Arc<C>,
    params: CouncilParams,
}

impl<C: CompletionService + 'static> VotingCoordinator<C> {
    pub fn new(service: Arc<C>, params: CouncilParams) -> Self {
        Self { service, params }
    }

    /// Ask every answering agent to vote on `answers`
    ///
    /// The ordinal map follows the order of `answers` exactly. A voter whose
    /// call fails is recorded with the failure sentinel. Each `AgentVoted` is
    /// emitted to `events` as soon as that vote is in.
    pub async fn collect(
        &self,
        question: &str,
        answers: &[Answer],
        round: u32,
        events: &dyn EventSink,
    ) -> Ballot {
        info!(round, "Starting voting phase with {} voters", answers.len());

        let candidates: Vec<_> = answers
            .iter()
            .map(|a| (a.agent.clone(), a.text.clone()))
            .collect();
        let prompt = PromptTemplate::voting_prompt(question, &candidates);
        let ordinal_map = candidates.into_iter().map(|(agent, _)| agent).collect();

        let requests = answers
            .iter()
            .map(|a| (a.agent.clone(), vec![Message::user(prompt.clone())]))
            .collect();

        let entries = fan_out(
            &self.service,
            requests,
            self.params.vote_max_tokens,
            &self.params,
            |_| {},
            |voter, text| {
                let entry = BallotEntry::from_outcome(voter.clone(), text.map(str::to_string));
                events.emit(&DeliberationEvent::AgentVoted {
                    round,
                    agent: entry.voter,
                    vote: entry.raw_vote,
                    status: entry.status,
                })
            },
        )
        .await
        .into_iter()
        .map(|(voter, text)| BallotEntry::from_outcome(voter, text))
        .collect();

        let ballot = Ballot::new(ordinal_map, entries);
        info!(
            round,
            "Voting complete: {}/{} successful votes",
            ballot.successful_votes(),
            ballot.entries.len()
        );
        ballot
    }
}
