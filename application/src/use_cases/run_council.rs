//! Run Council use case
//!
//! Drives the full deliberation: answering, voting and elimination rounds
//! until one agent (or the two-survivor shortcut) remains, then the final
//! synthesis. This is the only component that mutates [`DeliberationState`].

use crate::config::CouncilParams;
use crate::ports::completion::CompletionService;
use crate::ports::event_sink::{ChannelEventSink, EventSink, NoEvents};
use crate::use_cases::arbitrate::ArbiterJudge;
use crate::use_cases::collect_answers::AnswerCollector;
use crate::use_cases::collect_votes::VotingCoordinator;
use crate::use_cases::shared::until_cancelled;
use crate::use_cases::synthesize::EnsembleSynthesizer;
use council_domain::{
    AgentId, Answer, CouncilOutcome, CouncilRoster, DeliberationEvent, DeliberationState,
    DomainError, FinalResult, ParserKind, Phase, Question, RoundRecord,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that end a deliberation
///
/// Per-agent failures never show up here; they are absorbed inside the
/// round as sentinels or fallbacks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunCouncilError {
    #[error("Invalid council configuration: {0}")]
    Configuration(#[from] DomainError),

    #[error("Deliberation cancelled during round {round}")]
    Cancelled { round: u32 },
}

impl RunCouncilError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunCouncilError::Cancelled { .. })
    }
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The question to put to the council
    pub question: String,
    /// Members, arbiter and optional synthesizer override
    pub roster: CouncilRoster,
    /// Per-call limits and concurrency
    pub params: CouncilParams,
    /// How the arbiter's decision text is resolved to an agent
    pub parser: ParserKind,
}

impl RunCouncilInput {
    pub fn new(question: impl Into<String>, roster: CouncilRoster) -> Self {
        Self {
            question: question.into(),
            roster,
            params: CouncilParams::default(),
            parser: ParserKind::default(),
        }
    }

    pub fn with_params(mut self, params: CouncilParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_parser(mut self, parser: ParserKind) -> Self {
        self.parser = parser;
        self
    }
}

/// A deliberation running on its own task
///
/// `events` yields every [`DeliberationEvent`] as it happens and closes once
/// the task finishes; `handle` resolves to the final outcome.
pub struct CouncilStream {
    pub events: mpsc::UnboundedReceiver<DeliberationEvent>,
    pub handle: JoinHandle<Result<CouncilOutcome, RunCouncilError>>,
}

/// Use case for running a council deliberation
pub struct RunCouncilUseCase<C: CompletionService + 'static> {
    service: Arc<C>,
}

impl<C: CompletionService + 'static> Clone for RunCouncilUseCase<C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<C: CompletionService + 'static> RunCouncilUseCase<C> {
    pub fn new(service: Arc<C>) -> Self {
        Self { service }
    }

    /// Execute the use case without events or cancellation
    pub async fn execute(&self, input: RunCouncilInput) -> Result<CouncilOutcome, RunCouncilError> {
        self.execute_with_events(input, &NoEvents, &CancellationToken::new())
            .await
    }

    /// Run the deliberation on a spawned task, streaming its events
    pub fn stream(&self, input: RunCouncilInput, cancel: CancellationToken) -> CouncilStream {
        let (sink, events) = ChannelEventSink::channel();
        let use_case = self.clone();
        let handle = tokio::spawn(async move {
            use_case.execute_with_events(input, &sink, &cancel).await
        });
        CouncilStream { events, handle }
    }

    /// Execute the use case, reporting every step to `events`
    ///
    /// Configuration is validated before anything is emitted. Cancelling
    /// `cancel` aborts the phase in flight, discards its partial results and
    /// emits [`DeliberationEvent::Aborted`].
    pub async fn execute_with_events(
        &self,
        input: RunCouncilInput,
        events: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<CouncilOutcome, RunCouncilError> {
        let question = Question::try_new(input.question)?;
        let roster = input.roster;
        let mut state = DeliberationState::new(&roster)?;
        let params = input.params;

        let collector = AnswerCollector::new(Arc::clone(&self.service), params.clone());
        let voting = VotingCoordinator::new(Arc::clone(&self.service), params.clone());
        let judge = ArbiterJudge::new(
            Arc::clone(&self.service),
            roster.arbiter.clone(),
            Arc::from(input.parser.build()),
            params.clone(),
        );
        let synthesizer = EnsembleSynthesizer::new(Arc::clone(&self.service), params);

        info!(
            members = roster.members.len(),
            arbiter = %roster.arbiter,
            parser = %input.parser,
            "Starting council deliberation"
        );
        events.emit(&DeliberationEvent::Started {
            question: question.content().to_string(),
            members: roster.members.clone(),
            arbiter: roster.arbiter.clone(),
        });

        let q = question.content();
        let mut rounds: Vec<RoundRecord> = Vec::new();
        let mut open_round: Option<RoundRecord> = None;
        let mut final_result: Option<FinalResult> = None;
        let mut phase = state.initial_phase();

        loop {
            let round = state.round();
            debug!(round, phase = %phase, active = state.active().len(), "Entering phase");

            match phase {
                Phase::Answering => {
                    events.emit(&DeliberationEvent::RoundStarted {
                        round,
                        active: state.active().to_vec(),
                    });
                    events.emit(&DeliberationEvent::PhaseStarted { round, phase });

                    let previous: HashMap<AgentId, String> = state
                        .active()
                        .iter()
                        .filter_map(|id| state.last_answer(id).map(|t| (id.clone(), t.to_string())))
                        .collect();
                    let answers = guarded(
                        cancel,
                        events,
                        round,
                        collector.collect(q, state.active(), round, &previous, events),
                    )
                    .await?;

                    state.record_answers(&answers);
                    open_round = Some(RoundRecord::new(round, answers));
                }

                Phase::Voting => {
                    events.emit(&DeliberationEvent::PhaseStarted { round, phase });

                    let answers = round_answers(&open_round);
                    let ballot = guarded(
                        cancel,
                        events,
                        round,
                        voting.collect(q, answers, round, events),
                    )
                    .await?;

                    events.emit(&DeliberationEvent::VotesCollected {
                        round,
                        votes: ballot.vote_lines.clone(),
                    });
                    open_round = open_round.map(|record| record.with_ballot(ballot));
                }

                Phase::Arbitrating => {
                    events.emit(&DeliberationEvent::PhaseStarted { round, phase });

                    let answers = round_answers(&open_round);
                    let vote_lines = open_round
                        .as_ref()
                        .and_then(|record| record.ballot.as_ref())
                        .map(|ballot| ballot.vote_lines.as_slice())
                        .unwrap_or_default();
                    events.emit(&DeliberationEvent::ArbiterThinking {
                        round,
                        arbiter: roster.arbiter.clone(),
                    });
                    let decision = guarded(
                        cancel,
                        events,
                        round,
                        judge.decide(q, answers, vote_lines, round),
                    )
                    .await?;

                    events.emit(&DeliberationEvent::EliminationDecided {
                        round,
                        eliminated: decision.eliminated.clone(),
                        reasoning: decision.reasoning.clone(),
                        resolution: decision.resolution,
                    });

                    if state.apply_elimination(&decision) {
                        info!(
                            round,
                            eliminated = %decision.eliminated,
                            remaining = state.active().len(),
                            "Eliminated {} ({})",
                            decision.eliminated,
                            decision.resolution.as_str()
                        );
                    } else {
                        warn!(
                            round,
                            "Decision named {} who is not active; nothing eliminated",
                            decision.eliminated
                        );
                    }
                    if let Some(record) = open_round.take() {
                        rounds.push(record.with_decision(decision));
                    }
                }

                Phase::Ensemble => {
                    // Shortcut round: answers only, no ballot or decision
                    if let Some(record) = open_round.take() {
                        rounds.push(record);
                    }
                    events.emit(&DeliberationEvent::PhaseStarted { round, phase });

                    let survivors = state.survivor_answers();
                    let chosen = state.synthesizer(&roster);
                    let result = guarded(
                        cancel,
                        events,
                        round,
                        synthesizer.synthesize(q, &survivors, state.archive(), &chosen),
                    )
                    .await?;

                    events.emit(&DeliberationEvent::FinalAnswer {
                        synthesizer: result.synthesizer.clone(),
                        text: result.text.clone(),
                        status: result.status(),
                        survivors: state.active().to_vec(),
                    });
                    final_result = Some(result);
                }

                Phase::Done => break,
            }

            phase = state.next_phase(phase);
        }

        let final_result =
            final_result.unwrap_or_else(|| FinalResult::failure(state.synthesizer(&roster)));
        events.emit(&DeliberationEvent::Finished);
        info!(
            rounds = rounds.len(),
            synthesizer = %final_result.synthesizer,
            success = final_result.is_success(),
            "Council deliberation finished"
        );

        Ok(CouncilOutcome {
            question: question.into_content(),
            survivors: state.active().to_vec(),
            eliminated: state.archive().to_vec(),
            roster,
            rounds,
            final_result,
        })
    }
}

/// Answers of the round in progress, in answer order
fn round_answers(open_round: &Option<RoundRecord>) -> &[Answer] {
    open_round
        .as_ref()
        .map(|record| record.answers.as_slice())
        .unwrap_or_default()
}

/// Race one phase against cancellation
///
/// On cancel the phase future is dropped (aborting its in-flight calls),
/// `Aborted` is emitted and nothing from the phase is kept.
async fn guarded<T>(
    cancel: &CancellationToken,
    events: &dyn EventSink,
    round: u32,
    work: impl Future<Output = T>,
) -> Result<T, RunCouncilError> {
    match until_cancelled(cancel, work).await {
        Some(value) => Ok(value),
        None => {
            warn!(round, "Deliberation cancelled; discarding partial round");
            events.emit(&DeliberationEvent::Aborted { round });
            Err(RunCouncilError::Cancelled { round })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion::CompletionError;
    use async_trait::async_trait;
    use council_domain::{Message, Resolution};
    use std::sync::Mutex;

    /// Answers with "<agent> says hi", votes for #1, arbiter names nobody
    #[derive(Default)]
    struct PoliteService {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl CompletionService for PoliteService {
        async fn complete(
            &self,
            agent: &AgentId,
            messages: &[Message],
            _max_output_tokens: u32,
        ) -> Result<String, CompletionError> {
            *self.calls.lock().unwrap() += 1;
            let prompt = &messages[messages.len() - 1].content;
            if prompt.contains("VOTE: Answer #X") {
                Ok("VOTE: Answer #1".to_string())
            } else if prompt.contains("Grand Arbiter") {
                Ok("Hmm.".to_string())
            } else {
                Ok(format!("{agent} says hi"))
            }
        }
    }

    fn roster(names: &[&str]) -> CouncilRoster {
        CouncilRoster::new(names.iter().map(|n| AgentId::from(*n)).collect(), "judge")
    }

    #[tokio::test]
    async fn test_rejects_empty_question_before_any_call() {
        let service = Arc::new(PoliteService::default());
        let use_case = RunCouncilUseCase::new(Arc::clone(&service));

        let err = use_case
            .execute(RunCouncilInput::new("   ", roster(&["a", "b"])))
            .await
            .unwrap_err();

        assert_eq!(err, RunCouncilError::Configuration(DomainError::EmptyQuestion));
        assert_eq!(*service.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rejects_empty_roster() {
        let use_case = RunCouncilUseCase::new(Arc::new(PoliteService::default()));

        let err = use_case
            .execute(RunCouncilInput::new("Q?", roster(&[])))
            .await
            .unwrap_err();
        assert_eq!(err, RunCouncilError::Configuration(DomainError::EmptyRoster));
    }

    #[tokio::test]
    async fn test_fallback_eliminates_last_until_one_remains() {
        let use_case = RunCouncilUseCase::new(Arc::new(PoliteService::default()));

        let outcome = use_case
            .execute(RunCouncilInput::new("Q?", roster(&["a", "b", "c"])))
            .await
            .unwrap();

        // 3 -> fallback removes c -> a, b take the shortcut
        assert_eq!(outcome.rounds.len(), 2);
        assert_eq!(outcome.fallback_count(), 1);
        let decision = outcome.rounds[0].decision.as_ref().unwrap();
        assert_eq!(decision.eliminated.as_str(), "c");
        assert_eq!(decision.resolution, Resolution::Fallback);
        assert!(outcome.rounds[1].is_shortcut());

        let survivors: Vec<_> = outcome.survivors.iter().map(|a| a.as_str()).collect();
        assert_eq!(survivors, vec!["a", "b"]);
        assert_eq!(outcome.final_result.synthesizer.as_str(), "judge");
    }

    #[tokio::test]
    async fn test_single_member_synthesizes_directly() {
        let service = Arc::new(PoliteService::default());
        let use_case = RunCouncilUseCase::new(Arc::clone(&service));

        let outcome = use_case
            .execute(RunCouncilInput::new("Q?", roster(&["solo"])))
            .await
            .unwrap();

        assert!(outcome.rounds.is_empty());
        assert_eq!(outcome.final_result.synthesizer.as_str(), "solo");
        assert_eq!(*service.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_emits_aborted() {
        let service = Arc::new(PoliteService::default());
        let use_case = RunCouncilUseCase::new(Arc::clone(&service));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut stream = use_case.stream(RunCouncilInput::new("Q?", roster(&["a", "b", "c"])), cancel);
        let result = stream.handle.await.unwrap();
        assert_eq!(result.unwrap_err(), RunCouncilError::Cancelled { round: 1 });

        let mut names = Vec::new();
        while let Some(event) = stream.events.recv().await {
            names.push(event.name());
        }
        assert_eq!(names, vec!["started", "round_started", "phase_started", "aborted"]);
        assert_eq!(*service.calls.lock().unwrap(), 0);
    }
}
