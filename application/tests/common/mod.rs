//! Scripted completion service shared by the deliberation scenario tests

#![allow(dead_code)]

use async_trait::async_trait;
use council_application::{CompletionError, CompletionService, EventSink};
use council_domain::{AgentId, DeliberationEvent, Message};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Which deliberation step a request belongs to, inferred from its prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Answer,
    Vote,
    Arbiter,
    Synthesis,
}

impl CallKind {
    pub fn classify(messages: &[Message]) -> Self {
        let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        if messages.len() > 1 {
            CallKind::Answer
        } else if last.contains("VOTE: Answer #X") {
            CallKind::Vote
        } else if last.contains("Grand Arbiter") {
            CallKind::Arbiter
        } else if last.contains("Synthesize") {
            CallKind::Synthesis
        } else {
            CallKind::Answer
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub agent: AgentId,
    pub kind: CallKind,
    pub messages: Vec<Message>,
    pub max_output_tokens: u32,
}

/// Completion service driven by per-(agent, kind) scripts
///
/// Unscripted calls get a default reply: answers are numbered per agent
/// ("<agent> answer #n"), votes pick Answer #1, the arbiter and the
/// synthesizer reply with fixed text.
#[derive(Default)]
pub struct ScriptedCompletion {
    scripts: Mutex<HashMap<(AgentId, CallKind), VecDeque<Result<String, CompletionError>>>>,
    failing_kinds: Mutex<Vec<CallKind>>,
    answer_counts: Mutex<HashMap<AgentId, usize>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one reply for the next `kind` call to `agent`
    pub fn script(self, agent: &str, kind: CallKind, reply: &str) -> Self {
        self.push(agent, kind, Ok(reply.to_string()));
        self
    }

    /// Queue one failure for the next `kind` call to `agent`
    pub fn script_failure(self, agent: &str, kind: CallKind) -> Self {
        self.push(
            agent,
            kind,
            Err(CompletionError::Transport("scripted failure".to_string())),
        );
        self
    }

    /// Fail every unscripted call of this kind
    pub fn fail_all(self, kind: CallKind) -> Self {
        self.failing_kinds.lock().unwrap().push(kind);
        self
    }

    fn push(&self, agent: &str, kind: CallKind, reply: Result<String, CompletionError>) {
        self.scripts
            .lock()
            .unwrap()
            .entry((AgentId::from(agent), kind))
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, kind: CallKind) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.kind == kind).collect()
    }

    pub fn agents_called(&self, kind: CallKind) -> Vec<String> {
        self.calls_of(kind)
            .into_iter()
            .map(|c| c.agent.to_string())
            .collect()
    }

    fn default_reply(&self, agent: &AgentId, kind: CallKind) -> Result<String, CompletionError> {
        if self.failing_kinds.lock().unwrap().contains(&kind) {
            return Err(CompletionError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        match kind {
            CallKind::Answer => {
                let mut counts = self.answer_counts.lock().unwrap();
                let n = counts.entry(agent.clone()).or_insert(0);
                *n += 1;
                Ok(format!("{agent} answer #{n}"))
            }
            CallKind::Vote => Ok("Weakest reasoning.\nVOTE: Answer #1".to_string()),
            CallKind::Arbiter => Ok("No decision.".to_string()),
            CallKind::Synthesis => Ok("The council's master answer.".to_string()),
        }
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(
        &self,
        agent: &AgentId,
        messages: &[Message],
        max_output_tokens: u32,
    ) -> Result<String, CompletionError> {
        let kind = CallKind::classify(messages);
        self.calls.lock().unwrap().push(RecordedCall {
            agent: agent.clone(),
            kind,
            messages: messages.to_vec(),
            max_output_tokens,
        });

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&(agent.clone(), kind))
            .and_then(|queue| queue.pop_front());
        match scripted {
            Some(reply) => reply,
            None => self.default_reply(agent, kind),
        }
    }
}

/// Event sink that keeps everything it sees
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DeliberationEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<DeliberationEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &DeliberationEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn ids(names: &[&str]) -> Vec<AgentId> {
    names.iter().map(|n| AgentId::from(*n)).collect()
}
