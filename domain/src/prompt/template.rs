//! Prompt templates for the deliberation flow

use crate::core::agent::AgentId;
use crate::deliberation::parsing::ELIMINATE_MARKER;
use crate::session::entities::Message;

/// Follow-up turn asking an agent to refine its own previous answer
pub const REFINEMENT_INSTRUCTION: &str = "Review your previous answer. Consider that other models might have offered different perspectives. Refine your answer to be more accurate and concise.";

/// Stand-in for a previous answer that was never recorded
pub const NO_PREVIOUS_ANSWER: &str = "No previous answer.";

/// Templates for generating prompts at each phase
pub struct PromptTemplate;

impl PromptTemplate {
    /// Conversation for round 1: the question alone
    pub fn initial_messages(question: &str) -> Vec<Message> {
        vec![Message::user(question)]
    }

    /// Conversation for round 2+: question, own previous answer, refinement turn
    pub fn refinement_messages(question: &str, previous_answer: Option<&str>) -> Vec<Message> {
        vec![
            Message::user(question),
            Message::assistant(previous_answer.unwrap_or(NO_PREVIOUS_ANSWER)),
            Message::user(REFINEMENT_INSTRUCTION),
        ]
    }

    /// Shared voting prompt listing every answer under its ordinal label
    pub fn voting_prompt(question: &str, answers: &[(AgentId, String)]) -> String {
        let mut candidates = String::new();
        for (idx, (_, text)) in answers.iter().enumerate() {
            candidates.push_str(&format!("Answer #{}: {}\n---\n", idx + 1, text));
        }

        format!(
            "Question: {question}\n\n\
             Here are the proposed answers:\n{candidates}\n\
             Task: Identify the WORST answer. \
             Explain briefly why, and end your response with 'VOTE: Answer #X' where X is the number."
        )
    }

    /// Arbiter prompt: answers by agent id and ordinal, then the raw votes
    pub fn arbiter_prompt(
        question: &str,
        answers: &[(AgentId, String)],
        vote_lines: &[String],
    ) -> String {
        let mut context = format!("Question: {question}\n\n");
        for (idx, (agent, text)) in answers.iter().enumerate() {
            context.push_str(&format!("Model ID '{}' (Answer #{}): {}\n", agent, idx + 1, text));
        }

        context.push_str("\nVOICE OF THE COUNCIL (Votes):\n");
        for line in vote_lines {
            context.push_str(&format!("- {line}\n"));
        }

        format!(
            "{context}\n\n\
             You are the Grand Arbiter. Based on the answers and the peer votes, identify the single worst model. \
             First explain your reasoning in 1-2 sentences, then end with '{ELIMINATE_MARKER} [exact Model ID]' on a new line."
        )
    }

    /// Synthesis prompt
    ///
    /// `synthesizer_is_survivor` switches between "merge your own winning
    /// answer" and the neutral "merge these perspectives" wording.
    pub fn synthesis_prompt(
        question: &str,
        survivors: &[(AgentId, String)],
        eliminated: &[(AgentId, String)],
        synthesizer_is_survivor: bool,
    ) -> String {
        let mut prompt = format!("User Question: {question}\n\n");

        prompt.push_str("Surviving answers:\n");
        for (agent, text) in survivors {
            prompt.push_str(&format!("\n--- Surviving answer from {agent} ---\n{text}\n"));
        }

        if !eliminated.is_empty() {
            prompt.push_str("\nPerspectives from eliminated models:\n");
            for (agent, text) in eliminated {
                prompt.push_str(&format!(
                    "\n--- Eliminated perspective from {agent} ---\n{text}\n"
                ));
            }
        }

        let task = if synthesizer_is_survivor {
            "Task: You won the council's deliberation. Synthesize your own winning answer together with \
             any valid points from the eliminated models into one comprehensive, accurate master answer. \
             Reconcile conflicting claims and drop anything that is wrong."
        } else {
            "Task: Synthesize these perspectives into one comprehensive, accurate master answer. \
             Give the surviving answers the most weight, keep valid points from the eliminated \
             models, and reconcile any conflicting claims."
        };

        prompt.push('\n');
        prompt.push_str(task);
        prompt
    }
}
