//! Agent identity and council roster

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque identifier of one text-generation agent (Value Object)
///
/// Usually the provider's model name, e.g. `"meta-llama/Llama-3.1-8B-Instruct"`.
/// The id is passed through to the completion service untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display name for narrow UIs
    ///
    /// E.g., "meta-llama/Llama-3.1-8B-Instruct" -> "Llama-3.1-8B-Instruct"
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        AgentId::new(s)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        AgentId(s)
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Role an agent plays in a deliberation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Answers, votes, and can be eliminated
    Member,
    /// Decides eliminations and, by default, synthesizes
    Arbiter,
}

impl AgentRole {
    pub fn as_str(&self) -> &str {
        match self {
            AgentRole::Member => "member",
            AgentRole::Arbiter => "arbiter",
        }
    }
}

/// The fixed set of agents taking part in one deliberation
///
/// The arbiter may or may not also be a member. `synthesizer` overrides who
/// merges the answers when two agents survive; without it the arbiter does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilRoster {
    pub members: Vec<AgentId>,
    pub arbiter: AgentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthesizer: Option<AgentId>,
}

impl CouncilRoster {
    pub fn new(members: Vec<AgentId>, arbiter: impl Into<AgentId>) -> Self {
        Self {
            members,
            arbiter: arbiter.into(),
            synthesizer: None,
        }
    }

    /// Override the synthesizer used for the two-survivor shortcut
    pub fn with_synthesizer(mut self, synthesizer: impl Into<AgentId>) -> Self {
        self.synthesizer = Some(synthesizer.into());
        self
    }

    /// Agent that synthesizes when no single survivor remains
    pub fn default_synthesizer(&self) -> &AgentId {
        self.synthesizer.as_ref().unwrap_or(&self.arbiter)
    }

    /// All roles the given agent plays
    pub fn roles_of(&self, id: &AgentId) -> Vec<AgentRole> {
        let mut roles = Vec::new();
        if self.members.contains(id) {
            roles.push(AgentRole::Member);
        }
        if &self.arbiter == id {
            roles.push(AgentRole::Arbiter);
        }
        roles
    }

    /// Validate the roster before any round starts
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.members.is_empty() {
            return Err(DomainError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for member in &self.members {
            if member.as_str().trim().is_empty() {
                return Err(DomainError::InvalidAgent);
            }
            if !seen.insert(member) {
                return Err(DomainError::DuplicateAgent(member.to_string()));
            }
        }

        if self.arbiter.as_str().trim().is_empty() {
            return Err(DomainError::InvalidAgent);
        }
        if let Some(synth) = &self.synthesizer
            && synth.as_str().trim().is_empty()
        {
            return Err(DomainError::InvalidAgent);
        }

        Ok(())
    }
}
