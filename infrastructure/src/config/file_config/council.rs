//! Council roster configuration from TOML (`[council]` section)

use super::super::issue::{ConfigIssue, ConfigIssueCode};
use council_domain::{AgentId, CouncilRoster, ParserKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Who sits on the council
///
/// # Example
///
/// ```toml
/// [council]
/// members = ["meta-llama/Llama-3.1-8B-Instruct", "Qwen/Qwen2.5-7B-Instruct", "mistralai/Mistral-7B-Instruct-v0.3"]
/// arbiter = "meta-llama/Llama-3.3-70B-Instruct"
/// synthesizer = "meta-llama/Llama-3.3-70B-Instruct"   # optional
/// elimination_parser = "enumeration_order"            # or "marker_line"
/// parallel = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Member agent ids, in roster order
    pub members: Vec<String>,
    /// Agent that decides eliminations
    pub arbiter: Option<String>,
    /// Agent that merges two survivors (defaults to the arbiter)
    pub synthesizer: Option<String>,
    /// Strategy for reading the arbiter's decision
    pub elimination_parser: ParserKind,
    /// Issue per-agent calls of a phase concurrently
    pub parallel: bool,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            arbiter: None,
            synthesizer: None,
            elimination_parser: ParserKind::default(),
            parallel: true,
        }
    }
}

impl FileCouncilConfig {
    /// Build the roster, or `None` when no arbiter is configured
    pub fn to_roster(&self) -> Option<CouncilRoster> {
        let arbiter = self.arbiter.as_deref()?;
        let members = self
            .members
            .iter()
            .map(|m| AgentId::new(m.trim()))
            .collect();
        let roster = CouncilRoster::new(members, arbiter.trim());
        Some(match self.synthesizer.as_deref() {
            Some(synth) => roster.with_synthesizer(synth.trim()),
            None => roster,
        })
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.members.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoMembers,
                "council.members: no council members configured",
            ));
        }

        let mut seen = HashSet::new();
        for member in &self.members {
            if member.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyAgentId {
                        field: "members".to_string(),
                    },
                    "council.members: agent id cannot be empty",
                ));
            } else if !seen.insert(member.trim()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateMember {
                        id: member.clone(),
                    },
                    format!("council.members: '{}' is listed more than once", member),
                ));
            }
        }

        match self.arbiter.as_deref() {
            None => issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingArbiter,
                "council.arbiter: no arbiter configured",
            )),
            Some(a) if a.trim().is_empty() => issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyAgentId {
                    field: "arbiter".to_string(),
                },
                "council.arbiter: agent id cannot be empty",
            )),
            Some(_) => {}
        }

        if let Some(synth) = &self.synthesizer
            && synth.trim().is_empty()
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyAgentId {
                    field: "synthesizer".to_string(),
                },
                "council.synthesizer: agent id cannot be empty",
            ));
        }

        issues
    }
}
