//! Elimination target parsing.
//!
//! The arbiter answers in free text and is asked to finish with
//! `ELIMINATE: <exact agent id>`. Turning that text into an agent id is a
//! heuristic, so it sits behind [`EliminationParser`] and can be swapped
//! without touching the round loop.
//!
//! | Parser | Rule |
//! |--------|------|
//! | [`EnumerationOrderParser`] | First candidate, in roster order, that occurs anywhere in the text |
//! | [`MarkerLineParser`] | Longest candidate found after the last `ELIMINATE:` marker |

use crate::core::agent::AgentId;
use serde::{Deserialize, Serialize};

/// Marker the arbiter is asked to end its decision with
pub const ELIMINATE_MARKER: &str = "ELIMINATE:";

/// Strategy for extracting the eliminated agent from arbiter text
pub trait EliminationParser: Send + Sync {
    /// Pick one of `candidates` from `decision_text`, or `None` if nothing matches
    fn parse_elimination(&self, decision_text: &str, candidates: &[AgentId]) -> Option<AgentId>;

    /// Short identifier for logs
    fn name(&self) -> &'static str;
}

/// Substring match in candidate enumeration order (default).
///
/// Candidates are tried in the order given; the first whose id occurs
/// anywhere in the text wins, regardless of where in the text it occurs.
/// Prose that mentions another agent before the marker line, or an id that
/// is a substring of another id, can therefore select an unintended agent.
/// This is the established behavior and is kept as the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumerationOrderParser;

impl EliminationParser for EnumerationOrderParser {
    fn parse_elimination(&self, decision_text: &str, candidates: &[AgentId]) -> Option<AgentId> {
        candidates
            .iter()
            .find(|id| decision_text.contains(id.as_str()))
            .cloned()
    }

    fn name(&self) -> &'static str {
        "enumeration_order"
    }
}

/// Only considers text after the last `ELIMINATE:` marker.
///
/// Among candidates found there, the longest id wins so that `gpt-4` does
/// not shadow `gpt-4o`. Ties keep enumeration order. Without a marker
/// nothing is parsed and the caller falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerLineParser;

impl EliminationParser for MarkerLineParser {
    fn parse_elimination(&self, decision_text: &str, candidates: &[AgentId]) -> Option<AgentId> {
        let start = decision_text.rfind(ELIMINATE_MARKER)? + ELIMINATE_MARKER.len();
        let tail = decision_text[start..].lines().next().unwrap_or_default();

        let mut best: Option<&AgentId> = None;
        for id in candidates {
            if tail.contains(id.as_str()) && best.is_none_or(|b| id.as_str().len() > b.as_str().len())
            {
                best = Some(id);
            }
        }
        best.cloned()
    }

    fn name(&self) -> &'static str {
        "marker_line"
    }
}

/// Configurable choice of parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    #[default]
    EnumerationOrder,
    MarkerLine,
}

impl ParserKind {
    pub fn as_str(&self) -> &str {
        match self {
            ParserKind::EnumerationOrder => "enumeration_order",
            ParserKind::MarkerLine => "marker_line",
        }
    }

    /// Instantiate the selected strategy
    pub fn build(&self) -> Box<dyn EliminationParser> {
        match self {
            ParserKind::EnumerationOrder => Box::new(EnumerationOrderParser),
            ParserKind::MarkerLine => Box::new(MarkerLineParser),
        }
    }
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ParserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "enumeration_order" | "enumeration" | "substring" => Ok(ParserKind::EnumerationOrder),
            "marker_line" | "marker" | "strict" => Ok(ParserKind::MarkerLine),
            other => Err(format!("unknown elimination parser '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<AgentId> {
        names.iter().map(|n| AgentId::from(*n)).collect()
    }

    // ==================== EnumerationOrderParser ====================

    #[test]
    fn test_enumeration_parser_simple() {
        let parsed = EnumerationOrderParser
            .parse_elimination("Too vague.\nELIMINATE: model-c", &ids(&["model-a", "model-c"]));
        assert_eq!(parsed, Some(AgentId::from("model-c")));
    }

    #[test]
    fn test_enumeration_order_beats_text_position() {
        // "model-c" appears first in the text, but "model-a" comes first in the roster
        let text = "model-c made a fair point, but model-a was wrong.\nELIMINATE: model-c";
        let parsed = EnumerationOrderParser.parse_elimination(text, &ids(&["model-a", "model-c"]));
        assert_eq!(parsed, Some(AgentId::from("model-a")));
    }

    #[test]
    fn test_enumeration_substring_containment() {
        // "gpt-4" is contained in "gpt-4o" and is enumerated first
        let parsed =
            EnumerationOrderParser.parse_elimination("ELIMINATE: gpt-4o", &ids(&["gpt-4", "gpt-4o"]));
        assert_eq!(parsed, Some(AgentId::from("gpt-4")));
    }

    #[test]
    fn test_enumeration_no_match() {
        let parsed = EnumerationOrderParser.parse_elimination("I cannot decide.", &ids(&["a1", "b2"]));
        assert_eq!(parsed, None);
    }

    // ==================== MarkerLineParser ====================

    #[test]
    fn test_marker_parser_ignores_prose() {
        let text = "model-a made a fair point, but model-c was wrong.\nELIMINATE: model-c";
        let parsed = MarkerLineParser.parse_elimination(text, &ids(&["model-a", "model-c"]));
        assert_eq!(parsed, Some(AgentId::from("model-c")));
    }

    #[test]
    fn test_marker_parser_prefers_longest_id() {
        let parsed =
            MarkerLineParser.parse_elimination("ELIMINATE: gpt-4o", &ids(&["gpt-4", "gpt-4o"]));
        assert_eq!(parsed, Some(AgentId::from("gpt-4o")));
    }

    #[test]
    fn test_marker_parser_requires_marker() {
        let parsed = MarkerLineParser.parse_elimination("model-a is worst", &ids(&["model-a"]));
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_marker_parser_uses_last_marker() {
        let text = "Format is ELIMINATE: <id>.\nELIMINATE: [model-b]";
        let parsed = MarkerLineParser.parse_elimination(text, &ids(&["model-a", "model-b"]));
        assert_eq!(parsed, Some(AgentId::from("model-b")));
    }

    // ==================== ParserKind ====================

    #[test]
    fn test_parser_kind_from_str() {
        assert_eq!("enumeration_order".parse(), Ok(ParserKind::EnumerationOrder));
        assert_eq!("marker-line".parse(), Ok(ParserKind::MarkerLine));
        assert!("nope".parse::<ParserKind>().is_err());
    }

    #[test]
    fn test_parser_kind_build() {
        assert_eq!(ParserKind::default().build().name(), "enumeration_order");
        assert_eq!(ParserKind::MarkerLine.build().name(), "marker_line");
    }
}
