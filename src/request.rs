//! Completion request construction for both strategies.
//!
//! One builder consumes the tagged [`Strategy`] variant, so the system
//! prompt, preamble, instruction, and section markers cannot drift between
//! the two request shapes. The only difference between modes is where the
//! artifact bytes travel: inside the user turn (inline) or inside the
//! `prediction` field (hinted).

use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;

/// Which request shape to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// File contents embedded in the instruction text.
    Inline,
    /// File contents supplied only via the prediction hint channel.
    Hinted,
}

impl Strategy {
    /// Both strategies, in benchmark execution order.
    pub fn all() -> [Strategy; 2] {
        [Strategy::Inline, Strategy::Hinted]
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Hinted => write!(f, "hinted"),
        }
    }
}

/// System prompt shared by both strategies.
pub const SYSTEM_PROMPT: &str = "You are a senior software engineer. \
You carefully modify existing files with minimal, targeted changes.";

/// Closing directive shared by both strategies, so output equivalence is a
/// meaningful comparison rather than an artifact of differing instructions.
pub const OUTPUT_DIRECTIVE: &str =
    "Return the FULL updated file(s) as plain text (no markdown).";

/// Placeholder standing in for file content in hinted-mode user turns.
const HINTED_CONTENT_NOTE: &str =
    "(file content supplied via the prediction field, not in this message)";

/// One chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// A single predicted-output fragment, one per artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPart {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// The prediction hint payload: the unmodified artifact contents offered to
/// the service as a reusable draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Vec<PredictionPart>,
}

/// A chat completion request in the service's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Present only in hinted mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
}

/// Marker opening an artifact's section in the user turn.
pub fn section_start(id: &str) -> String {
    format!("=== FILE START: {} ===", id)
}

/// Marker closing an artifact's section in the user turn.
pub fn section_end(id: &str) -> String {
    format!("=== FILE END: {} ===", id)
}

/// Build the completion request for one strategy.
///
/// Artifact order is preserved: the Nth section in the user turn corresponds
/// to the Nth prediction part in hinted mode.
pub fn build_request(
    strategy: Strategy,
    model: &str,
    artifacts: &[Artifact],
    instruction: &str,
) -> CompletionRequest {
    let mut user = format!(
        "You are editing {} file{}, each delimited by FILE START/END markers below.\n\n",
        artifacts.len(),
        if artifacts.len() == 1 { "" } else { "s" },
    );

    for artifact in artifacts {
        user.push_str(&section_start(&artifact.id));
        user.push('\n');
        match strategy {
            Strategy::Inline => {
                user.push_str(&artifact.content);
                if !artifact.content.ends_with('\n') {
                    user.push('\n');
                }
            }
            Strategy::Hinted => {
                user.push_str(HINTED_CONTENT_NOTE);
                user.push('\n');
            }
        }
        user.push_str(&section_end(&artifact.id));
        user.push_str("\n\n");
    }

    user.push_str(instruction);
    user.push_str("\n\n");
    user.push_str(OUTPUT_DIRECTIVE);

    let prediction = match strategy {
        Strategy::Inline => None,
        Strategy::Hinted => Some(Prediction {
            kind: "content".to_string(),
            content: artifacts
                .iter()
                .map(|a| PredictionPart {
                    kind: "text".to_string(),
                    text: a.content.clone(),
                })
                .collect(),
        }),
    };

    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user,
            },
        ],
        prediction,
    }
}

/// Strategy A: full file contents inline in the instruction text.
pub fn build_inline(model: &str, artifacts: &[Artifact], instruction: &str) -> CompletionRequest {
    build_request(Strategy::Inline, model, artifacts, instruction)
}

/// Strategy B: file contents only in the prediction hint channel.
pub fn build_hinted(model: &str, artifacts: &[Artifact], instruction: &str) -> CompletionRequest {
    build_request(Strategy::Hinted, model, artifacts, instruction)
}
