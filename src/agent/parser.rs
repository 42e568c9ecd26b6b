//! Completion parsing: turn raw model output into a typed [`Action`].
//!
//! A small marker-oriented parser over the literal wire tokens; no regex.
//! The final-answer check comes first and is unconditional: a completion
//! containing both a final answer and an action always terminates the run.

use super::prompt::{ACTION_INPUT_TOKEN, ACTION_TOKEN, FINAL_ANSWER_TOKEN};
use super::AgentError;

/// The parsed intent of one model completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The model declared it is done; the run terminates with this text.
    FinalAnswer(String),
    /// The model wants a tool invoked with the given input.
    ToolCall { name: String, input: String },
}

/// Parse one completion into an [`Action`].
///
/// Rules, in order:
/// 1. If `Final Answer:` appears anywhere, the answer is everything after
///    its **last** occurrence, whitespace-trimmed.
/// 2. Otherwise the first `Action:` occurrence names the tool (everything up
///    to the following `Action Input:`, with one optional pair of square
///    brackets stripped) and the input is the remainder of the completion,
///    which may span lines. The input is whitespace-trimmed, then exactly
///    one leading and one trailing double quote are removed.
/// 3. Anything else fails with [`AgentError::Unparsable`] carrying the raw
///    completion for diagnostics.
pub fn parse_completion(completion: &str) -> Result<Action, AgentError> {
    if let Some(pos) = completion.rfind(FINAL_ANSWER_TOKEN) {
        let answer = completion[pos + FINAL_ANSWER_TOKEN.len()..].trim();
        return Ok(Action::FinalAnswer(answer.to_string()));
    }

    let unparsable = || AgentError::Unparsable(completion.to_string());

    let action_pos = completion.find(ACTION_TOKEN).ok_or_else(unparsable)?;
    let rest = &completion[action_pos + ACTION_TOKEN.len()..];
    let input_pos = rest.find(ACTION_INPUT_TOKEN).ok_or_else(unparsable)?;

    let mut name = rest[..input_pos].trim();
    name = name.strip_prefix('[').unwrap_or(name);
    name = name.strip_suffix(']').unwrap_or(name);
    let name = name.trim();

    let mut input = rest[input_pos + ACTION_INPUT_TOKEN.len()..].trim();
    input = input.strip_prefix('"').unwrap_or(input);
    input = input.strip_suffix('"').unwrap_or(input);

    Ok(Action::ToolCall {
        name: name.to_string(),
        input: input.to_string(),
    })
}
