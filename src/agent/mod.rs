//! Agent module - the core request loop.
//!
//! The agent follows the ReAct pattern:
//! 1. Render a prompt with the tool list, current directory and transcript
//! 2. Call the completion model with the loop's stop sequences
//! 3. Parse the completion into a tool action or a final answer
//! 4. If an action, execute the tool and append the observation to the
//!    transcript; repeat until a final answer or the step ceiling

mod agent_loop;
mod parser;
mod prompt;

pub use agent_loop::Agent;
pub use parser::{parse_completion, Action};
pub use prompt::{
    ACTION_INPUT_TOKEN, ACTION_TOKEN, FINAL_ANSWER_TOKEN, OBSERVATION_TOKEN, THOUGHT_TOKEN,
};

use thiserror::Error;

use crate::llm::LlmError;

/// Structural failures that abort a run.
///
/// Domain-level tool failures never appear here: tools fold them into their
/// observation strings so the model can self-correct on the next iteration.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(#[from] LlmError),

    #[error("completion is not parsable for next tool use: `{0}`")]
    Unparsable(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}
