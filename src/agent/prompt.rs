//! Prompt template for the agent loop.
//!
//! The marker constants below are the wire format between the model and the
//! parser: the prompt instructs the model to emit them, generation stops on
//! the observation marker, and the parser pattern-matches on them. They must
//! stay byte-identical on both sides, capitalization and colon included.

pub const FINAL_ANSWER_TOKEN: &str = "Final Answer:";
pub const OBSERVATION_TOKEN: &str = "Observation:";
pub const THOUGHT_TOKEN: &str = "Thought:";
pub const ACTION_TOKEN: &str = "Action:";
pub const ACTION_INPUT_TOKEN: &str = "Action Input:";

/// Render the full prompt for one loop iteration.
///
/// `previous_responses` is the transcript of prior iterations, newline-joined;
/// empty on the first iteration.
pub fn render(
    current_directory: &str,
    sandbox_root: &str,
    tool_description: &str,
    tool_names: &str,
    request: &str,
    previous_responses: &str,
) -> String {
    format!(
        r#"You are an Agent for simple command line commands: navigate file system,
create/read/write/change/analyze files.
You are currently in this directory: {current_directory}.
Always keep in mind the current directory and if you need to change it to do the task.
Do the request given as best as you can using the following tools:

{tool_description}

You need to break down the request and iteratively execute the given tools.
Take into consideration your previous responses. Check what you have previously done, so you know what to do next.
If the observation is for example 'File not found', check if you gave the valid path or change the plan to add the file first.

If you need to delete the directory, call the Delete Directory tool from the upper directory.

If you need to analyze all files, list them, and then use that observation for knowing what to analyze.
If you analyzed a file, remember that you did that, continue with the next!
DO NOT LIST TWO TIMES IN A ROW!

Do not attempt to use the same tool with the same input twice in a row!

All the changes you do are inside the '{sandbox_root}' directory, you are prohibited to exit this directory or access anything outside of it!

Use the following format:

Request: the input request you must do
Thought: comment on what you have done and what you will do next in the plan
Action: the action to take, exactly one element of [{tool_names}]
Action Input: the input to the action

Observation: the result of the action, assess where you are in the overall plan of the request
... (this Thought/Action/Action Input/Observation repeats N times, use it until you finish the request)
Thought: I have now done the request!
Final Answer: your final statement that you've done the task requested

Begin!

Request: {request}
Thought: {previous_responses}
"#
    )
}
