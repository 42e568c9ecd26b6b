//! Core agent loop implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::llm::CompletionClient;
use crate::tools::{Session, ToolRegistry};

use super::parser::{parse_completion, Action};
use super::prompt::{self, OBSERVATION_TOKEN, THOUGHT_TOKEN};
use super::AgentError;

/// The request-driven file-system agent.
///
/// Holds the session (sandbox root + current directory) across runs: a
/// directory change made during one run is still in effect at the start of
/// the next. `run` takes `&mut self`, so at most one run is active per agent;
/// callers wanting concurrency must serialize access themselves.
pub struct Agent {
    llm: Arc<dyn CompletionClient>,
    tools: ToolRegistry,
    session: Session,
    max_steps: usize,
}

impl Agent {
    /// Create a new agent with the given model client and tool set.
    pub fn new(llm: Arc<dyn CompletionClient>, tools: ToolRegistry, config: &Config) -> Self {
        Self {
            llm,
            tools,
            session: Session::new(config.sandbox_root.clone()),
            max_steps: config.max_steps,
        }
    }

    /// Execute the full loop for one request.
    ///
    /// Returns the final-answer text, or an empty string if the step ceiling
    /// is reached without one. Structural failures (`ModelUnavailable`,
    /// `Unparsable`, `UnknownTool`) abort immediately with no partial result.
    pub async fn run(&mut self, request: &str) -> Result<String, AgentError> {
        // Both whitespace variants: model output is not normalized first.
        let stop = [
            format!("\n{}", OBSERVATION_TOKEN),
            format!("\n\t{}", OBSERVATION_TOKEN),
        ];
        let mut transcript: Vec<String> = Vec::new();

        for step in 0..self.max_steps {
            let current_dir = self.session.current_dir().display().to_string();
            let sandbox_root = self.session.root().display().to_string();
            let rendered = prompt::render(
                &current_dir,
                &sandbox_root,
                &self.tools.descriptions(),
                &self.tools.names(),
                request,
                &transcript.join("\n"),
            );

            debug!(step = step + 1, "Requesting next action from model");
            let completion = self.llm.generate(&rendered, &stop).await?;

            match parse_completion(&completion)? {
                Action::FinalAnswer(answer) => {
                    info!(steps = step + 1, "Run finished with a final answer");
                    return Ok(answer);
                }
                Action::ToolCall { name, input } => {
                    let Some(tool) = self.tools.get(&name) else {
                        warn!(tool = %name, "Model requested an unregistered tool");
                        return Err(AgentError::UnknownTool(name));
                    };
                    let observation = tool.execute(&input, &mut self.session);
                    info!(tool = %name, observation_len = observation.len(), "Tool executed");

                    transcript.push(format!(
                        "{}\n{} {}\n{}",
                        completion, OBSERVATION_TOKEN, observation, THOUGHT_TOKEN
                    ));
                }
            }
        }

        info!(max_steps = self.max_steps, "Step ceiling reached without a final answer");
        Ok(String::new())
    }

    /// The session state (current directory) backing this agent's tools.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionClient, LlmError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Replays a fixed sequence of completions and records every prompt.
    struct ScriptedModel {
        completions: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(completions: Vec<&str>) -> Arc<Self> {
            Arc::new(Self {
                completions: Mutex::new(completions.into_iter().map(String::from).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedModel {
        async fn generate(&self, prompt: &str, _stop: &[String]) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.completions
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LlmError::InvalidResponse("script exhausted".to_string()))
        }
    }

    fn test_agent(model: Arc<ScriptedModel>, root: &TempDir, max_steps: usize) -> Agent {
        let mut config = Config::new(
            "test-key".to_string(),
            "test-model".to_string(),
            root.path().to_path_buf(),
        );
        config.max_steps = max_steps;
        Agent::new(model, ToolRegistry::builtin().unwrap(), &config)
    }

    #[test]
    fn list_then_final_answer() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("a.txt"), "x").unwrap();

        let model = ScriptedModel::new(vec![
            "Thought: I will list.\nAction: List Directory\nAction Input: \n",
            "Thought: I have now done the request!\nFinal Answer: Done creating the file.",
        ]);
        let mut agent = test_agent(model.clone(), &root, 20);

        let answer = tokio_test::block_on(agent.run("list files")).unwrap();
        assert_eq!(answer, "Done creating the file.");

        // The second prompt carries the first iteration's transcript entry:
        // raw completion, observation, trailing thought marker.
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("Action: List Directory"));
        assert!(prompts[1].contains("Observation: Directory listing for:"));
        assert!(prompts[1].contains("[FILE] a.txt"));
        assert!(!prompts[0].contains("Observation: Directory listing for:"));
    }

    #[test]
    fn tool_failure_is_an_observation_not_an_error() {
        let root = TempDir::new().unwrap();
        let model = ScriptedModel::new(vec![
            "Action: Rename File\nAction Input: old.txt,new.txt",
            "Final Answer: could not rename",
        ]);
        let mut agent = test_agent(model.clone(), &root, 20);

        let answer = tokio_test::block_on(agent.run("rename old to new")).unwrap();
        assert_eq!(answer, "could not rename");
        assert!(model.prompts()[1].contains("Observation: File not found."));
    }

    #[test]
    fn step_ceiling_yields_empty_result() {
        let root = TempDir::new().unwrap();
        let model = ScriptedModel::new(vec![
            "Action: List Directory\nAction Input: ",
            "Action: List Directory\nAction Input: ",
            "Action: List Directory\nAction Input: ",
        ]);
        let mut agent = test_agent(model.clone(), &root, 3);

        let answer = tokio_test::block_on(agent.run("loop forever")).unwrap();
        assert_eq!(answer, "");
        assert_eq!(model.prompts().len(), 3);
    }

    #[test]
    fn unknown_tool_aborts_the_run() {
        let root = TempDir::new().unwrap();
        let model = ScriptedModel::new(vec!["Action: Teleport\nAction Input: elsewhere"]);
        let mut agent = test_agent(model, &root, 20);

        let err = tokio_test::block_on(agent.run("go")).unwrap_err();
        assert!(matches!(err, AgentError::UnknownTool(name) if name == "Teleport"));
    }

    #[test]
    fn unparsable_completion_aborts_the_run() {
        let root = TempDir::new().unwrap();
        let model = ScriptedModel::new(vec!["I have no idea."]);
        let mut agent = test_agent(model, &root, 20);

        let err = tokio_test::block_on(agent.run("do something")).unwrap_err();
        assert!(matches!(err, AgentError::Unparsable(raw) if raw == "I have no idea."));
    }

    #[test]
    fn model_failure_surfaces_as_model_unavailable() {
        let root = TempDir::new().unwrap();
        let model = ScriptedModel::new(vec![]);
        let mut agent = test_agent(model, &root, 20);

        let err = tokio_test::block_on(agent.run("anything")).unwrap_err();
        assert!(matches!(err, AgentError::ModelUnavailable(_)));
    }

    #[test]
    fn directory_change_persists_into_later_iterations_and_runs() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();

        let model = ScriptedModel::new(vec![
            "Action: Change Directory\nAction Input: sub",
            "Action: Create File\nAction Input: inner.txt",
            "Final Answer: done",
        ]);
        let mut agent = test_agent(model.clone(), &root, 20);

        let answer = tokio_test::block_on(agent.run("create inner.txt in sub")).unwrap();
        assert_eq!(answer, "done");
        assert!(root.path().join("sub/inner.txt").is_file());

        // Prompts after the change report the new current directory.
        assert!(model.prompts()[1]
            .contains(&format!("this directory: {}.", root.path().join("sub").display())));

        // The directory survives the end of the run.
        assert_eq!(agent.session().current_dir(), root.path().join("sub"));
    }
}
