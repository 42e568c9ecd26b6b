//! # File Agent
//!
//! A minimal natural-language agent for command-line style file management.
//!
//! This library provides:
//! - An HTTP API for submitting natural-language requests
//! - A Thought/Action/Observation loop driven by a text-completion model
//! - A fixed registry of file-system tools scoped to a sandbox directory
//!
//! ## Architecture
//!
//! The agent follows the ReAct pattern:
//! 1. Receive a request via the API
//! 2. Render a prompt with the tool list, current directory and transcript
//! 3. Call the model, parse the completion into an action or final answer
//! 4. Execute the named tool, feed the observation back, repeat until done
//!
//! ## Example
//!
//! ```rust,ignore
//! use file_agent::{agent::Agent, config::Config, llm::GeminiClient, tools::ToolRegistry};
//! use std::sync::Arc;
//!
//! let config = Config::from_env()?;
//! let llm = Arc::new(GeminiClient::new(&config));
//! let mut agent = Agent::new(llm, ToolRegistry::builtin()?, &config);
//! let answer = agent.run("Create a notes.txt file in dir1").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
