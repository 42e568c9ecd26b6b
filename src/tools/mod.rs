//! File-system tools available to the agent.
//!
//! Every tool takes a single string input and produces a single string
//! result. Expected domain failures (missing file, missing directory,
//! permission denial, malformed input) are translated into descriptive
//! result strings, never errors: the loop re-feeds whatever a tool returns
//! to the model as an observation, success or not.

mod content_ops;
mod dir_ops;
mod file_ops;

pub use content_ops::{AddContent, DeleteContent, FindFiles, ReadAnalyze};
pub use dir_ops::{ChangeDirectory, CreateDirectory, DeleteDirectory, ListDirectory};
pub use file_ops::{CreateFile, DeleteFile, ReadFile, RenameFile};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Mutable per-agent state shared by all tools.
///
/// Holds the sandbox root and the current working directory. The current
/// directory starts at the root, is changed only by [`ChangeDirectory`], and
/// is read by every tool to resolve relative paths at call time. It is not
/// reset between runs on the same agent.
#[derive(Debug, Clone)]
pub struct Session {
    root: PathBuf,
    current_dir: PathBuf,
}

impl Session {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let current_dir = root.clone();
        Self { root, current_dir }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }

    /// Resolve a tool input path against the current directory.
    pub fn resolve(&self, input: &str) -> PathBuf {
        self.current_dir.join(input.trim())
    }

    /// Textually strip a leading sandbox-root prefix from a path string.
    ///
    /// Models often echo the root back in their inputs
    /// ("example_dir/notes.txt"); stripping it keeps resolution relative to
    /// the current directory. This is plain string surgery, not path
    /// canonicalization, and enforces nothing.
    pub fn strip_root_prefix<'a>(&self, path: &'a str) -> &'a str {
        let path = path.trim();
        let root = self.root.to_string_lossy();
        match path.strip_prefix(root.as_ref()) {
            Some(rest) => rest.trim_start_matches(std::path::MAIN_SEPARATOR),
            None => path,
        }
    }
}

/// A named capability the model can invoke.
pub trait Tool: Send + Sync {
    /// Unique tool name, matched verbatim against model output.
    fn name(&self) -> &str;

    /// One-line description rendered into the prompt, including the input
    /// grammar the model should follow.
    fn description(&self) -> &str;

    /// Run the tool. Always returns an observation string; domain failures
    /// are reported in the string itself.
    fn execute(&self, input: &str, session: &mut Session) -> String;
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),
}

/// Ordered collection of tools with exact-match name lookup.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    /// Build a registry from an ordered tool list.
    ///
    /// Duplicate names are rejected outright: the rendered tool list and the
    /// dispatch lookup must agree on what a name means.
    pub fn new(tools: Vec<Box<dyn Tool>>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name().to_string()) {
                return Err(RegistryError::DuplicateName(tool.name().to_string()));
            }
        }
        Ok(Self { tools })
    }

    /// The full built-in tool set, in the order it is presented to the model.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(vec![
            Box::new(ListDirectory),
            Box::new(ChangeDirectory),
            Box::new(CreateFile),
            Box::new(CreateDirectory),
            Box::new(DeleteFile),
            Box::new(DeleteDirectory),
            Box::new(FindFiles),
            Box::new(ReadAnalyze),
            Box::new(ReadFile),
            Box::new(RenameFile),
            Box::new(AddContent),
            Box::new(DeleteContent),
        ])
    }

    /// One line per tool, `"<name>: <description>"`, in registry order.
    pub fn descriptions(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Comma-joined tool names, in registry order.
    pub fn names(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Exact-match, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(&'static str);

    impl Tool for Dummy {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "dummy"
        }

        fn execute(&self, _input: &str, _session: &mut Session) -> String {
            format!("{} ran", self.0)
        }
    }

    #[test]
    fn registry_preserves_construction_order() {
        let registry =
            ToolRegistry::new(vec![Box::new(Dummy("b")), Box::new(Dummy("a"))]).unwrap();
        assert_eq!(registry.names(), "b,a");
        assert_eq!(registry.descriptions(), "b: dummy\na: dummy");
    }

    #[test]
    fn registry_rejects_duplicate_names() {
        let err = ToolRegistry::new(vec![Box::new(Dummy("x")), Box::new(Dummy("x"))])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "x"));
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let registry = ToolRegistry::new(vec![Box::new(Dummy("List Directory"))]).unwrap();
        assert!(registry.get("List Directory").is_some());
        assert!(registry.get("list directory").is_none());
        assert!(registry.get("List").is_none());
    }

    #[test]
    fn builtin_set_has_twelve_tools_in_wire_order() {
        let registry = ToolRegistry::builtin().unwrap();
        let names = registry.names();
        assert_eq!(
            names,
            "List Directory,Change Directory,Create File,Create Directory,\
             Delete File,Delete Directory,Find Files,Read and Analyze File,\
             Read File,Rename File,Add Content,Delete Content"
        );
    }

    #[test]
    fn session_strips_root_prefix_textually() {
        let session = Session::new("example_dir");
        assert_eq!(session.strip_root_prefix("example_dir/a.txt"), "a.txt");
        assert_eq!(session.strip_root_prefix("a.txt"), "a.txt");
        assert_eq!(session.strip_root_prefix(" example_dir/a.txt "), "a.txt");
    }
}
