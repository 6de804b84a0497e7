//! Call-descriptor formatters for agent tools and MCP servers.
//!
//! These only format strings. The compiler treats their output as opaque
//! leaf text; nothing here invokes a tool.
//!
//! ```
//! use edict::tools::{McpServer, Tool};
//!
//! assert_eq!(Tool::Bash.call("cargo test"), "Bash(cargo test)");
//! assert_eq!(
//!     McpServer::new("vector-memory").call("search_memories", "{query: \"auth\"}"),
//!     "mcp__vector-memory__search_memories({query: \"auth\"})"
//! );
//! ```

use std::fmt;

/// Tools exposed by the agent runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Bash,
    Task,
    Read,
    Edit,
    Write,
    Glob,
    Grep,
    WebSearch,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Bash => "Bash",
            Tool::Task => "Task",
            Tool::Read => "Read",
            Tool::Edit => "Edit",
            Tool::Write => "Write",
            Tool::Glob => "Glob",
            Tool::Grep => "Grep",
            Tool::WebSearch => "WebSearch",
        }
    }

    /// `Tool(args)`.
    pub fn call(&self, args: impl AsRef<str>) -> String {
        format!("{}({})", self.name(), args.as_ref())
    }

    /// `Tool(argv...)` with each argument shell-quoted.
    pub fn call_argv<I, S>(&self, argv: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.call(shell_words::join(argv))
    }

    /// `Use Tool to <purpose>`.
    pub fn describe(&self, purpose: impl AsRef<str>) -> String {
        format!("Use {} to {}", self.name(), purpose.as_ref())
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `Task(@agent-<name>, "<prompt>")`.
pub fn agent(name: impl AsRef<str>, prompt: impl AsRef<str>) -> String {
    Tool::Task.call(format!(
        "@agent-{}, \"{}\"",
        name.as_ref(),
        prompt.as_ref().replace('"', "\\\"")
    ))
}

/// An MCP server whose methods are referenced from rendered documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpServer {
    id: String,
}

impl McpServer {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fully qualified method name: `mcp__<server>__<method>`.
    pub fn method(&self, name: impl AsRef<str>) -> String {
        format!("mcp__{}__{}", self.id, name.as_ref())
    }

    /// `mcp__<server>__<method>(<args>)`. The argument template is kept verbatim.
    pub fn call(&self, method: impl AsRef<str>, args_template: impl AsRef<str>) -> String {
        format!("{}({})", self.method(method), args_template.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_wraps_arguments() {
        assert_eq!(Tool::Read.call("src/lib.rs"), "Read(src/lib.rs)");
        assert_eq!(Tool::WebSearch.call(""), "WebSearch()");
    }

    #[test]
    fn call_argv_quotes_arguments() {
        assert_eq!(
            Tool::Bash.call_argv(["git", "commit", "-m", "fix parser"]),
            "Bash(git commit -m 'fix parser')"
        );
    }

    #[test]
    fn describe_names_tool() {
        assert_eq!(
            Tool::Grep.describe("find call sites"),
            "Use Grep to find call sites"
        );
    }

    #[test]
    fn agent_escapes_quotes() {
        assert_eq!(
            agent("explore", "find \"main\""),
            "Task(@agent-explore, \"find \\\"main\\\"\")"
        );
    }

    #[test]
    fn mcp_method_and_call() {
        let server = McpServer::new("vector-task");
        assert_eq!(server.method("task_get"), "mcp__vector-task__task_get");
        assert_eq!(
            server.call("task_get", "{task_id: {TASK_ID}}"),
            "mcp__vector-task__task_get({task_id: {TASK_ID}})"
        );
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Tool::Edit.to_string(), "Edit");
    }
}
