//! MCP server surface: tool catalog, schema resources, guidance prompt and
//! the stdio JSON-RPC loop.

pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod stdio;
pub mod tools;

pub use protocol::McpServer;
pub use stdio::run_stdio;
pub use tools::{ToolName, Toolbox};
