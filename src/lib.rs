//! Turn an MCP server into a file-based agent skill.
//!
//! Generation introspects a provider once ([`discovery`]) and writes a
//! package ([`render`]); every later invocation of the package's executor
//! goes through [`dispatch`], which opens a fresh session for one operation.

pub mod call;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod generate;
pub mod render;
pub mod session;

pub use error::{Result, SkillError};
