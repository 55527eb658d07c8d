//! CLI command implementations.
//!
//! - `tmpdir`: Print the normalized temp directory
//! - `expand`: Expand the short segments of a Windows path
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod expand;
pub mod tmpdir;

pub use completions::CompletionsCommand;
pub use expand::ExpandCommand;
pub use tmpdir::TmpdirCommand;
