//! Include graph resolution for resgen.
//!
//! Reads a root schema file, follows its `include "<file>"` directives
//! recursively and produces a dependency-first ordering of every reachable
//! file together with each file's text.
//!
//! ## Modules
//!
//! - [`directive`] — Lexical extraction of include directives
//! - [`reader`] — Line sources (filesystem, in-memory)
//! - [`resolve`] — Post-order depth-first traversal and cycle detection

pub mod directive;
pub mod error;
pub mod reader;
pub mod resolve;

pub use directive::{dependencies, include_raw, include_target, Include};
pub use error::{GraphError, Result};
pub use reader::{join_lines, FsReader, MemoryReader, SourceReader};
pub use resolve::{resolve_root, split_root, Resolution, Resolver};
