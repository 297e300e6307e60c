//! Resource emission for resgen.
//!
//! Turns a dependency-ordered set of files into C++ source embedding each
//! file as a zero-terminated byte array, followed by an index of filenames,
//! data symbols and their count. Emission is pure text rendering; writing the
//! result is left to the caller.

pub mod error;
pub mod namespace;
pub mod render;
pub mod symbol;

pub use error::{EmitError, Result};
pub use namespace::parse_namespaces;
pub use render::{byte_array, emit};
pub use symbol::{sanitize, ResourceNames, SymbolTable};
