//! Lexical extraction of `include "<file>"` directives.
//!
//! Lines are inspected byte-wise with no tokenizer: a line is an include
//! directive when it starts with the literal `include` token, and the target
//! is whatever sits between the first and the last double quote.
//!
//! Targets keep their raw bytes for locating the file; the UTF-8 identifier
//! is only used for ordering and symbol names.

use std::path::PathBuf;

/// Token a line must start with to be considered a directive.
pub const INCLUDE_TOKEN: &[u8] = b"include";

/// The target of one include directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    /// Target name as written, lossily decoded.
    pub identifier: String,
    raw: Vec<u8>,
}

impl Include {
    fn from_bytes(raw: &[u8]) -> Self {
        Include {
            identifier: String::from_utf8_lossy(raw).into_owned(),
            raw: raw.to_vec(),
        }
    }

    /// Target bytes exactly as they appear between the quotes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Target as a path relative to the include root.
    #[cfg(unix)]
    pub fn relative_path(&self) -> PathBuf {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        PathBuf::from(OsStr::from_bytes(&self.raw))
    }

    /// Target as a path relative to the include root.
    #[cfg(not(unix))]
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.identifier)
    }
}

/// Bytes between the first and last quote of an include directive.
///
/// Returns `None` for lines that are not include directives, and for
/// directives with no quotes or only one quote.
pub fn include_raw(line: &[u8]) -> Option<&[u8]> {
    if !line.starts_with(INCLUDE_TOKEN) {
        return None;
    }

    let start = line.iter().position(|&b| b == b'"')?;
    let end = line.iter().rposition(|&b| b == b'"')?;
    if start == end {
        return None;
    }

    Some(&line[start + 1..end])
}

/// Extract the dependency filename named by a single line.
pub fn include_target(line: &[u8]) -> Option<String> {
    include_raw(line).map(|raw| String::from_utf8_lossy(raw).into_owned())
}

/// Extract the immediate dependencies of a file, in line order.
pub fn dependencies<L: AsRef<[u8]>>(lines: &[L]) -> Vec<Include> {
    lines
        .iter()
        .filter_map(|line| include_raw(line.as_ref()))
        .map(Include::from_bytes)
        .collect()
}
