//! Source reader trait and its filesystem and in-memory implementations.
//!
//! The resolver never touches the filesystem directly. It asks a
//! `SourceReader` for the lines of a path, which keeps the traversal
//! testable and lets embedders serve schemas from memory.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Abstract line source for schema files.
///
/// Lines are raw bytes with the terminating `\n` removed. A trailing newline
/// at end of file does not produce an empty final line.
pub trait SourceReader {
    /// Read every line of the file at `path`.
    fn read_lines(&self, path: &Path) -> io::Result<Vec<Vec<u8>>>;
}

/// Reads schema files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<Vec<u8>>> {
        let file = File::open(path)?;
        BufReader::new(file).split(b'\n').collect()
    }
}

/// Serves schema files from an in-memory map keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style.
    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }
}

impl SourceReader for MemoryReader {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<Vec<u8>>> {
        let bytes = self.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no in-memory file at {}", path.display()),
            )
        })?;
        Cursor::new(bytes.as_slice()).split(b'\n').collect()
    }
}

/// Join lines back into file text, terminating each with `\n`.
pub fn join_lines<L: AsRef<[u8]>>(lines: &[L]) -> Vec<u8> {
    let mut merged = Vec::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        merged.extend_from_slice(line.as_ref());
        merged.push(b'\n');
    }
    merged
}
