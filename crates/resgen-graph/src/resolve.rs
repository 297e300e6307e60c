//! Post-order depth-first resolution of the include graph.
//!
//! Starting from a root file, every include directive is followed recursively.
//! A file is appended to the order only after all of its includes have been
//! appended, so walking the order front to back always visits dependencies
//! before their dependents. Dependency paths are joined onto the single root
//! directory, never onto the including file's directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error, trace};

use crate::directive::dependencies;
use crate::error::{GraphError, Result};
use crate::reader::{join_lines, SourceReader};

/// The outcome of resolving an include graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Identifiers in emission order (dependencies first).
    pub order: Vec<String>,
    /// File text per identifier, each line terminated by `\n`.
    pub contents: HashMap<String, Vec<u8>>,
}

impl Resolution {
    /// Number of resolved files.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of an identifier in the order.
    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.order.iter().position(|id| id == identifier)
    }

    /// Content of a resolved file.
    pub fn get(&self, identifier: &str) -> Option<&[u8]> {
        self.contents.get(identifier).map(Vec::as_slice)
    }

    /// Iterate `(identifier, content)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.order
            .iter()
            .map(|id| (id.as_str(), self.get(id).unwrap_or_default()))
    }

    fn is_finished(&self, identifier: &str) -> bool {
        self.order.iter().any(|id| id == identifier)
    }
}

/// Depth-first include resolver over a single root directory.
///
/// The resolver owns the traversal state and is consumed by [`Resolver::resolve`],
/// so a failed traversal cannot leak half-built state to the caller.
pub struct Resolver<'r, R: SourceReader + ?Sized> {
    reader: &'r R,
    root_dir: PathBuf,
    /// Identifiers on the current descent path, outermost first.
    visiting: Vec<String>,
    resolution: Resolution,
}

impl<'r, R: SourceReader + ?Sized> Resolver<'r, R> {
    /// Create a resolver that joins every include onto `root_dir`.
    pub fn new(reader: &'r R, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            root_dir: root_dir.into(),
            visiting: Vec::new(),
            resolution: Resolution::default(),
        }
    }

    /// The directory include targets are resolved against.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Resolve the file at `path`, known as `identifier`, and everything it includes.
    pub fn resolve(mut self, path: &Path, identifier: &str) -> Result<Resolution> {
        self.visit(path, identifier)?;
        Ok(self.resolution)
    }

    fn visit(&mut self, path: &Path, identifier: &str) -> Result<()> {
        if let Some(start) = self.visiting.iter().position(|id| id == identifier) {
            let mut cycle = self.visiting[start..].to_vec();
            cycle.push(identifier.to_string());
            error!(cycle = %cycle.join(" -> "), "circular include");
            return Err(GraphError::CyclicDependency { cycle });
        }

        // Everything below a finished file is already in the order.
        if self.resolution.is_finished(identifier) {
            trace!(identifier, "already resolved");
            return Ok(());
        }

        let lines = self.reader.read_lines(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "unable to read file");
            GraphError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(identifier, path = %path.display(), lines = lines.len(), "read schema file");

        self.resolution
            .contents
            .insert(identifier.to_string(), join_lines(&lines));

        self.visiting.push(identifier.to_string());
        for dep in dependencies(&lines) {
            trace!(from = identifier, include = %dep.identifier, "following include");
            let dep_path = self.root_dir.join(dep.relative_path());
            self.visit(&dep_path, &dep.identifier)?;
        }
        self.visiting.pop();

        if !self.resolution.is_finished(identifier) {
            debug!(identifier, position = self.resolution.order.len(), "finalized");
            self.resolution.order.push(identifier.to_string());
        }

        Ok(())
    }
}

/// Split a root file path into its include root directory and identifier.
///
/// The root directory is the file's parent (empty, meaning the working
/// directory, when the path has no directory component). The identifier is
/// the final path component.
pub fn split_root(root_file: &Path) -> (PathBuf, String) {
    let root_dir = root_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let identifier = root_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root_file.to_string_lossy().into_owned());
    (root_dir, identifier)
}

/// Resolve the include graph rooted at `root_file`.
pub fn resolve_root<R: SourceReader + ?Sized>(reader: &R, root_file: &Path) -> Result<Resolution> {
    let (root_dir, identifier) = split_root(root_file);
    debug!(root = %root_file.display(), root_dir = %root_dir.display(), "resolving includes");
    Resolver::new(reader, root_dir).resolve(root_file, &identifier)
}
