//! `resgen.toml` manifest parsing.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use resgen_emit::parse_namespaces;

/// File name searched for when no `--config` is given.
pub const MANIFEST_FILE: &str = "resgen.toml";

/// Errors loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("reading {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResgenManifest {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Namespace spec used when none is given on the command line.
    #[serde(default)]
    pub namespace: Option<String>,
}

impl ResgenManifest {
    /// Load a manifest from an explicit path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Search upward from `start_dir` for a `resgen.toml` file, returning it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>, ManifestError> {
        let mut dir = start_dir
            .canonicalize()
            .unwrap_or_else(|_| start_dir.to_path_buf());
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                return Ok(Some((Self::load(&candidate)?, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// The configured default namespaces, outermost first.
    pub fn default_namespaces(&self) -> Vec<String> {
        self.output
            .namespace
            .as_deref()
            .map(parse_namespaces)
            .unwrap_or_default()
    }
}
