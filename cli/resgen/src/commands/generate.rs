//! Resolve a root schema, render its resources, write the output.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use resgen_graph::{resolve_root, FsReader, Resolution};

use crate::output::write_atomic;

/// Options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions<'a> {
    /// Root schema file.
    pub root: &'a Path,
    /// Generated source file.
    pub output: &'a Path,
    /// Enclosing namespaces, outermost first.
    pub namespaces: &'a [String],
    /// Print the resolved order instead of writing.
    pub dry_run: bool,
}

/// Run the generation pipeline.
pub fn run(opts: &GenerateOptions<'_>) -> Result<()> {
    let resolution = resolve_root(&FsReader, opts.root)
        .with_context(|| format!("resolving includes of {}", opts.root.display()))?;

    let text = resgen_emit::emit(&resolution.order, &resolution.contents, opts.namespaces)
        .with_context(|| format!("generating resources for {}", opts.root.display()))?;

    if opts.dry_run {
        print!("{}", format_order(&resolution));
        return Ok(());
    }

    write_atomic(opts.output, text.as_bytes())?;
    info!(
        output = %opts.output.display(),
        resources = resolution.len(),
        "wrote resources"
    );
    Ok(())
}

/// Format the resolved order, one file per line.
pub fn format_order(resolution: &Resolution) -> String {
    let mut out = String::new();
    let mut total = 0;
    for (index, (identifier, content)) in resolution.iter().enumerate() {
        out.push_str(&format!("{index:>3} {identifier} ({} bytes)\n", content.len()));
        total += content.len();
    }
    out.push_str(&format!(
        "\n{} files, {} bytes embedded\n",
        resolution.len(),
        total
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, text: &str) {
        std::fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn writes_dependency_first_output() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.fbs", "include \"b.fbs\";\ntable A {}\n");
        write(dir.path(), "b.fbs", "table B {}\n");
        let output = dir.path().join("resources.h");

        run(&GenerateOptions {
            root: &dir.path().join("a.fbs"),
            output: &output,
            namespaces: &[],
            dry_run: false,
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("const char* symbols[] = {b_fbs,a_fbs,};"));
        assert!(text.contains("number_of_symbols = 2;"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.fbs", "table A {}\n");
        let output = dir.path().join("resources.h");

        run(&GenerateOptions {
            root: &dir.path().join("a.fbs"),
            output: &output,
            namespaces: &[],
            dry_run: true,
        })
        .unwrap();

        assert!(!output.exists());
    }

    #[test]
    fn failed_resolution_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.fbs", "include \"missing.fbs\";\n");
        let output = dir.path().join("resources.h");
        std::fs::write(&output, "previous").unwrap();

        let err = run(&GenerateOptions {
            root: &dir.path().join("a.fbs"),
            output: &output,
            namespaces: &[],
            dry_run: false,
        })
        .unwrap_err();

        assert!(err.downcast_ref::<resgen_graph::GraphError>().is_some());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn order_listing() {
        let mut resolution = Resolution::default();
        for (id, text) in [("b.fbs", "table B {}\n"), ("a.fbs", "")] {
            resolution.order.push(id.to_string());
            resolution.contents.insert(id.to_string(), text.as_bytes().to_vec());
        }

        assert_eq!(
            format_order(&resolution),
            "  0 b.fbs (11 bytes)\n  1 a.fbs (0 bytes)\n\n2 files, 11 bytes embedded\n"
        );
    }
}
