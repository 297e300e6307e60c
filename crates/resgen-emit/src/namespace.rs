//! Enclosing namespace handling for generated output.

/// Parse a `::`-delimited namespace spec (e.g. `foo::bar`) into its
/// segments, outermost first. Empty segments are dropped.
pub fn parse_namespaces(spec: &str) -> Vec<String> {
    spec.split("::")
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Opening statements, outermost first.
pub fn open_namespaces(namespaces: &[String]) -> String {
    namespaces
        .iter()
        .map(|ns| format!("namespace {ns} {{\n"))
        .collect()
}

/// Closing statements, innermost first.
pub fn close_namespaces(namespaces: &[String]) -> String {
    namespaces
        .iter()
        .rev()
        .map(|ns| format!("}}  // namespace {ns}\n"))
        .collect()
}
