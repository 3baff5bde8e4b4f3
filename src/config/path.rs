//! Dotted key paths and tool namespaces.

use std::fmt;

/// A fixed `tool.<name>` prefix scoping lookups to one tool's subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    segments: [String; 2],
}

impl Namespace {
    /// The `[tool.<name>]` table of a `pyproject.toml`.
    pub fn tool(name: impl Into<String>) -> Self {
        Self {
            segments: ["tool".to_string(), name.into()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::tool("flet")
    }
}

/// A sequence of key segments into a TOML document.
///
/// Segments are compared case-sensitively, the same way TOML compares keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupPath {
    segments: Vec<String>,
}

impl LookupPath {
    /// Splits `path` on `.`.
    ///
    /// Empty segments are kept as keys, so `""` and `a..b` can match quoted
    /// empty keys in the document.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// Returns this path rooted under `namespace`.
    pub fn namespaced(self, namespace: &Namespace) -> Self {
        let mut segments = namespace.segments().to_vec();
        segments.extend(self.segments);
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The dotted form of the first `len` segments, used in diagnostics.
    pub(crate) fn prefix(&self, len: usize) -> String {
        self.segments[..len.min(self.segments.len())].join(".")
    }
}

impl fmt::Display for LookupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
