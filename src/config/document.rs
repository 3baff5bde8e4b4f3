//! Parsed TOML documents.

use std::path::Path;
use std::sync::Arc;

use toml::{Table, Value};

use super::path::LookupPath;
use super::{DocumentError, NotFound};

/// An immutable TOML document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Table,
}

impl ConfigDocument {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            root: toml::from_str(text)?,
        })
    }

    pub fn root(&self) -> &Table {
        &self.root
    }

    /// Returns the value at `path`, if every segment resolves.
    pub fn get(&self, path: &LookupPath) -> Option<&Value> {
        self.descend(path).ok()
    }

    /// Walks `path` segment by segment.
    ///
    /// Only tables can be descended into; a key segment against an array or
    /// scalar is [`NotFound::NotATable`].
    pub(crate) fn descend(&self, path: &LookupPath) -> Result<&Value, NotFound> {
        let (first, rest) = path
            .segments()
            .split_first()
            .ok_or_else(|| NotFound::MissingKey(String::new()))?;

        let mut current = self
            .root
            .get(first)
            .ok_or_else(|| NotFound::MissingKey(path.prefix(1)))?;

        for (i, segment) in rest.iter().enumerate() {
            let table = current
                .as_table()
                .ok_or_else(|| NotFound::NotATable(path.prefix(i + 1)))?;
            current = table
                .get(segment)
                .ok_or_else(|| NotFound::MissingKey(path.prefix(i + 2)))?;
        }

        Ok(current)
    }
}

/// A cache slot: either a parsed document or the marker for a file that was
/// unreadable or malformed.
#[derive(Debug, Clone)]
pub enum CachedDocument {
    Parsed(Arc<ConfigDocument>),
    Absent,
}

impl CachedDocument {
    pub fn document(&self) -> Option<&Arc<ConfigDocument>> {
        match self {
            CachedDocument::Parsed(doc) => Some(doc),
            CachedDocument::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CachedDocument::Absent)
    }
}

/// Reads and parses a TOML file.
pub fn read_document(path: &Path) -> Result<ConfigDocument, DocumentError> {
    let contents = std::fs::read_to_string(path).map_err(|e| DocumentError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    ConfigDocument::parse(&contents).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn doc(text: &str) -> ConfigDocument {
        ConfigDocument::parse(text).unwrap()
    }

    fn path(s: &str) -> LookupPath {
        LookupPath::parse(s)
    }

    #[test]
    fn test_descend_nested_tables() {
        let doc = doc(
            r#"
            [tool.flet]
            name = "demo"

            [tool.flet.app]
            path = "src"
            "#,
        );
        assert_eq!(
            doc.get(&path("tool.flet.name")),
            Some(&Value::String("demo".into()))
        );
        assert_eq!(
            doc.get(&path("tool.flet.app.path")),
            Some(&Value::String("src".into()))
        );
    }

    #[test]
    fn test_missing_key_reports_prefix() {
        let doc = doc("[tool.flet]\nname = \"demo\"\n");
        assert_eq!(
            doc.descend(&path("tool.flet.missing.key")),
            Err(NotFound::MissingKey("tool.flet.missing".into()))
        );
    }

    #[test]
    fn test_cannot_descend_into_scalar_or_array() {
        let doc = doc("name = \"demo\"\nitems = [1, 2]\n");
        assert_eq!(
            doc.descend(&path("name.first")),
            Err(NotFound::NotATable("name".into()))
        );
        assert_eq!(
            doc.descend(&path("items.0")),
            Err(NotFound::NotATable("items".into()))
        );
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let doc = doc("[tool.flet]\nName = \"demo\"\n");
        assert!(doc.get(&path("tool.flet.name")).is_none());
        assert!(doc.get(&path("tool.Flet.Name")).is_none());
        assert!(doc.get(&path("tool.flet.Name")).is_some());
    }

    #[test]
    fn test_read_document_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[tool.flet").unwrap();

        let result = read_document(file.path());
        assert!(matches!(result, Err(DocumentError::Parse { .. })));
    }

    #[test]
    fn test_read_document_missing_file() {
        let result = read_document(Path::new("/nonexistent/path/pyproject.toml"));
        assert!(matches!(result, Err(DocumentError::Read { .. })));
    }

    #[test]
    fn test_empty_document_is_not_absent() {
        let file = NamedTempFile::new().unwrap();
        let doc = read_document(file.path()).unwrap();
        assert!(doc.root().is_empty());
    }
}
