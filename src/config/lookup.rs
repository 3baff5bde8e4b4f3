use std::path::{Path, PathBuf};

use serde::Serialize;

use super::cache::DocumentCache;
use super::convert::Converter;
use super::path::{LookupPath, Namespace};
use super::{ConvertError, LookupError, NotFound};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_FILE_NAME: &str = "pyproject.toml";

/// Resolves dotted key paths in cached project configuration documents.
///
/// Lookups are rooted at a tool [`Namespace`] (`tool.flet` unless configured
/// otherwise) and read documents through a [`DocumentCache`] owned by this
/// value, so a file is parsed at most once per lookup session.
///
/// ## Example
///
/// ```no_run
/// use pyproject_lookup::{convert, ConfigLookup, Namespace};
///
/// let mut lookup = ConfigLookup::builder()
///     .namespace(Namespace::tool("flet"))
///     .build();
///
/// // [tool.flet] name = "demo"
/// let name: String = lookup.resolve("name", convert::string, None, true)?;
///
/// // Empty when the key is missing and no default was supplied.
/// let port = lookup.resolve_with_default("web.port", None, convert::integer, None)?;
/// let port = port.unwrap_or(8550);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ConfigLookup {
    cache: DocumentCache,
    namespace: Namespace,
    default_path: PathBuf,
}

impl ConfigLookup {
    pub fn builder() -> ConfigLookupBuilder {
        ConfigLookupBuilder::default()
    }

    /// Looks up `path`, optionally under the namespace, and converts the leaf.
    ///
    /// The document is read from `project_path`, or the default path when
    /// `None`. Returns [`LookupError::NotFound`] when the document is absent
    /// or any segment cannot be resolved.
    pub fn resolve<T>(
        &mut self,
        path: &str,
        convert: Converter<T>,
        project_path: Option<&Path>,
        namespaced: bool,
    ) -> Result<T, LookupError> {
        let file = project_path.unwrap_or(self.default_path.as_path());
        let document = self
            .cache
            .load_document(file)
            .document()
            .cloned()
            .ok_or_else(|| NotFound::DocumentAbsent(file.to_path_buf()))?;

        let mut lookup_path = LookupPath::parse(path);
        if namespaced {
            lookup_path = lookup_path.namespaced(&self.namespace);
        }

        let value = document.descend(&lookup_path)?;
        Ok(convert(value)?)
    }

    /// Namespaced [`resolve`](Self::resolve) that folds "not found" into
    /// `default`.
    ///
    /// The result holds the found value, else `default`, else nothing. Only a
    /// present value that fails conversion is an error.
    pub fn resolve_with_default<T>(
        &mut self,
        path: &str,
        default: Option<T>,
        convert: Converter<T>,
        project_path: Option<&Path>,
    ) -> Result<LookupDefault<T>, ConvertError> {
        match self.resolve(path, convert, project_path, true) {
            Ok(value) => Ok(LookupDefault::some(value)),
            Err(LookupError::NotFound(reason)) => {
                tracing::debug!(
                    path,
                    %reason,
                    has_default = default.is_some(),
                    "config value not found"
                );
                Ok(LookupDefault { default })
            }
            Err(LookupError::Convert(e)) => Err(e),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Releases the cache, e.g. to hand it to the next session.
    pub fn into_cache(self) -> DocumentCache {
        self.cache
    }
}

/// Builder for [`ConfigLookup`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigLookupBuilder {
    cache: Option<DocumentCache>,
    namespace: Option<Namespace>,
    project_path: Option<PathBuf>,
}

impl ConfigLookupBuilder {
    /// Uses an existing cache instead of starting empty.
    pub fn cache(mut self, cache: DocumentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the namespace prepended to namespaced lookups.
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Sets the document read when a lookup passes no `project_path`.
    ///
    /// Defaults to `pyproject.toml` in the current directory.
    pub fn project_path(mut self, path: impl AsRef<Path>) -> Self {
        self.project_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> ConfigLookup {
        let default_path = self.project_path.unwrap_or_else(|| {
            std::env::current_dir()
                .map(|dir| dir.join(DEFAULT_FILE_NAME))
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FILE_NAME))
        });

        ConfigLookup {
            cache: self.cache.unwrap_or_default(),
            namespace: self.namespace.unwrap_or_default(),
            default_path,
        }
    }
}

/// Result of [`ConfigLookup::resolve_with_default`].
///
/// Serializes to `{ default = value }` when a value is present and to an
/// empty table otherwise, so falsy values such as `0` or `""` stay distinct
/// from "no value".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupDefault<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<T>,
}

impl<T> LookupDefault<T> {
    pub fn some(value: T) -> Self {
        Self {
            default: Some(value),
        }
    }

    pub fn empty() -> Self {
        Self { default: None }
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none()
    }

    pub fn get(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.default
    }

    pub fn unwrap_or(self, fallback: T) -> T {
        self.default.unwrap_or(fallback)
    }
}
