//! Cached, namespaced lookups into project configuration files.

mod cache;
pub mod convert;
mod document;
mod error;
mod lookup;
mod path;

pub use cache::DocumentCache;
pub use convert::Converter;
pub use document::{read_document, CachedDocument, ConfigDocument};
pub use error::{ConvertError, DocumentError, LookupError, NotFound};
pub use lookup::{ConfigLookup, ConfigLookupBuilder, LookupDefault, DEFAULT_FILE_NAME};
pub use path::{LookupPath, Namespace};
