pub mod config;

pub use config::{
    convert, CachedDocument, ConfigDocument, ConfigLookup, ConvertError, DocumentCache,
    LookupDefault, LookupError, LookupPath, Namespace, NotFound,
};
