//! Turning changed YAML files into API records.
//!
//! A file at `data/<district>/<taluka>/<village>/<lang>/<resource>.yaml`
//! becomes an [`Envelope`] whose document carries the path-derived ids.

pub mod builder;
pub mod error;
pub mod path;
pub mod value;

pub use builder::{composite_id, Envelope, RecordBuilder, ReservedKeyPolicy, RESERVED_KEYS};
pub use error::{RecordError, Result};
pub use path::{decode_path, Language, PathIdentifiers};
pub use value::{Document, UnsupportedKey, Value};
