//! Error taxonomy for decoder queries.

use quill_syntax::Pos;

/// An error returned by a decoder query.
///
/// All errors are returned synchronously; queries are pure functions of
/// (document, schema, position), so retrying is the caller's prerogative.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A query was issued before any schema was installed.
    #[error("no schema available")]
    NoSchema,

    /// The query referenced a document name that was never loaded.
    #[error("file {0:?} not found")]
    FileNotFound(String),

    /// The document's body is of a shape the decoder cannot interpret.
    #[error("unknown format of file {0:?}")]
    UnknownFileFormat(String),

    /// The cursor position could not be resolved against the schema.
    #[error("{file}@{pos}: {msg}")]
    Positional {
        /// The document name.
        file: String,
        /// The byte offset that could not be resolved.
        pos: Pos,
        /// Why resolution failed.
        msg: String,
    },
}

impl Error {
    pub(crate) fn positional(file: &str, pos: Pos, msg: impl Into<String>) -> Self {
        Error::Positional {
            file: file.to_string(),
            pos,
            msg: msg.into(),
        }
    }
}
