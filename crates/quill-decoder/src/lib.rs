//! Schema-aware analysis engine for Quill documents.
//!
//! A [`Decoder`] holds loaded documents and at most one root schema, and
//! answers position-based queries against them: hover data, completion
//! candidates and semantic tokens. Documents and the schema are opaque to
//! each other until a query walks them together.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use quill_schema::BodySchema;
use quill_syntax::{Document, Pos};
use tracing::debug;

mod candidates;
mod error;
mod expr;
mod hover;
mod lang;
mod semantic_tokens;

pub use error::Error;
pub use lang::{
    Candidate, CandidateKind, Candidates, HoverData, MarkupContent, MarkupKind, SemanticToken,
    TextEdit, TokenModifier, TokenType,
};

/// Bodies nested deeper than this stop the recursive walks. Documents this
/// deep are adversarial, not written by hand.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// The analysis engine: a store of named documents plus an optional root
/// schema, queried by position.
///
/// All methods take `&self`; the decoder is safe to share across threads.
#[derive(Debug, Default)]
pub struct Decoder {
    files: DashMap<String, Arc<Document>>,
    root_schema: RwLock<Option<Arc<BodySchema>>>,
}

impl Decoder {
    /// Create an empty decoder with no documents and no schema.
    pub fn new() -> Self {
        Decoder::default()
    }

    /// Load (or replace) a document under `name`.
    pub fn load_file(&self, name: impl Into<String>, document: Document) {
        let name = name.into();
        debug!(file = %name, "loading document");
        self.files.insert(name, Arc::new(document));
    }

    /// Install (or replace) the root schema all queries resolve against.
    pub fn set_schema(&self, schema: BodySchema) {
        *self.root_schema.write() = Some(Arc::new(schema));
    }

    /// Hover data for the construct at `pos` in file `name`.
    ///
    /// Returns `Ok(None)` when the position falls inside a construct the
    /// schema has nothing to say about; positions outside any construct are
    /// a [`Error::Positional`].
    pub fn hover_at_pos(&self, name: &str, pos: Pos) -> Result<Option<HoverData>, Error> {
        debug!(file = %name, pos, "hover query");
        let document = self.get_file(name)?;
        let Some(body) = &document.body else {
            return Err(Error::UnknownFileFormat(name.to_string()));
        };
        let schema = self.root_schema.read().clone().ok_or(Error::NoSchema)?;
        hover::hover_at_pos(name, body, Some(&schema), pos, 0)
    }

    /// Completion candidates for the position `pos` in file `name`.
    pub fn candidates_at_pos(&self, name: &str, pos: Pos) -> Result<Candidates, Error> {
        debug!(file = %name, pos, "candidate query");
        let document = self.get_file(name)?;
        let Some(body) = &document.body else {
            return Err(Error::UnknownFileFormat(name.to_string()));
        };
        let schema = self.root_schema.read().clone().ok_or(Error::NoSchema)?;
        candidates::candidates_at_pos(name, body, &schema, pos, 0)
    }

    /// Semantic tokens for the whole of file `name`, sorted by start offset.
    ///
    /// Token emission is best-effort: constructs the schema does not know are
    /// skipped rather than reported. With no schema installed the answer is
    /// an empty list.
    pub fn semantic_tokens(&self, name: &str) -> Result<Vec<SemanticToken>, Error> {
        debug!(file = %name, "semantic token query");
        let document = self.get_file(name)?;
        let Some(body) = &document.body else {
            return Err(Error::UnknownFileFormat(name.to_string()));
        };
        let Some(schema) = self.root_schema.read().clone() else {
            return Ok(Vec::new());
        };

        let mut tokens = Vec::new();
        semantic_tokens::collect_tokens(body, &schema, false, 0, &mut tokens);
        tokens.sort_by_key(|t| t.span.start);
        Ok(tokens)
    }

    fn get_file(&self, name: &str) -> Result<Arc<Document>, Error> {
        self.files
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::FileNotFound(name.to_string()))
    }
}

/// Combine a block's plain body schema with its selected dependent body
/// schema. Either side may be absent; both absent means the nested body has
/// no schema at all.
pub(crate) fn merged_body_schema(
    plain: Option<&BodySchema>,
    dependent: Option<&BodySchema>,
) -> Option<BodySchema> {
    match (plain, dependent) {
        (Some(plain), Some(dependent)) => Some(plain.merged_with(dependent)),
        (Some(plain), None) => Some(plain.clone()),
        (None, Some(dependent)) => Some(dependent.clone()),
        (None, None) => None,
    }
}
