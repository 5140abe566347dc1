//! Syntax tree representation for Quill configuration files.
//!
//! This crate defines the contract between the Quill parser and the analysis
//! engine: a position-annotated tree of bodies, attributes, blocks, labels and
//! value expressions. Every node carries a [`Span`] into the original source
//! so queries can be answered at a cursor position.
//!
//! The parser itself lives elsewhere; all types here can also be constructed
//! programmatically, which is how the engine's tests build documents.

mod body;
mod expr;
mod span;

pub use body::{Attribute, Block, Body, Label};
pub use expr::{
    Expression, FunctionCallExpr, LiteralExpr, LiteralValue, ObjectConsExpr, ObjectConsItem,
    ReferenceExpr, TemplateExpr, TemplateWrapExpr, TupleConsExpr,
};
pub use span::{Pos, Span};

/// A parsed Quill document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The root body, or `None` when the parser could not produce a
    /// structural body for the file (a degenerate document).
    pub body: Option<Body>,
}

impl Document {
    /// Create a document from a root body.
    pub fn new(body: Body) -> Self {
        Document { body: Some(body) }
    }

    /// Create a degenerate document with no interpretable body.
    pub fn unrecognized() -> Self {
        Document { body: None }
    }
}
