//! Bodies, attributes, blocks and labels.

use crate::expr::Expression;
use crate::span::Span;

/// A set of attributes and nested blocks: either the document root or the
/// content of a block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    /// Attributes, in source order.
    pub attributes: Vec<Attribute>,
    /// Nested blocks, in source order.
    pub blocks: Vec<Block>,
    /// Source span covering the whole body.
    pub span: Span,
}

impl Body {
    /// Create an empty body covering `span`.
    pub fn new(span: Span) -> Self {
        Body {
            attributes: Vec::new(),
            blocks: Vec::new(),
            span,
        }
    }
}

/// A name bound to a value expression within a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// The attribute name.
    pub name: String,
    /// Span of the name only.
    pub name_span: Span,
    /// The value expression.
    pub expr: Expression,
    /// Span covering name, `=` and value.
    pub span: Span,
}

impl Attribute {
    /// Create an attribute. The overall span runs from the name's start to
    /// the expression's end.
    pub fn new(name: impl Into<String>, name_span: Span, expr: Expression) -> Self {
        let span = Span::new(name_span.start, expr.span().end.max(name_span.end));
        Attribute {
            name: name.into(),
            name_span,
            expr,
            span,
        }
    }
}

/// A named, optionally labeled container of a nested body.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The block type keyword, e.g. `resource`.
    pub block_type: String,
    /// Span of the type keyword only.
    pub type_span: Span,
    /// Labels following the type keyword, in source order.
    pub labels: Vec<Label>,
    /// The block's content, or `None` for a degenerate block.
    pub body: Option<Body>,
    /// Span covering the whole block including braces.
    pub span: Span,
}

/// A positional literal string following a block's type keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// The label's literal value, without quotes.
    pub value: String,
    /// Source span, including quotes.
    pub span: Span,
}

impl Label {
    /// Create a label.
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Label {
            value: value.into(),
            span,
        }
    }
}
