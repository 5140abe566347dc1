//! Schema model for the Quill configuration language.
//!
//! A schema declares which blocks, attributes and labels are legal within a
//! body, and which expression shapes each attribute value may take. Schemas
//! can depend on concrete values found in the document: a block schema may
//! carry *dependent body schemas* selected by the literal values of labels or
//! attributes flagged as dependency keys.
//!
//! Schemas are built programmatically (typically from a provider's data
//! model), installed into the analysis engine once, and never mutated by
//! queries.

mod constraint;
mod dependent;
mod schema;
mod types;

pub use constraint::{ExprConstraint, ExprConstraints};
pub use dependent::{AttributeDependent, DependencyKeys, LabelDependent, SchemaKey};
pub use schema::{AttributeSchema, BlockSchema, BodySchema, DocsLink, LabelSchema};
pub use types::{ValueType, number_to_string};
