//! Expression constraints: declared shapes a value expression may satisfy.

use crate::types::ValueType;

/// A single declared constraint on an expression position.
///
/// The set of constraint kinds is closed so the matching logic in the
/// analysis engine can be checked for exhaustiveness; new kinds are added
/// here, not behind a capability interface.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprConstraint {
    /// The position accepts a literal value of exactly this type.
    LiteralType(ValueType),
}

/// An ordered sequence of constraints, tried in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExprConstraints(pub Vec<ExprConstraint>);

impl ExprConstraints {
    /// A constraint sequence accepting only a literal of the given type.
    pub fn literal_type_only(ty: ValueType) -> Self {
        ExprConstraints(vec![ExprConstraint::LiteralType(ty)])
    }

    /// Whether no constraints are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All literal value types declared by these constraints, in order.
    pub fn literal_value_types(&self) -> Vec<&ValueType> {
        self.0
            .iter()
            .map(|c| match c {
                ExprConstraint::LiteralType(ty) => ty,
            })
            .collect()
    }

    /// The first declared literal type satisfying `pred`.
    pub fn literal_type_matching(&self, pred: impl Fn(&ValueType) -> bool) -> Option<&ValueType> {
        self.literal_value_types().into_iter().find(|ty| pred(ty))
    }

    /// The first declared list type.
    pub fn list_type(&self) -> Option<&ValueType> {
        self.literal_type_matching(ValueType::is_list)
    }

    /// The first declared set type.
    pub fn set_type(&self) -> Option<&ValueType> {
        self.literal_type_matching(ValueType::is_set)
    }

    /// The first declared tuple type.
    pub fn tuple_type(&self) -> Option<&ValueType> {
        self.literal_type_matching(ValueType::is_tuple)
    }

    /// The first declared object type.
    pub fn object_type(&self) -> Option<&ValueType> {
        self.literal_type_matching(ValueType::is_object)
    }

    /// The first declared map type.
    pub fn map_type(&self) -> Option<&ValueType> {
        self.literal_type_matching(ValueType::is_map)
    }

    /// The first declared literal type exactly equal to `ty`.
    pub fn exact_type(&self, ty: &ValueType) -> Option<&ValueType> {
        self.literal_type_matching(|t| t == ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let constraints = ExprConstraints(vec![
            ExprConstraint::LiteralType(ValueType::set(ValueType::Number)),
            ExprConstraint::LiteralType(ValueType::list(ValueType::String)),
            ExprConstraint::LiteralType(ValueType::list(ValueType::Number)),
        ]);

        assert_eq!(
            constraints.list_type(),
            Some(&ValueType::list(ValueType::String))
        );
        assert_eq!(
            constraints.set_type(),
            Some(&ValueType::set(ValueType::Number))
        );
        assert_eq!(constraints.tuple_type(), None);
    }

    #[test]
    fn exact_type_does_not_coerce() {
        let constraints = ExprConstraints::literal_type_only(ValueType::Number);
        assert!(constraints.exact_type(&ValueType::Number).is_some());
        assert!(constraints.exact_type(&ValueType::String).is_none());
        assert!(
            constraints
                .exact_type(&ValueType::list(ValueType::Number))
                .is_none()
        );
    }
}
