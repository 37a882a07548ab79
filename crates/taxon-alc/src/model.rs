//! ALC データモデル

use crate::AlcError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named binary relation used inside EXISTS / FORALL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Role(pub String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concept constructor tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    And,
    Or,
    Not,
    Exists,
    Forall,
}

impl Operator {
    pub fn keyword(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::Exists => "EXISTS",
            Operator::Forall => "FORALL",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// ALC concept expression
///
/// Equality is structural and order-sensitive: `(A AND B)` and `(B AND A)`
/// are distinct values even though they denote the same set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    /// Named primitive concept
    Atomic(String),

    /// Complement: ¬C
    Not(Box<Concept>),

    /// Conjunction: C1 ⊓ ... ⊓ Cn
    And(Vec<Concept>),

    /// Disjunction: C1 ⊔ ... ⊔ Cn
    Or(Vec<Concept>),

    /// Existential restriction: ∃R.C
    Exists { role: Role, filler: Box<Concept> },

    /// Universal restriction: ∀R.C
    Forall { role: Role, filler: Box<Concept> },
}

impl Concept {
    pub fn atomic(name: impl Into<String>) -> Self {
        Concept::Atomic(name.into())
    }

    pub fn not(operand: Concept) -> Self {
        Concept::Not(Box::new(operand))
    }

    pub fn and(operands: Vec<Concept>) -> Self {
        Concept::And(operands)
    }

    pub fn or(operands: Vec<Concept>) -> Self {
        Concept::Or(operands)
    }

    pub fn exists(role: Role, filler: Concept) -> Self {
        Concept::Exists { role, filler: Box::new(filler) }
    }

    pub fn forall(role: Role, filler: Concept) -> Self {
        Concept::Forall { role, filler: Box::new(filler) }
    }

    /// Build an operator node from a tag, an optional role and its operands.
    ///
    /// NOT takes exactly one operand, EXISTS / FORALL take a role and exactly
    /// one filler, AND / OR take any number of operands and no role.
    pub fn compose(operator: Operator, role: Option<Role>, operands: Vec<Concept>) -> Result<Self, AlcError> {
        match operator {
            Operator::And | Operator::Or => {
                if role.is_some() {
                    return Err(AlcError::UnexpectedRole(operator));
                }
                Ok(if operator == Operator::And {
                    Concept::And(operands)
                } else {
                    Concept::Or(operands)
                })
            }
            Operator::Not => {
                if role.is_some() {
                    return Err(AlcError::UnexpectedRole(operator));
                }
                let operand = Self::single_operand(operator, operands)?;
                Ok(Concept::not(operand))
            }
            Operator::Exists | Operator::Forall => {
                let role = role.ok_or(AlcError::MissingRole(operator))?;
                let filler = Self::single_operand(operator, operands)?;
                Ok(if operator == Operator::Exists {
                    Concept::exists(role, filler)
                } else {
                    Concept::forall(role, filler)
                })
            }
        }
    }

    fn single_operand(operator: Operator, operands: Vec<Concept>) -> Result<Concept, AlcError> {
        let found = operands.len();
        let mut operands = operands.into_iter();
        match (operands.next(), found) {
            (Some(operand), 1) => Ok(operand),
            _ => Err(AlcError::InvalidArity { operator, expected: 1, found }),
        }
    }

    /// Name of an atomic concept. Operator nodes and empty names have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Concept::Atomic(name) if !name.is_empty() => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Concept::Atomic(_) => None,
            Concept::Not(_) => Some(Operator::Not),
            Concept::And(_) => Some(Operator::And),
            Concept::Or(_) => Some(Operator::Or),
            Concept::Exists { .. } => Some(Operator::Exists),
            Concept::Forall { .. } => Some(Operator::Forall),
        }
    }
}

impl From<&str> for Concept {
    fn from(name: &str) -> Self {
        Concept::atomic(name)
    }
}

impl From<String> for Concept {
    fn from(name: String) -> Self {
        Concept::Atomic(name)
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, operator: Operator, operands: &[Concept]) -> fmt::Result {
    f.write_str("(")?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", operator)?;
        }
        write!(f, "{}", operand)?;
    }
    f.write_str(")")
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concept::Atomic(name) => f.write_str(name),
            Concept::Not(operand) => write!(f, "(NOT {})", operand),
            Concept::And(operands) => write_group(f, Operator::And, operands),
            Concept::Or(operands) => write_group(f, Operator::Or, operands),
            Concept::Exists { role, filler } => write!(f, "(EXISTS {} {})", role, filler),
            Concept::Forall { role, filler } => write!(f, "(FORALL {} {})", role, filler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn arbre_fruitier() -> Concept {
        Concept::and(vec![
            Concept::atomic("Arbre"),
            Concept::exists(Role::new("produit"), Concept::atomic("Fruit")),
        ])
    }

    #[test]
    fn test_render_forms() {
        assert_eq!(Concept::atomic("Plante").to_string(), "Plante");
        assert_eq!(Concept::not(Concept::atomic("Fruit")).to_string(), "(NOT Fruit)");
        assert_eq!(arbre_fruitier().to_string(), "(Arbre AND (EXISTS produit Fruit))");
        assert_eq!(
            Concept::or(vec![Concept::atomic("Plante"), Concept::atomic("Fleur")]).to_string(),
            "(Plante OR Fleur)"
        );
        assert_eq!(
            Concept::forall(Role::new("mange"), Concept::atomic("Plante")).to_string(),
            "(FORALL mange Plante)"
        );
        assert_eq!(Concept::and(vec![]).to_string(), "()");
    }

    #[test]
    fn test_structural_equality_is_order_sensitive() {
        let ab = Concept::and(vec![Concept::atomic("A"), Concept::atomic("B")]);
        let ab2 = Concept::and(vec![Concept::atomic("A"), Concept::atomic("B")]);
        let ba = Concept::and(vec![Concept::atomic("B"), Concept::atomic("A")]);
        let or_ab = Concept::or(vec![Concept::atomic("A"), Concept::atomic("B")]);

        assert_eq!(ab, ab2);
        assert_ne!(ab, ba);
        assert_ne!(ab, or_ab);

        let mut set = HashSet::new();
        set.insert(ab.clone());
        assert!(set.contains(&ab2));
        assert!(!set.contains(&ba));
    }

    #[test]
    fn test_role_equality() {
        assert_eq!(Role::new("produit"), Role::new("produit"));
        assert_ne!(
            Concept::exists(Role::new("produit"), Concept::atomic("Fruit")),
            Concept::exists(Role::new("porte"), Concept::atomic("Fruit"))
        );
    }

    #[test]
    fn test_name_only_for_atomic() {
        assert_eq!(Concept::atomic("Rose").name(), Some("Rose"));
        assert_eq!(Concept::atomic("").name(), None);
        assert_eq!(arbre_fruitier().name(), None);
        assert_eq!(arbre_fruitier().operator(), Some(Operator::And));
    }

    #[test]
    fn test_compose_enforces_arity() {
        let fruit = Concept::atomic("Fruit");

        let not = Concept::compose(Operator::Not, None, vec![fruit.clone()]).unwrap();
        assert_eq!(not, Concept::not(fruit.clone()));

        match Concept::compose(Operator::Not, None, vec![]) {
            Err(AlcError::InvalidArity { operator, expected, found }) => {
                assert_eq!(operator, Operator::Not);
                assert_eq!(expected, 1);
                assert_eq!(found, 0);
            }
            other => panic!("Expected InvalidArity, got {:?}", other),
        }

        assert!(matches!(
            Concept::compose(Operator::Exists, None, vec![fruit.clone()]),
            Err(AlcError::MissingRole(Operator::Exists))
        ));
        assert!(matches!(
            Concept::compose(Operator::Forall, Some(Role::new("r")), vec![fruit.clone(), fruit.clone()]),
            Err(AlcError::InvalidArity { found: 2, .. })
        ));
        assert!(matches!(
            Concept::compose(Operator::And, Some(Role::new("r")), vec![]),
            Err(AlcError::UnexpectedRole(Operator::And))
        ));

        let empty_or = Concept::compose(Operator::Or, None, vec![]).unwrap();
        assert_eq!(empty_or, Concept::Or(vec![]));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Concept::not(Concept::atomic("Fruit"))).unwrap();
        assert_eq!(json, serde_json::json!({ "Not": { "Atomic": "Fruit" } }));
    }
}
