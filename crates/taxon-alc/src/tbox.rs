//! TBox (包含公理ストア)

use crate::model::Concept;
use serde::{Deserialize, Serialize};

/// Subsumption axiom `sub ⊑ sup`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axiom {
    pub sub: Concept,
    pub sup: Concept,
}

impl Axiom {
    pub fn new(sub: Concept, sup: Concept) -> Self {
        Self { sub, sup }
    }
}

/// Append-only, insertion-ordered list of axioms.
///
/// Duplicates are kept and the axiom graph may contain cycles; callers that
/// walk it must guard against revisiting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TBox {
    axioms: Vec<Axiom>,
}

impl TBox {
    pub fn new() -> Self {
        Self { axioms: Vec::new() }
    }

    /// Assert `sub ⊑ sup`
    pub fn add_axiom(&mut self, sub: Concept, sup: Concept) {
        self.axioms.push(Axiom::new(sub, sup));
    }

    /// Every asserted superconcept of `concept`, in insertion order
    pub fn get_parents(&self, concept: &Concept) -> Vec<&Concept> {
        self.axioms
            .iter()
            .filter(|axiom| &axiom.sub == concept)
            .map(|axiom| &axiom.sup)
            .collect()
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Axiom> {
        self.axioms.iter()
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }
}

impl FromIterator<Axiom> for TBox {
    fn from_iter<I: IntoIterator<Item = Axiom>>(iter: I) -> Self {
        Self { axioms: iter.into_iter().collect() }
    }
}

impl Extend<Axiom> for TBox {
    fn extend<I: IntoIterator<Item = Axiom>>(&mut self, iter: I) {
        self.axioms.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TBox {
    type Item = &'a Axiom;
    type IntoIter = std::slice::Iter<'a, Axiom>;

    fn into_iter(self) -> Self::IntoIter {
        self.axioms.iter()
    }
}
