//! 包含判定エンジン

use crate::config::ReasonerConfig;
use crate::model::Concept;
use crate::tbox::TBox;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Decides `sub ⊑ sup` against a TBox.
///
/// The search is a depth-first walk over a shared work stack:
/// - equality with `sup` succeeds immediately
/// - AND pushes its operands onto the same stack, so one conjunct reaching
///   `sup` is enough
/// - OR runs a sub-query per operand and succeeds if any of them does
/// - NOT answers with the negated sub-query for its operand and abandons the
///   rest of the stack
/// - EXISTS / FORALL are dead ends
/// - atomic concepts expand to their asserted parents
///
/// A per-query visited set keeps cyclic axiom graphs finite.
pub struct SubsumptionEngine<'a> {
    tbox: &'a TBox,
    max_depth: Option<usize>,
}

impl<'a> SubsumptionEngine<'a> {
    pub fn new(tbox: &'a TBox) -> Self {
        Self { tbox, max_depth: None }
    }

    pub fn with_config(tbox: &'a TBox, config: &ReasonerConfig) -> Self {
        Self {
            tbox,
            max_depth: config.max_recursion_depth,
        }
    }

    /// Check if `sub` is subsumed by `sup` (sub ⊑ sup)
    pub fn is_subsumed(&self, sub: &Concept, sup: &Concept) -> bool {
        let result = self.search(sub, sup, 0);
        debug!("is_subsumed({}, {}) = {}", sub, sup, result);
        result
    }

    fn search<'q>(&self, sub: &'q Concept, sup: &Concept, depth: usize) -> bool
    where
        'a: 'q,
    {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                warn!("recursion limit {} reached while checking {} against {}", limit, sub, sup);
                return false;
            }
        }

        let mut stack: Vec<&'q Concept> = vec![sub];
        let mut visited: HashSet<&'q Concept> = HashSet::new();

        while let Some(current) = stack.pop() {
            if current == sup {
                return true;
            }

            if !visited.insert(current) {
                continue;
            }

            match current {
                Concept::And(operands) => {
                    stack.extend(operands.iter());
                }
                Concept::Or(operands) => {
                    if operands.iter().any(|operand| self.search(operand, sup, depth + 1)) {
                        return true;
                    }
                }
                Concept::Not(operand) => {
                    trace!("negation {} decides the query", current);
                    return !self.search(operand, sup, depth + 1);
                }
                Concept::Exists { .. } | Concept::Forall { .. } => {
                    trace!("restriction {} is a dead end", current);
                }
                Concept::Atomic(_) => {
                    stack.extend(self.tbox.get_parents(current));
                }
            }
        }

        false
    }
}

/// Check if `sub` is subsumed by `sup` under `tbox`, with default settings
pub fn is_subsumed(sub: &Concept, sup: &Concept, tbox: &TBox) -> bool {
    SubsumptionEngine::new(tbox).is_subsumed(sub, sup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::Role;

    fn atomic(name: &str) -> Concept {
        Concept::atomic(name)
    }

    #[test]
    fn test_direct_and_transitive() {
        let ontology = fixtures::plant_ontology();
        let tbox = &ontology.tbox;

        assert!(is_subsumed(&atomic("Arbre"), &atomic("Plante"), tbox));
        assert!(is_subsumed(&atomic("Fleur"), &atomic("Plante"), tbox));
        assert!(is_subsumed(&atomic("Pomme"), &atomic("Fruit"), tbox));
        assert!(is_subsumed(&atomic("Pomme"), &atomic("Plante"), tbox));
        assert!(!is_subsumed(&atomic("Plante"), &atomic("Pomme"), tbox));
        assert!(!is_subsumed(&atomic("Rose"), &atomic("Fruit"), tbox));
    }

    #[test]
    fn test_negated_target_is_not_reached() {
        let ontology = fixtures::plant_ontology();
        assert!(!is_subsumed(&atomic("Pomme"), &fixtures::non_fruit(), &ontology.tbox));
    }

    #[test]
    fn test_conjunction_reaches_operand() {
        let ontology = fixtures::plant_ontology();
        let arbre_fruitier = fixtures::arbre_fruitier();

        assert!(is_subsumed(&arbre_fruitier, &atomic("Arbre"), &ontology.tbox));
        assert!(is_subsumed(&arbre_fruitier, &atomic("Plante"), &ontology.tbox));

        // Without axioms the Arbre operand alone still matches
        let empty = TBox::new();
        assert!(is_subsumed(&arbre_fruitier, &atomic("Arbre"), &empty));
        // The EXISTS operand is never looked into
        assert!(!is_subsumed(&arbre_fruitier, &atomic("Fruit"), &empty));
    }

    #[test]
    fn test_conjunction_is_shared_search() {
        // Only one conjunct needs to reach the target
        let ontology = fixtures::plant_ontology();
        let mixed = Concept::and(vec![atomic("Rose"), atomic("Pomme")]);
        assert!(is_subsumed(&mixed, &atomic("Fruit"), &ontology.tbox));
        assert!(is_subsumed(&mixed, &atomic("Fleur"), &ontology.tbox));
    }

    #[test]
    fn test_disjunction_as_subsumee() {
        let ontology = fixtures::plant_ontology();
        let tbox = &ontology.tbox;
        let union = fixtures::union_plante_fleur();

        // Neither Plante nor Fleur reaches Rose
        assert!(!is_subsumed(&union, &atomic("Rose"), tbox));
        // Fleur reaches Plante, so one operand is enough
        assert!(is_subsumed(&union, &atomic("Plante"), tbox));
        assert!(is_subsumed(
            &Concept::or(vec![atomic("Rose"), atomic("Pomme")]),
            &atomic("Fruit"),
            tbox
        ));
    }

    #[test]
    fn test_negation_returns_early() {
        let ontology = fixtures::plant_ontology();
        let tbox = &ontology.tbox;

        assert!(!is_subsumed(&Concept::not(atomic("Fruit")), &atomic("Fruit"), tbox));
        assert!(is_subsumed(&Concept::not(atomic("Pomme")), &atomic("Rose"), tbox));

        // Fleur would reach Plante, but the NOT operand is popped first and
        // decides the whole query
        let conj = Concept::and(vec![atomic("Fleur"), Concept::not(atomic("Plante"))]);
        assert!(!is_subsumed(&conj, &atomic("Plante"), tbox));

        // In the other order Fleur is expanded first and hits Plante
        let conj = Concept::and(vec![Concept::not(atomic("Plante")), atomic("Fleur")]);
        assert!(is_subsumed(&conj, &atomic("Plante"), tbox));
    }

    #[test]
    fn test_restrictions_are_dead_ends() {
        let mut tbox = TBox::new();
        let restriction = Concept::exists(Role::new("produit"), atomic("Fruit"));
        tbox.add_axiom(restriction.clone(), atomic("Plante"));

        assert!(is_subsumed(&restriction, &restriction, &tbox));
        assert!(!is_subsumed(&restriction, &atomic("Plante"), &tbox));
        assert!(!is_subsumed(
            &Concept::forall(Role::new("produit"), atomic("Fruit")),
            &atomic("Fruit"),
            &tbox
        ));
    }

    #[test]
    fn test_empty_operand_lists() {
        let tbox = fixtures::plant_ontology().tbox;
        assert!(!is_subsumed(&Concept::and(vec![]), &atomic("Plante"), &tbox));
        assert!(!is_subsumed(&Concept::or(vec![]), &atomic("Plante"), &tbox));
        assert!(is_subsumed(&Concept::or(vec![]), &Concept::or(vec![]), &tbox));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut tbox = TBox::new();
        tbox.add_axiom(atomic("A"), atomic("B"));
        tbox.add_axiom(atomic("B"), atomic("A"));

        assert!(!is_subsumed(&atomic("A"), &atomic("C"), &tbox));
        assert!(is_subsumed(&atomic("A"), &atomic("B"), &tbox));
        assert!(is_subsumed(&atomic("B"), &atomic("A"), &tbox));
    }

    #[test]
    fn test_non_atomic_axioms_expand_only_through_operands() {
        // An axiom on a conjunction is never consulted: only atomic concepts
        // look up their parents
        let ontology = fixtures::plant_ontology();
        let herb = Concept::and(vec![atomic("PlanteHerbacee")]);
        let mut tbox = ontology.tbox.clone();
        tbox.add_axiom(herb.clone(), atomic("Rose"));

        assert!(!is_subsumed(&herb, &atomic("Rose"), &tbox));
        assert!(is_subsumed(&herb, &atomic("Plante"), &tbox));
    }

    #[test]
    fn test_recursion_limit() {
        let ontology = fixtures::plant_ontology();
        let nested = Concept::or(vec![Concept::or(vec![atomic("Rose")])]);

        let unbounded = SubsumptionEngine::new(&ontology.tbox);
        assert!(unbounded.is_subsumed(&nested, &atomic("Fleur")));

        let config = ReasonerConfig::default().with_max_recursion_depth(1);
        let bounded = SubsumptionEngine::with_config(&ontology.tbox, &config);
        assert!(!bounded.is_subsumed(&nested, &atomic("Fleur")));
        // Equality is still checked before any recursion
        assert!(bounded.is_subsumed(&nested, &nested));

        let config = ReasonerConfig::default().with_max_recursion_depth(2);
        let bounded = SubsumptionEngine::with_config(&ontology.tbox, &config);
        assert!(bounded.is_subsumed(&nested, &atomic("Fleur")));
    }

    #[test]
    fn test_recursion_limit_cuts_deep_nesting() {
        let ontology = fixtures::plant_ontology();
        let mut nested = atomic("Rose");
        for _ in 0..300 {
            nested = Concept::or(vec![nested]);
        }

        let unbounded = SubsumptionEngine::new(&ontology.tbox);
        assert!(unbounded.is_subsumed(&nested, &atomic("Plante")));

        let config = ReasonerConfig::default().with_max_recursion_depth(64);
        let bounded = SubsumptionEngine::with_config(&ontology.tbox, &config);
        assert!(!bounded.is_subsumed(&nested, &atomic("Plante")));
    }
}
