//! ALC リーナー

use crate::classifier::{Classifier, Taxonomy};
use crate::config::ReasonerConfig;
use crate::loader::{JsonOntologyLoader, Ontology, OntologyLoader};
use crate::model::Concept;
use crate::subsumption::SubsumptionEngine;
use crate::AlcError;
use std::path::Path;

/// ALC reasoner
pub struct AlcReasoner {
    ontology: Ontology,
    config: ReasonerConfig,
}

impl AlcReasoner {
    pub fn new() -> Self {
        Self::with_config(ReasonerConfig::default())
    }

    pub fn with_config(config: ReasonerConfig) -> Self {
        Self {
            ontology: Ontology::new(),
            config,
        }
    }

    pub fn from_ontology(ontology: Ontology, config: ReasonerConfig) -> Self {
        Self { ontology, config }
    }

    /// Load ontology from a JSON document on disk
    pub fn load(path: impl AsRef<Path>, config: ReasonerConfig) -> Result<Self, AlcError> {
        let ontology = JsonOntologyLoader.load_from_path(path.as_ref())?;
        Ok(Self::from_ontology(ontology, config))
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    /// Assert `sub ⊑ sup`
    pub fn add_axiom(&mut self, sub: Concept, sup: Concept) {
        self.ontology.tbox.add_axiom(sub, sup);
    }

    /// Register a concept for classification
    pub fn add_concept(&mut self, concept: Concept) {
        self.ontology.concepts.push(concept);
    }

    /// Check if `sub` is subsumed by `sup` (sub ⊑ sup)
    pub fn is_subsumed(&self, sub: &Concept, sup: &Concept) -> bool {
        SubsumptionEngine::with_config(&self.ontology.tbox, &self.config).is_subsumed(sub, sup)
    }

    /// Simplified satisfiability: every concept is reported satisfiable
    pub fn is_satisfiable(&self, _concept: &Concept) -> bool {
        true
    }

    /// Every registered named concept other than `concept` that subsumes it
    pub fn superconcepts(&self, concept: &Concept) -> Vec<&Concept> {
        let engine = SubsumptionEngine::with_config(&self.ontology.tbox, &self.config);
        self.ontology
            .concepts
            .iter()
            .filter(|candidate| candidate.name().is_some() && *candidate != concept)
            .filter(|candidate| engine.is_subsumed(concept, candidate))
            .collect()
    }

    /// Classify the registered concepts
    pub fn classify(&self) -> Taxonomy {
        Classifier::with_config(&self.ontology.tbox, &self.config).classify(&self.ontology.concepts)
    }
}

impl Default for AlcReasoner {
    fn default() -> Self {
        Self::new()
    }
}
