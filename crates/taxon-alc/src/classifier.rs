//! 概念分類 (タクソノミー構築)

use crate::config::ReasonerConfig;
use crate::model::Concept;
use crate::subsumption::SubsumptionEngine;
use crate::tbox::TBox;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Concept name -> direct superconcept names, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` with no parents unless it is already present
    fn insert_key(&mut self, name: &str) {
        if !self.index.contains_key(name) {
            self.index.insert(name.to_string(), self.entries.len());
            self.entries.push((name.to_string(), Vec::new()));
        }
    }

    fn parents_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        let slot = *self.index.get(name)?;
        Some(&mut self.entries[slot].1)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.index.get(name).map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, parents)| (name.as_str(), parents.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_inner(self) -> Vec<(String, Vec<String>)> {
        self.entries
    }
}

impl Serialize for Taxonomy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, parents) in &self.entries {
            map.serialize_entry(name, parents)?;
        }
        map.end()
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, parents) in &self.entries {
            writeln!(f, "{} : [{}]", name, parents.join(", "))?;
        }
        Ok(())
    }
}

/// Builds a taxonomy over the named concepts of a concept list
pub struct Classifier<'a> {
    engine: SubsumptionEngine<'a>,
    reduce_redundant_parents: bool,
}

impl<'a> Classifier<'a> {
    pub fn new(tbox: &'a TBox) -> Self {
        Self::with_config(tbox, &ReasonerConfig::default())
    }

    pub fn with_config(tbox: &'a TBox, config: &ReasonerConfig) -> Self {
        Self {
            engine: SubsumptionEngine::with_config(tbox, config),
            reduce_redundant_parents: config.reduce_redundant_parents,
        }
    }

    /// Classify `concepts`.
    ///
    /// Only atomic concepts with a non-empty name take part. Parent lists
    /// follow the order of `concepts`; a name listed twice contributes twice.
    pub fn classify(&self, concepts: &[Concept]) -> Taxonomy {
        let mut taxonomy = Taxonomy::new();

        for concept in concepts {
            if let Some(name) = concept.name() {
                taxonomy.insert_key(name);
            }
        }

        for sub in concepts {
            let sub_name = match sub.name() {
                Some(name) => name,
                None => continue,
            };

            for sup in concepts {
                let sup_name = match sup.name() {
                    Some(name) => name,
                    None => continue,
                };

                if sub != sup && self.engine.is_subsumed(sub, sup) {
                    if let Some(parents) = taxonomy.parents_mut(sub_name) {
                        parents.push(sup_name.to_string());
                    }
                }
            }
        }

        if self.reduce_redundant_parents {
            self.reduce(&mut taxonomy);
        }

        info!("classified {} named concepts", taxonomy.len());
        taxonomy
    }

    /// Drop every parent implied by another parent in the same list.
    ///
    /// Works on names only: each candidate is re-wrapped as an atomic concept,
    /// so any richer structure behind a name is not revisited.
    fn reduce(&self, taxonomy: &mut Taxonomy) {
        for (name, parents) in taxonomy.entries.iter_mut() {
            let direct: Vec<String> = parents
                .iter()
                .filter(|&candidate| {
                    let implied = parents.iter().filter(|&other| other != candidate).any(|other| {
                        self.engine.is_subsumed(
                            &Concept::atomic(other.as_str()),
                            &Concept::atomic(candidate.as_str()),
                        )
                    });
                    if implied {
                        debug!("{}: dropping redundant parent {}", name, candidate);
                    }
                    !implied
                })
                .cloned()
                .collect();
            *parents = direct;
        }
    }
}

/// Classify `concepts` under `tbox` with default settings
pub fn classify(concepts: &[Concept], tbox: &TBox) -> Taxonomy {
    Classifier::new(tbox).classify(concepts)
}
