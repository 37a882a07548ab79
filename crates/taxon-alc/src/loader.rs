//! オントロジーローダー

use crate::model::Concept;
use crate::parser::parse_concept;
use crate::tbox::{Axiom, TBox};
use crate::AlcError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Concepts to classify plus the TBox they are classified under
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    pub concepts: Vec<Concept>,
    pub tbox: TBox,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a document whose concepts are written in concept syntax
    pub fn from_document(document: &OntologyDocument) -> Result<Self, AlcError> {
        let mut ontology = Ontology::new();

        for (i, text) in document.concepts.iter().enumerate() {
            let concept = parse_entry(text, || format!("concepts[{}]", i))?;
            ontology.concepts.push(concept);
        }

        for (i, axiom) in document.axioms.iter().enumerate() {
            let sub = parse_entry(&axiom.sub, || format!("axioms[{}].sub", i))?;
            let sup = parse_entry(&axiom.sup, || format!("axioms[{}].sup", i))?;
            ontology.tbox.add_axiom(sub, sup);
        }

        Ok(ontology)
    }

    /// Render back into document form
    pub fn to_document(&self) -> OntologyDocument {
        OntologyDocument {
            concepts: self.concepts.iter().map(|c| c.to_string()).collect(),
            axioms: self
                .tbox
                .iter()
                .map(|Axiom { sub, sup }| AxiomDocument {
                    sub: sub.to_string(),
                    sup: sup.to_string(),
                })
                .collect(),
        }
    }
}

fn parse_entry(text: &str, location: impl FnOnce() -> String) -> Result<Concept, AlcError> {
    parse_concept(text).map_err(|e| AlcError::LoaderError(format!("{} {:?}: {}", location(), text, e)))
}

/// On-disk ontology format
///
/// ```json
/// { "concepts": ["Plante", "Arbre"],
///   "axioms": [{ "sub": "Arbre", "sup": "Plante" }] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyDocument {
    #[serde(default)]
    pub concepts: Vec<String>,

    #[serde(default)]
    pub axioms: Vec<AxiomDocument>,
}

/// `sub ⊑ sup`, both in concept syntax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxiomDocument {
    pub sub: String,
    pub sup: String,
}

/// Ontology loader trait
pub trait OntologyLoader {
    fn load_from_str(&self, input: &str) -> Result<Ontology, AlcError>;

    fn load_from_path(&self, path: &Path) -> Result<Ontology, AlcError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AlcError::LoaderError(format!("cannot read {}: {}", path.display(), e)))?;
        let ontology = self.load_from_str(&contents)?;
        info!(
            "loaded {} concepts and {} axioms from {}",
            ontology.concepts.len(),
            ontology.tbox.len(),
            path.display()
        );
        Ok(ontology)
    }
}

/// Loader for JSON ontology documents
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOntologyLoader;

impl OntologyLoader for JsonOntologyLoader {
    fn load_from_str(&self, input: &str) -> Result<Ontology, AlcError> {
        let document: OntologyDocument = serde_json::from_str(input)
            .map_err(|e| AlcError::LoaderError(format!("invalid ontology document: {}", e)))?;
        Ontology::from_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::io::Write;

    const PLANTS: &str = r#"{
        "concepts": ["Plante", "Fruit", "Pomme", "(Arbre AND (EXISTS produit Fruit))"],
        "axioms": [
            { "sub": "Fruit", "sup": "Plante" },
            { "sub": "Pomme", "sup": "Fruit" },
            { "sub": "(Arbre AND (EXISTS produit Fruit))", "sup": "Arbre" }
        ]
    }"#;

    #[test]
    fn test_load_document() {
        let ontology = JsonOntologyLoader.load_from_str(PLANTS).unwrap();

        assert_eq!(ontology.concepts.len(), 4);
        assert_eq!(ontology.concepts[3], fixtures::arbre_fruitier());
        assert_eq!(ontology.tbox.len(), 3);
        assert_eq!(
            ontology.tbox.get_parents(&fixtures::arbre_fruitier()),
            vec![&Concept::atomic("Arbre")]
        );
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let ontology = JsonOntologyLoader.load_from_str("{}").unwrap();
        assert!(ontology.concepts.is_empty());
        assert!(ontology.tbox.is_empty());
    }

    #[test]
    fn test_bad_entry_is_located() {
        let input = r#"{ "axioms": [{ "sub": "Rose", "sup": "(Fleur AND" }] }"#;
        match JsonOntologyLoader.load_from_str(input) {
            Err(AlcError::LoaderError(message)) => {
                assert!(message.starts_with("axioms[0].sup"), "{}", message);
            }
            other => panic!("Expected LoaderError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            JsonOntologyLoader.load_from_str("[1, 2"),
            Err(AlcError::LoaderError(_))
        ));
    }

    #[test]
    fn test_document_round_trip_of_fixture() {
        let ontology = fixtures::plant_ontology();
        let document = ontology.to_document();
        let reloaded = Ontology::from_document(&document).unwrap();

        assert_eq!(reloaded.concepts, ontology.concepts);
        assert_eq!(reloaded.tbox.axioms(), ontology.tbox.axioms());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PLANTS.as_bytes()).unwrap();

        let ontology = JsonOntologyLoader.load_from_path(file.path()).unwrap();
        assert_eq!(ontology.concepts[0], Concept::atomic("Plante"));

        let missing = JsonOntologyLoader.load_from_path(Path::new("/nonexistent/taxon.json"));
        assert!(matches!(missing, Err(AlcError::LoaderError(_))));
    }
}
