//! ALC 推論エンジン
//!
//! このクレートは ALC 記述論理の簡易推論を提供します:
//! - 概念式 (AND, OR, NOT, EXISTS, FORALL) とロール
//! - TBox (包含公理 C ⊑ D の格納)
//! - 包含判定 (循環に安全な探索)
//! - 分類 (直接の上位概念のみを持つタクソノミー)

pub mod model;
pub mod parser;
pub mod tbox;
pub mod subsumption;
pub mod classifier;
pub mod config;
pub mod loader;
pub mod reasoner;
pub mod fixtures;

pub use model::{Concept, Operator, Role};
pub use tbox::{Axiom, TBox};
pub use subsumption::{is_subsumed, SubsumptionEngine};
pub use classifier::{classify, Classifier, Taxonomy};
pub use config::ReasonerConfig;
pub use loader::{JsonOntologyLoader, Ontology, OntologyDocument, OntologyLoader};
pub use reasoner::AlcReasoner;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlcError {
    #[error("Invalid arity for {operator}: expected {expected}, found {found}")]
    InvalidArity {
        operator: Operator,
        expected: usize,
        found: usize,
    },

    #[error("{0} requires a role")]
    MissingRole(Operator),

    #[error("{0} does not take a role")]
    UnexpectedRole(Operator),

    #[error("Parse error at {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Loader error: {0}")]
    LoaderError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
