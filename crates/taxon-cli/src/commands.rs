//! CLI command definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use taxon_alc::fixtures;
use taxon_alc::{AlcReasoner, Concept, JsonOntologyLoader, Ontology, OntologyLoader, ReasonerConfig};
use tracing::info;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "taxon")]
#[command(about = "ALC concept subsumption and classification")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Reasoner configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum nesting of OR / NOT sub-queries
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the taxonomy of direct parents for an ontology
    Classify {
        /// Ontology document (JSON); defaults to the last loaded one
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Keep every named superconcept instead of only direct parents
        #[arg(long)]
        all_parents: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check whether one concept is subsumed by another
    Subsumes {
        /// Ontology document (JSON); defaults to the last loaded one
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Subsumee, e.g. "(Arbre AND (EXISTS produit Fruit))"
        #[arg(long)]
        sub: String,

        /// Subsumer
        #[arg(long)]
        sup: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse a concept expression and print its normalized form
    Parse {
        /// Concept expression
        expression: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run the sample plant ontology
    Demo {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show system information
    Info,
}

/// Output format options
#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

/// Command execution result
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Reasoner settings from `--config` and `--max-depth`
pub fn resolve_config(config_path: Option<&Path>, max_depth: Option<usize>) -> Result<ReasonerConfig> {
    let mut config = match config_path {
        Some(path) => ReasonerConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ReasonerConfig::default(),
    };

    if let Some(depth) = max_depth {
        config.max_recursion_depth = Some(depth);
    }
    config.validate()?;

    Ok(config)
}

fn render<T: Serialize>(format: &OutputFormat, text: String, value: &T) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => text,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
    })
}

fn parse_arg(label: &str, text: &str) -> Result<Concept> {
    text.parse::<Concept>()
        .with_context(|| format!("invalid {} concept {:?}", label, text))
}

/// Execute CLI commands
pub struct CommandExecutor {
    config: ReasonerConfig,
    current: Option<Ontology>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::with_config(ReasonerConfig::default())
    }

    pub fn with_config(config: ReasonerConfig) -> Self {
        Self { config, current: None }
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ReasonerConfig) {
        self.config = config;
    }

    /// Load `file`, or fall back to the ontology loaded by an earlier command
    fn ontology(&mut self, file: Option<PathBuf>) -> Result<Ontology> {
        match file {
            Some(path) => {
                let ontology = JsonOntologyLoader
                    .load_from_path(&path)
                    .with_context(|| format!("failed to load ontology {}", path.display()))?;
                self.current = Some(ontology.clone());
                Ok(ontology)
            }
            None => self
                .current
                .clone()
                .ok_or_else(|| anyhow::anyhow!("No ontology loaded; pass --file <ontology.json>")),
        }
    }

    /// Execute a CLI command
    pub fn execute(&mut self, command: Commands) -> Result<CommandResult> {
        match command {
            Commands::Classify { file, all_parents, format } => self.execute_classify(file, all_parents, format),
            Commands::Subsumes { file, sub, sup, format } => self.execute_subsumes(file, sub, sup, format),
            Commands::Parse { expression, format } => self.execute_parse(expression, format),
            Commands::Demo { format } => self.execute_demo(format),
            Commands::Info => self.execute_info(),
        }
    }

    fn execute_classify(&mut self, file: Option<PathBuf>, all_parents: bool, format: OutputFormat) -> Result<CommandResult> {
        let ontology = self.ontology(file)?;
        let mut config = self.config.clone();
        if all_parents {
            config.reduce_redundant_parents = false;
        }

        let reasoner = AlcReasoner::from_ontology(ontology, config);
        let taxonomy = reasoner.classify();
        info!("taxonomy has {} entries", taxonomy.len());

        let message = render(&format, taxonomy.to_string().trim_end().to_string(), &taxonomy)?;

        Ok(CommandResult {
            success: true,
            message,
            data: Some(serde_json::to_value(&taxonomy)?),
        })
    }

    fn execute_subsumes(&mut self, file: Option<PathBuf>, sub: String, sup: String, format: OutputFormat) -> Result<CommandResult> {
        let sub = parse_arg("--sub", &sub)?;
        let sup = parse_arg("--sup", &sup)?;

        let ontology = self.ontology(file)?;
        let reasoner = AlcReasoner::from_ontology(ontology, self.config.clone());
        let subsumed = reasoner.is_subsumed(&sub, &sup);

        let data = serde_json::json!({
            "sub": sub.to_string(),
            "sup": sup.to_string(),
            "subsumed": subsumed,
        });
        let message = render(&format, format!("{} ⊑ {} : {}", sub, sup, subsumed), &data)?;

        Ok(CommandResult {
            success: true,
            message,
            data: Some(data),
        })
    }

    fn execute_parse(&self, expression: String, format: OutputFormat) -> Result<CommandResult> {
        let concept = parse_arg("expression", &expression)?;

        let data = serde_json::json!({
            "concept": concept.to_string(),
            "name": concept.name(),
            "operator": concept.operator().map(|op| op.keyword()),
            "tree": concept,
        });
        let message = render(&format, concept.to_string(), &data)?;

        Ok(CommandResult {
            success: true,
            message,
            data: Some(data),
        })
    }

    fn execute_demo(&self, format: OutputFormat) -> Result<CommandResult> {
        let ontology = fixtures::plant_ontology();
        let reasoner = AlcReasoner::from_ontology(ontology, self.config.clone());

        let queries = vec![
            (Concept::atomic("Arbre"), Concept::atomic("Plante")),
            (fixtures::arbre_fruitier(), Concept::atomic("Arbre")),
            (Concept::atomic("Fleur"), Concept::atomic("Plante")),
            (Concept::atomic("Pomme"), Concept::atomic("Fruit")),
            (Concept::atomic("Pomme"), fixtures::non_fruit()),
            (fixtures::union_plante_fleur(), Concept::atomic("Rose")),
        ];

        let mut lines = vec!["Subsumption:".to_string()];
        let mut results = Vec::new();
        for (sub, sup) in &queries {
            let subsumed = reasoner.is_subsumed(sub, sup);
            lines.push(format!("  {} ⊑ {} : {}", sub, sup, subsumed));
            results.push(serde_json::json!({
                "sub": sub.to_string(),
                "sup": sup.to_string(),
                "subsumed": subsumed,
            }));
        }

        let taxonomy = reasoner.classify();
        lines.push(String::new());
        lines.push("Classification:".to_string());
        for (name, parents) in taxonomy.iter() {
            lines.push(format!("  {} : [{}]", name, parents.join(", ")));
        }

        let data = serde_json::json!({
            "subsumption": results,
            "taxonomy": taxonomy,
        });
        let message = render(&format, lines.join("\n"), &data)?;

        Ok(CommandResult {
            success: true,
            message,
            data: Some(data),
        })
    }

    fn execute_info(&self) -> Result<CommandResult> {
        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "repository": env!("CARGO_PKG_REPOSITORY"),
            "operators": ["AND", "OR", "NOT", "EXISTS", "FORALL"],
            "config": &self.config,
        });

        Ok(CommandResult {
            success: true,
            message: serde_json::to_string_pretty(&info)?,
            data: Some(info),
        })
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}
