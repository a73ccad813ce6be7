//! NER collaborator boundary.
//!
//! The engine contract is line-level: given one assembled text line, return
//! labeled character spans over that line. Two backends are bundled — a
//! remote model service spoken to over HTTP, and a local subprocess — and
//! the active one is chosen once at construction from configuration.

mod command;
mod engine;
mod error;
mod http;

pub use command::CommandNerEngine;
pub use engine::NerEngine;
pub use error::NerError;
pub use http::HttpNerEngine;

use serde::{Deserialize, Serialize};

/// A labeled character range within a line of text.
///
/// `start`/`end` are character offsets, half-open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// NER backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NerBackendType {
    /// Remote model service (JSON over HTTP).
    #[default]
    Http,
    /// Local subprocess: line on stdin, span JSON on stdout.
    Command,
}

/// NER configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NerConfig {
    /// Which backend to construct.
    pub backend: NerBackendType,
    /// HTTP backend endpoint, e.g. "http://127.0.0.1:9090/extract".
    pub endpoint: Option<String>,
    /// Subprocess backend executable.
    pub command: Option<String>,
    /// Extra arguments for the subprocess backend.
    pub args: Vec<String>,
    /// Entity labels counted as person designations. Defaults to PER/PERSON.
    pub person_labels: Option<Vec<String>>,
    /// HTTP request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl NerConfig {
    pub fn timeout_secs_or_default(&self) -> u64 {
        self.timeout_secs.unwrap_or(30)
    }

    pub fn person_labels(&self) -> PersonLabels {
        match &self.person_labels {
            Some(labels) if !labels.is_empty() => PersonLabels::new(labels.clone()),
            _ => PersonLabels::default(),
        }
    }
}

/// The accepted set of person-entity labels for the active backend.
#[derive(Debug, Clone)]
pub struct PersonLabels(Vec<String>);

impl PersonLabels {
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    /// Case-insensitive membership test.
    pub fn matches(&self, label: &str) -> bool {
        self.0.iter().any(|l| l.eq_ignore_ascii_case(label))
    }
}

impl Default for PersonLabels {
    fn default() -> Self {
        Self(vec!["PER".to_string(), "PERSON".to_string()])
    }
}

/// Construct the configured NER backend.
pub fn create_engine(config: &NerConfig) -> Result<Box<dyn NerEngine>, NerError> {
    match config.backend {
        NerBackendType::Http => {
            let endpoint = config
                .endpoint
                .as_deref()
                .ok_or_else(|| NerError::Config("http backend requires an endpoint".into()))?;
            let engine = HttpNerEngine::new(endpoint, config.timeout_secs_or_default())?;
            Ok(Box::new(engine))
        }
        NerBackendType::Command => {
            let command = config
                .command
                .as_deref()
                .ok_or_else(|| NerError::Config("command backend requires a command".into()))?;
            Ok(Box::new(CommandNerEngine::new(command, config.args.clone())))
        }
    }
}
