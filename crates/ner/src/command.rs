//! Subprocess NER backend.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::engine::NerEngine;
use crate::error::NerError;
use crate::EntitySpan;

/// NER engine backed by a local subprocess.
///
/// Spawns the configured command per line, writes the line to its stdin and
/// parses a JSON array of spans from its stdout.
pub struct CommandNerEngine {
    program: String,
    args: Vec<String>,
}

impl CommandNerEngine {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        log::info!("[Ner] command backend: {}", program);
        Self {
            program: program.to_string(),
            args,
        }
    }
}

impl NerEngine for CommandNerEngine {
    fn extract_entities(&mut self, line_text: &str) -> Result<Vec<EntitySpan>, NerError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| NerError::Transport(format!("failed to spawn {}: {}", self.program, e)))?;

        {
            let stdin = child
                .stdin
                .as_mut()
                .ok_or_else(|| NerError::Transport("child stdin unavailable".into()))?;
            stdin.write_all(line_text.as_bytes())?;
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NerError::Backend(format!(
                "{} exited with error: {}",
                self.program, stderr
            )));
        }

        let spans: Vec<EntitySpan> = serde_json::from_slice(&output.stdout)?;
        Ok(spans)
    }
}
