//! Runs the Nest CLI as a child process.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use nestgen_core::{
    application::{ApplicationError, ports::Generator},
    domain::Schematic,
    error::NestgenResult,
};

/// Invokes `<program> <args..> g <schematic> <name>` in the project root.
///
/// The child inherits stdout and stderr so the user sees Nest's own
/// `CREATE`/`UPDATE` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestCliGenerator {
    program: String,
    args: Vec<String>,
}

impl NestCliGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command(&self, schematic: Schematic, name: &str, project_root: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("g")
            .arg(schematic.as_str())
            .arg(name)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

/// `npx nest`, resolved from the project's local `node_modules`.
impl Default for NestCliGenerator {
    fn default() -> Self {
        Self::new("npx", vec!["nest".to_string()])
    }
}

impl Generator for NestCliGenerator {
    #[instrument(skip(self, project_root), fields(root = %project_root.display()))]
    fn generate(&self, schematic: Schematic, name: &str, project_root: &Path) -> NestgenResult<()> {
        let command = self.describe(schematic, name);
        debug!(%command, "Spawning generator");

        let status = self
            .command(schematic, name, project_root)
            .status()
            .map_err(|e| ApplicationError::GeneratorUnavailable {
                command: command.clone(),
                reason: spawn_reason(&e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::GeneratorFailed {
                command,
                status: status.code(),
            }
            .into())
        }
    }

    fn describe(&self, schematic: Schematic, name: &str) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 4);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.extend(["g", schematic.as_str(), name]);
        parts.join(" ")
    }
}

fn spawn_reason(e: &io::Error) -> String {
    match e.kind() {
        io::ErrorKind::NotFound => "program not found on PATH".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => e.to_string(),
    }
}
