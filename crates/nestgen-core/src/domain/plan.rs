//! Generation plan and report.
//!
//! Planning looks at the file system once and decides what each step will
//! do; execution walks the plan in order. A plan is also what `--dry-run`
//! prints, so it records steps that will be skipped and why.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{
    layout::{ModuleLayout, Schematic, TemplateVariant},
    naming::ModuleName,
    templates::Artifact,
};

/// One unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Step {
    /// Run `<generator> g <schematic> <kebab>`.
    RunGenerator { schematic: Schematic, name: String },
    /// Create a module subfolder.
    CreateDir { path: PathBuf },
    /// Write a templated file.
    WriteFile { artifact: Artifact, path: PathBuf },
    /// Move a generator-produced file into a subfolder.
    Relocate {
        schematic: Schematic,
        from: PathBuf,
        to: PathBuf,
        spec: bool,
    },
    /// Rewrite the module file for the relocated files.
    PatchModule { path: PathBuf },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunGenerator { schematic, name } => write!(f, "generate {schematic} {name}"),
            Self::CreateDir { path } => write!(f, "create folder {}", path.display()),
            Self::WriteFile { artifact, path } => {
                write!(f, "write {artifact} {}", path.display())
            }
            Self::Relocate { from, to, .. } => {
                write!(f, "move {} -> {}", from.display(), to.display())
            }
            Self::PatchModule { path } => write!(f, "update module {}", path.display()),
        }
    }
}

/// Why a planned step will not run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum SkipReason {
    /// The target is already on disk.
    AlreadyExists { path: PathBuf },
    /// The external generator is disabled for this run.
    GeneratorDisabled,
    /// A file the step depends on is not there.
    Missing { path: PathBuf },
    /// Applying the step would not change anything.
    UpToDate { path: PathBuf },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists { path } => write!(f, "{} already exists", path.display()),
            Self::GeneratorDisabled => f.write_str("generator disabled"),
            Self::Missing { path } => write!(f, "{} not found", path.display()),
            Self::UpToDate { path } => write!(f, "{} is up to date", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub step: Step,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<SkipReason>,
}

impl PlannedStep {
    pub fn run(step: Step) -> Self {
        Self { step, skip: None }
    }

    pub fn skip(step: Step, reason: SkipReason) -> Self {
        Self {
            step,
            skip: Some(reason),
        }
    }

    pub fn will_run(&self) -> bool {
        self.skip.is_none()
    }
}

/// Ordered steps for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    pub module: ModuleName,
    pub project_root: PathBuf,
    pub module_dir: PathBuf,
    pub variant: TemplateVariant,
    pub steps: Vec<PlannedStep>,
}

impl GenerationPlan {
    pub fn new(layout: &ModuleLayout) -> Self {
        Self {
            module: layout.name().clone(),
            project_root: layout.project_root().to_path_buf(),
            module_dir: layout.module_dir().to_path_buf(),
            variant: layout.variant(),
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: PlannedStep) {
        self.steps.push(step);
    }

    pub fn runnable(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.will_run()).map(|s| &s.step)
    }

    pub fn is_noop(&self) -> bool {
        self.runnable().next().is_none()
    }
}

/// What happened to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    Done,
    Skipped { why: SkipReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub outcome: Outcome,
}

/// Result of executing a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub module: ModuleName,
    pub module_dir: PathBuf,
    pub steps: Vec<StepReport>,
}

impl GenerationReport {
    pub fn new(module: ModuleName, module_dir: PathBuf) -> Self {
        Self {
            module,
            module_dir,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: Step, outcome: Outcome) {
        self.steps.push(StepReport { step, outcome });
    }

    /// Templated files written during this run.
    pub fn written_files(&self) -> Vec<&PathBuf> {
        self.steps
            .iter()
            .filter(|r| r.outcome == Outcome::Done)
            .filter_map(|r| match &r.step {
                Step::WriteFile { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn skipped_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Skipped { .. }))
            .count()
    }
}
