//! Module Service - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Derive the module layout from the request
//! 2. Plan every step against the current file system
//! 3. Execute the plan top to bottom, stopping at the first failure
//!
//! Nothing is rolled back on failure; every write is guarded by an
//! existence check, so re-running after fixing the cause is safe.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Generator},
    },
    domain::{
        Artifact, GenerationPlan, GenerationReport, ModuleLayout, ModuleName, Outcome,
        PlannedStep, RenderContext, Schematic, SkipReason, Step, TemplateVariant,
        patch_module_source, patch_spec_source,
    },
    error::NestgenResult,
};

/// Everything needed to generate one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub name: ModuleName,
    pub project_root: PathBuf,
    pub src_dir: PathBuf,
    pub variant: TemplateVariant,
    /// When false the external generator is never invoked.
    pub run_generator: bool,
}

impl GenerateRequest {
    /// Request with the defaults: `./src`, repository variant, generator on.
    pub fn new(name: ModuleName) -> Self {
        Self {
            name,
            project_root: PathBuf::from("."),
            src_dir: PathBuf::from("src"),
            variant: TemplateVariant::default(),
            run_generator: true,
        }
    }

    pub fn layout(&self) -> NestgenResult<ModuleLayout> {
        Ok(ModuleLayout::new(
            &self.project_root,
            &self.src_dir,
            self.name.clone(),
            self.variant,
        )?)
    }
}

/// Main generation service.
pub struct ModuleService {
    filesystem: Box<dyn Filesystem>,
    generator: Box<dyn Generator>,
}

impl ModuleService {
    /// Create a new service with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, generator: Box<dyn Generator>) -> Self {
        Self {
            filesystem,
            generator,
        }
    }

    /// Plan, then execute.
    #[instrument(skip_all, fields(module = %request.name, variant = %request.variant))]
    pub fn generate(&self, request: &GenerateRequest) -> NestgenResult<GenerationReport> {
        let plan = self.plan(request)?;
        self.execute(&plan)
    }

    /// Work out what a run would do without changing anything.
    #[instrument(skip_all, fields(module = %request.name))]
    pub fn plan(&self, request: &GenerateRequest) -> NestgenResult<GenerationPlan> {
        let layout = request.layout()?;
        let name = layout.name();
        let mut plan = GenerationPlan::new(&layout);

        // 1. Module skeleton
        let module_file = layout.module_file();
        let module_present = self.filesystem.exists(&module_file);
        let module_step = Step::RunGenerator {
            schematic: Schematic::Module,
            name: name.kebab().to_string(),
        };
        plan.push(if module_present {
            PlannedStep::skip(
                module_step,
                SkipReason::AlreadyExists {
                    path: module_file.clone(),
                },
            )
        } else {
            self.generator_step(module_step, request.run_generator)
        });
        let module_will_exist = module_present || request.run_generator;

        // 2. Folders
        for folder in layout.subfolders() {
            plan.push(self.guarded(Step::CreateDir { path: folder.clone() }, &folder));
        }

        // 3. Plain templated files
        for artifact in layout.artifacts() {
            if matches!(artifact, Artifact::Service | Artifact::Controller) {
                continue;
            }
            let path = layout.artifact_path(artifact);
            plan.push(self.guarded(
                Step::WriteFile {
                    artifact,
                    path: path.clone(),
                },
                &path,
            ));
        }

        // 4. Service and controller: generate, move, overwrite
        for (schematic, artifact) in [
            (Schematic::Service, Artifact::Service),
            (Schematic::Controller, Artifact::Controller),
        ] {
            self.plan_generated_artifact(&mut plan, &layout, schematic, artifact, request);
        }

        // 5. Module file fix-up
        let patch = Step::PatchModule {
            path: module_file.clone(),
        };
        let patch_step = if module_present {
            let current = self.filesystem.read_file(&module_file)?;
            let up_to_date = patch_module_source(&current, name, layout.variant()) == current;
            if up_to_date && !will_register_in_module(&plan) {
                PlannedStep::skip(patch, SkipReason::UpToDate { path: module_file })
            } else {
                PlannedStep::run(patch)
            }
        } else if module_will_exist {
            PlannedStep::run(patch)
        } else {
            PlannedStep::skip(patch, SkipReason::Missing { path: module_file })
        };
        plan.push(patch_step);

        debug!(
            steps = plan.steps.len(),
            runnable = plan.runnable().count(),
            "Plan ready"
        );
        Ok(plan)
    }

    /// Execute a plan in order.
    ///
    /// Writes re-check existence right before writing. Files moved into place
    /// during this run are the only ones allowed to be overwritten.
    #[instrument(skip_all, fields(module = %plan.module))]
    pub fn execute(&self, plan: &GenerationPlan) -> NestgenResult<GenerationReport> {
        let ctx = RenderContext::new(&plan.module);
        let mut report = GenerationReport::new(plan.module.clone(), plan.module_dir.clone());
        let mut relocated: HashSet<PathBuf> = HashSet::new();

        for planned in &plan.steps {
            let step = planned.step.clone();
            if let Some(reason) = &planned.skip {
                debug!(%step, %reason, "Skipping");
                report.record(step, Outcome::Skipped { why: reason.clone() });
                continue;
            }

            let outcome = match &step {
                Step::RunGenerator { schematic, name } => {
                    let command = self.generator.describe(*schematic, name);
                    info!(%command, "Running generator");
                    self.generator
                        .generate(*schematic, name, &plan.project_root)?;
                    self.ensure_generated(plan, *schematic, name, command)?;
                    Outcome::Done
                }
                Step::CreateDir { path } => {
                    if self.filesystem.exists(path) {
                        Outcome::Skipped {
                            why: SkipReason::AlreadyExists { path: path.clone() },
                        }
                    } else {
                        self.filesystem.create_dir_all(path)?;
                        info!(path = %path.display(), "Folder created");
                        Outcome::Done
                    }
                }
                Step::WriteFile { artifact, path } => {
                    if self.filesystem.exists(path) && !relocated.contains(path) {
                        Outcome::Skipped {
                            why: SkipReason::AlreadyExists { path: path.clone() },
                        }
                    } else {
                        self.write_artifact(*artifact, path, plan.variant, &ctx)?;
                        Outcome::Done
                    }
                }
                Step::Relocate {
                    schematic,
                    from,
                    to,
                    spec,
                } => {
                    let outcome = self.relocate(from, to, *schematic, *spec, &plan.module)?;
                    if outcome == Outcome::Done {
                        relocated.insert(to.clone());
                    }
                    outcome
                }
                Step::PatchModule { path } => self.patch_module(path, &plan.module, plan.variant)?,
            };

            report.record(step, outcome);
        }

        info!(
            written = report.written_files().len(),
            skipped = report.skipped_count(),
            "Module generated"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Run `step` unless `path` is already on disk.
    fn guarded(&self, step: Step, path: &Path) -> PlannedStep {
        if self.filesystem.exists(path) {
            PlannedStep::skip(
                step,
                SkipReason::AlreadyExists {
                    path: path.to_path_buf(),
                },
            )
        } else {
            PlannedStep::run(step)
        }
    }

    fn generator_step(&self, step: Step, enabled: bool) -> PlannedStep {
        if enabled {
            PlannedStep::run(step)
        } else {
            PlannedStep::skip(step, SkipReason::GeneratorDisabled)
        }
    }

    /// Plan the generate → move → overwrite group for one schematic.
    ///
    /// If the final file already exists the generator is not run at all, so
    /// a second run never replaces user code with a fresh skeleton.
    fn plan_generated_artifact(
        &self,
        plan: &mut GenerationPlan,
        layout: &ModuleLayout,
        schematic: Schematic,
        artifact: Artifact,
        request: &GenerateRequest,
    ) {
        let target = layout.artifact_path(artifact);
        let generate = Step::RunGenerator {
            schematic,
            name: layout.name().kebab().to_string(),
        };
        let move_source = Step::Relocate {
            schematic,
            from: layout.generated_source(schematic),
            to: target.clone(),
            spec: false,
        };
        let move_spec = Step::Relocate {
            schematic,
            from: layout.generated_spec(schematic),
            to: layout.relocated_spec(schematic),
            spec: true,
        };
        let write = Step::WriteFile {
            artifact,
            path: target.clone(),
        };

        if self.filesystem.exists(&target) {
            let reason = SkipReason::AlreadyExists { path: target };
            for step in [generate, move_source, move_spec, write] {
                plan.push(PlannedStep::skip(step, reason.clone()));
            }
            return;
        }

        if request.run_generator {
            plan.push(PlannedStep::run(generate));
            plan.push(PlannedStep::run(move_source));
            plan.push(PlannedStep::run(move_spec));
        } else {
            plan.push(PlannedStep::skip(generate, SkipReason::GeneratorDisabled));
            plan.push(PlannedStep::skip(move_source, SkipReason::GeneratorDisabled));
            plan.push(PlannedStep::skip(move_spec, SkipReason::GeneratorDisabled));
        }
        plan.push(PlannedStep::run(write));
    }

    /// The generator writes under its own source root. If that is not the
    /// configured source dir its output lands elsewhere, and every later
    /// step would work on a different folder.
    fn ensure_generated(
        &self,
        plan: &GenerationPlan,
        schematic: Schematic,
        name: &str,
        command: String,
    ) -> NestgenResult<()> {
        let expected = plan.module_dir.join(format!("{name}.{schematic}.ts"));
        if self.filesystem.exists(&expected) {
            return Ok(());
        }
        Err(ApplicationError::GeneratorOutputMissing {
            command,
            path: expected,
        }
        .into())
    }

    fn write_artifact(
        &self,
        artifact: Artifact,
        path: &Path,
        variant: TemplateVariant,
        ctx: &RenderContext,
    ) -> NestgenResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem
            .write_file(path, &artifact.render(variant, ctx))?;
        info!(%artifact, path = %path.display(), "File written");
        Ok(())
    }

    fn relocate(
        &self,
        from: &Path,
        to: &Path,
        schematic: Schematic,
        spec: bool,
        name: &ModuleName,
    ) -> NestgenResult<Outcome> {
        if !self.filesystem.exists(from) {
            warn!(path = %from.display(), "Generator did not produce file, nothing to move");
            return Ok(Outcome::Skipped {
                why: SkipReason::Missing {
                    path: from.to_path_buf(),
                },
            });
        }
        if self.filesystem.exists(to) {
            // The file already in place wins; the generated duplicate goes.
            self.filesystem.remove_file(from)?;
            warn!(path = %to.display(), removed = %from.display(), "Destination exists, generated copy removed");
            return Ok(Outcome::Skipped {
                why: SkipReason::AlreadyExists {
                    path: to.to_path_buf(),
                },
            });
        }

        if let Some(parent) = to.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.rename(from, to)?;
        info!(from = %from.display(), to = %to.display(), "File moved");

        if spec {
            let source = self.filesystem.read_file(to)?;
            let patched = patch_spec_source(&source, name, schematic);
            if patched != source {
                self.filesystem.write_file(to, &patched)?;
            }
        }
        Ok(Outcome::Done)
    }

    fn patch_module(
        &self,
        path: &Path,
        name: &ModuleName,
        variant: TemplateVariant,
    ) -> NestgenResult<Outcome> {
        if !self.filesystem.exists(path) {
            warn!(path = %path.display(), "Module file missing, not patched");
            return Ok(Outcome::Skipped {
                why: SkipReason::Missing {
                    path: path.to_path_buf(),
                },
            });
        }

        let current = self.filesystem.read_file(path)?;
        let patched = patch_module_source(&current, name, variant);
        if patched == current {
            return Ok(Outcome::Skipped {
                why: SkipReason::UpToDate {
                    path: path.to_path_buf(),
                },
            });
        }

        self.filesystem.write_file(path, &patched)?;
        info!(path = %path.display(), "Module updated");
        Ok(Outcome::Done)
    }
}

/// Service and controller schematics register themselves in the module file
/// with sibling-relative imports, which then need patching again.
fn will_register_in_module(plan: &GenerationPlan) -> bool {
    plan.runnable().any(|s| {
        matches!(
            s,
            Step::RunGenerator {
                schematic: Schematic::Service | Schematic::Controller,
                ..
            }
        )
    })
}
